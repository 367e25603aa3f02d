//! Maintenance alert derivation.
//!
//! Alerts are recomputed from the log snapshot on every read and never
//! stored. Alert ids are built from the alert kind and the source log id,
//! so deriving twice over the same logs yields identical output.
//!
//! # Clock injection
//! Due-date checks take an explicit `as_of` instead of reading the system
//! clock, which keeps derivation deterministic in tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logs::{LogEntry, MaintenanceLog, SaltLevel, TemperatureReading};

// ---

/// Recurring maintenance due within this many days raises a "due soon" alert.
pub const DUE_SOON_DAYS: i64 = 7;

/// "Due soon" alerts at or under this many days are medium severity.
pub const URGENT_DAYS: i64 = 3;

/// Alert severity. Variant order is the display order: high first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    OutOfRange,
    MaintenanceDue,
    MaintenanceOverdue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_id: Option<String>,
}

/// Day cutoffs for due-date alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertPolicy {
    pub due_soon_days: i64,
    pub urgent_days: i64,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            due_soon_days: DUE_SOON_DAYS,
            urgent_days: URGENT_DAYS,
        }
    }
}

/// Naming for a recurring maintenance task.
struct RecurringTask {
    id_prefix: &'static str,
    title: &'static str,
    noun: &'static str,
}

const SALT_CELL_CLEANING: RecurringTask = RecurringTask {
    id_prefix: "salt-cell",
    title: "Salt Cell Cleaning",
    noun: "Salt cell cleaning",
};

const FILTER_CLEANING: RecurringTask = RecurringTask {
    id_prefix: "filter",
    title: "Filter Cleaning",
    noun: "Filter cleaning",
};

// ---

/// Derive alerts with the default day cutoffs.
pub fn derive_alerts(logs: &[MaintenanceLog], as_of: DateTime<Utc>) -> Vec<Alert> {
    derive_alerts_with(logs, as_of, &AlertPolicy::default())
}

/// Derive alerts for every log, sorted high → medium → low.
///
/// The sort is stable: alerts of equal severity keep the order of the logs
/// that produced them.
pub fn derive_alerts_with(
    logs: &[MaintenanceLog],
    as_of: DateTime<Utc>,
    policy: &AlertPolicy,
) -> Vec<Alert> {
    // ---
    let mut alerts: Vec<Alert> = logs
        .iter()
        .filter_map(|log| alert_for(log, as_of, policy))
        .collect();

    alerts.sort_by_key(|alert| alert.severity);
    alerts
}

fn alert_for(log: &MaintenanceLog, as_of: DateTime<Utc>, policy: &AlertPolicy) -> Option<Alert> {
    // ---
    match &log.entry {
        LogEntry::SaltLevel(salt) if !salt.is_in_range => Some(salt_level_alert(log, salt)),
        LogEntry::Temperature(temp) if !temp.is_in_range => Some(temperature_alert(log, temp)),
        LogEntry::SaltCellCleaning(cell) => cell
            .next_cleaning_due
            .and_then(|due| due_date_alert(&SALT_CELL_CLEANING, log, due, as_of, policy)),
        LogEntry::FilterCleaning(filter) => filter
            .next_cleaning_due
            .and_then(|due| due_date_alert(&FILTER_CLEANING, log, due, as_of, policy)),
        LogEntry::SaltLevel(_)
        | LogEntry::Temperature(_)
        | LogEntry::PoolTesting(_)
        | LogEntry::Inspection(_) => None,
    }
}

fn salt_level_alert(log: &MaintenanceLog, salt: &SaltLevel) -> Alert {
    // ---
    Alert {
        id: format!("salt-{}", log.id),
        kind: AlertKind::OutOfRange,
        severity: Severity::High,
        title: "Salt Level Out of Range".to_string(),
        description: format!(
            "Salt level is {} ppm (target: {} ppm)",
            salt.salt_level, salt.target_range
        ),
        log_id: Some(log.id.clone()),
    }
}

fn temperature_alert(log: &MaintenanceLog, temp: &TemperatureReading) -> Alert {
    // ---
    Alert {
        id: format!("temp-{}", log.id),
        kind: AlertKind::OutOfRange,
        severity: Severity::Medium,
        title: "Temperature Out of Range".to_string(),
        description: format!(
            "{} temperature is {}°F (target: {}°F)",
            temp.location, temp.temperature, temp.target_range
        ),
        log_id: Some(log.id.clone()),
    }
}

fn due_date_alert(
    task: &RecurringTask,
    log: &MaintenanceLog,
    due: DateTime<Utc>,
    as_of: DateTime<Utc>,
    policy: &AlertPolicy,
) -> Option<Alert> {
    // ---
    let days_until_due = whole_days_between(as_of, due);

    if days_until_due < 0 {
        return Some(Alert {
            id: format!("{}-overdue-{}", task.id_prefix, log.id),
            kind: AlertKind::MaintenanceOverdue,
            severity: Severity::High,
            title: format!("{} Overdue", task.title),
            description: format!("{} was due {} ago", task.noun, days(days_until_due.abs())),
            log_id: Some(log.id.clone()),
        });
    }

    if days_until_due > policy.due_soon_days {
        return None;
    }

    let severity = if days_until_due <= policy.urgent_days {
        Severity::Medium
    } else {
        Severity::Low
    };

    Some(Alert {
        id: format!("{}-due-{}", task.id_prefix, log.id),
        kind: AlertKind::MaintenanceDue,
        severity,
        title: format!("{} Due Soon", task.title),
        description: format!("{} is due in {}", task.noun, days(days_until_due)),
        log_id: Some(log.id.clone()),
    })
}

/// Full days from `from` to `to`, truncated toward zero. A due date 36
/// hours in the past is one day overdue; 12 hours in the past is zero.
fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days()
}

fn days(n: i64) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}
