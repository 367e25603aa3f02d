//! Dashboard rollup counters.

use serde::{Deserialize, Serialize};

use crate::alerts::Alert;
use crate::facility::{Checklist, Incident};
use crate::logs::{LogEntry, MaintenanceLog, PoolTest};

// ---

/// Number of most recent pool tests the compliance rate is computed over.
pub const RECENT_POOL_TEST_WINDOW: usize = 10;

/// Rates at or above this are reported as good.
pub const GOOD_COMPLIANCE_RATE: u32 = 90;

/// Rates at or above this (and below good) are reported as a warning.
pub const WARNING_COMPLIANCE_RATE: u32 = 70;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Percent of recent pool tests marked compliant; `None` without tests.
    pub compliance_rate: Option<u32>,
    pub active_incidents: usize,
    pub pending_checklists: usize,
    pub maintenance_alerts: usize,
    pub total_pool_tests: usize,
    pub recent_pool_tests: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    NoData,
    Good,
    Warning,
    Poor,
}

impl ComplianceStatus {
    pub fn from_rate(rate: Option<u32>) -> Self {
        // ---
        match rate {
            None => ComplianceStatus::NoData,
            Some(r) if r >= GOOD_COMPLIANCE_RATE => ComplianceStatus::Good,
            Some(r) if r >= WARNING_COMPLIANCE_RATE => ComplianceStatus::Warning,
            Some(_) => ComplianceStatus::Poor,
        }
    }
}

impl DashboardStats {
    pub fn compliance_status(&self) -> ComplianceStatus {
        ComplianceStatus::from_rate(self.compliance_rate)
    }
}

/// Roll up counters over the default recency window.
pub fn aggregate(
    logs: &[MaintenanceLog],
    incidents: &[Incident],
    checklists: &[Checklist],
    alerts: &[Alert],
) -> DashboardStats {
    aggregate_with(logs, incidents, checklists, alerts, RECENT_POOL_TEST_WINDOW)
}

/// Roll up counters, computing the compliance rate over the `recent_window`
/// newest pool tests.
///
/// Pool tests are ordered newest first; tests with equal timestamps keep
/// their input order. `alerts` is counted as given, not re-derived.
pub fn aggregate_with(
    logs: &[MaintenanceLog],
    incidents: &[Incident],
    checklists: &[Checklist],
    alerts: &[Alert],
    recent_window: usize,
) -> DashboardStats {
    // ---
    let pool_tests = pool_tests_newest_first(logs);
    let recent = &pool_tests[..pool_tests.len().min(recent_window)];

    let compliance_rate = if recent.is_empty() {
        None
    } else {
        let compliant = recent.iter().filter(|t| t.is_compliant).count();
        Some(((compliant as f64 / recent.len() as f64) * 100.0).round() as u32)
    };

    DashboardStats {
        compliance_rate,
        active_incidents: incidents.iter().filter(|i| i.status.is_active()).count(),
        pending_checklists: checklists.iter().filter(|c| c.status.is_open()).count(),
        maintenance_alerts: alerts.len(),
        total_pool_tests: pool_tests.len(),
        recent_pool_tests: recent.len(),
    }
}

fn pool_tests_newest_first(logs: &[MaintenanceLog]) -> Vec<&PoolTest> {
    // ---
    let mut tests: Vec<(&MaintenanceLog, &PoolTest)> = logs
        .iter()
        .filter_map(|log| match &log.entry {
            LogEntry::PoolTesting(test) => Some((log, test)),
            _ => None,
        })
        .collect();

    // Stable sort keeps insertion order for equal timestamps.
    tests.sort_by(|(a, _), (b, _)| b.timestamp.cmp(&a.timestamp));
    tests.into_iter().map(|(_, test)| test).collect()
}
