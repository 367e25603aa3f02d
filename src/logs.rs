//! Maintenance and test log records.
//!
//! A log is a common header (id, facility, author, timestamp) plus one
//! [`LogEntry`] variant per log kind. The JSON form is a single flat
//! object with a `type` tag, matching the documents the persistence layer
//! stores.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::compliance::assess;
use crate::models::{Range, RangeTable, ReadingSet};

// ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLog {
    pub id: String,
    pub facility_id: String,
    pub recorded_by: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub entry: LogEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEntry {
    PoolTesting(PoolTest),
    Inspection(Inspection),
    SaltLevel(SaltLevel),
    SaltCellCleaning(SaltCellCleaning),
    FilterCleaning(FilterCleaning),
    Temperature(TemperatureReading),
}

impl LogEntry {
    /// The `type` tag for this entry.
    pub fn kind(&self) -> &'static str {
        // ---
        match self {
            LogEntry::PoolTesting(_) => "pool_testing",
            LogEntry::Inspection(_) => "inspection",
            LogEntry::SaltLevel(_) => "salt_level",
            LogEntry::SaltCellCleaning(_) => "salt_cell_cleaning",
            LogEntry::FilterCleaning(_) => "filter_cleaning",
            LogEntry::Temperature(_) => "temperature",
        }
    }
}

// ---

/// A recorded water test with its compliance outcome frozen at recording
/// time. Later rule changes do not touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolTest {
    pub readings: ReadingSet,
    pub is_compliant: bool,
    #[serde(default)]
    pub violations: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl PoolTest {
    /// Evaluate the readings once against the facility's active table.
    pub fn record(readings: ReadingSet, ranges: &RangeTable) -> Self {
        // ---
        let assessment = assess(&readings, ranges);
        Self {
            readings,
            is_compliant: assessment.result.is_compliant,
            violations: assessment.result.violations,
            recommendations: assessment.recommendations,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionType {
    Daily,
    Weekly,
    Monthly,
    Safety,
    Equipment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionOutcome {
    Pass,
    Fail,
    NeedsAttention,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub inspection_type: InspectionType,
    pub overall_status: InspectionOutcome,
    #[serde(default)]
    pub follow_up_required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaltLevel {
    pub salt_level: f64,
    pub target_range: Range,
    pub is_in_range: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_taken: Option<String>,
}

impl SaltLevel {
    pub fn new(salt_level: f64, target_range: Range) -> Self {
        Self {
            salt_level,
            target_range,
            is_in_range: target_range.contains(salt_level),
            action_taken: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellCleaningMethod {
    AcidWash,
    Manual,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaltCellCleaning {
    pub cleaning_method: CellCleaningMethod,
    pub condition_before: String,
    pub condition_after: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cleaning_due: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    Sand,
    Cartridge,
    De,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCleaningMethod {
    Backwash,
    Replace,
    DeepClean,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCleaning {
    pub filter_type: FilterType,
    pub cleaning_method: FilterCleaningMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_before: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_after: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cleaning_due: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureLocation {
    Pool,
    Spa,
    Ambient,
}

impl fmt::Display for TemperatureLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ---
        let name = match self {
            TemperatureLocation::Pool => "pool",
            TemperatureLocation::Spa => "spa",
            TemperatureLocation::Ambient => "ambient",
        };
        f.write_str(name)
    }
}

/// Water or air temperature in °F.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureReading {
    pub temperature: f64,
    pub location: TemperatureLocation,
    pub target_range: Range,
    pub is_in_range: bool,
}

impl TemperatureReading {
    pub fn new(temperature: f64, location: TemperatureLocation, target_range: Range) -> Self {
        Self {
            temperature,
            location,
            target_range,
            is_in_range: target_range.contains(temperature),
        }
    }
}
