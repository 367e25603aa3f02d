//! Water-chemistry compliance and maintenance alerting for aquatics
//! facilities.
//!
//! The core is three pure functions over in-memory records:
//! - [`evaluate`] / [`recommend`] check a pool test against a range table
//! - [`derive_alerts`] turns maintenance logs into a prioritized alert list
//! - [`aggregate`] rolls logs, incidents, checklists and alerts into
//!   dashboard counters
//!
//! None of them read global state, the clock or the environment; facility,
//! time and thresholds are all explicit arguments. [`routes`] exposes them
//! over HTTP for the binary.

pub mod alerts;
pub mod compliance;
pub mod config;
pub mod error;
pub mod facility;
pub mod logs;
pub mod models;
pub mod routes;
pub mod stats;

pub use alerts::{derive_alerts, derive_alerts_with, Alert, AlertKind, AlertPolicy, Severity};
pub use compliance::{assess, evaluate, recommend, Assessment, ComplianceResult};
pub use config::Config;
pub use error::ValidationError;
pub use facility::{
    for_facility, Checklist, ChecklistStatus, FacilityScoped, Incident, IncidentStatus,
};
pub use logs::{LogEntry, MaintenanceLog, PoolTest};
pub use models::{
    ComplianceRules, ComplianceStandard, Parameter, Range, RangeTable, ReadingSet, MAHC_STANDARD,
};
pub use stats::{aggregate, aggregate_with, ComplianceStatus, DashboardStats};
