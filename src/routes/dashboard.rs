use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::FacilityQuery;
use crate::{
    aggregate_with, derive_alerts_with, for_facility, Checklist, ComplianceStatus, Config,
    DashboardStats, Incident, MaintenanceLog,
};

// ---

pub fn router() -> Router<Config> {
    // ---
    Router::new().route("/dashboard/stats", post(handler))
}

/// Body for `POST /dashboard/stats`: one consistent snapshot of a
/// facility's records.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRequest {
    #[serde(default)]
    logs: Vec<MaintenanceLog>,
    #[serde(default)]
    incidents: Vec<Incident>,
    #[serde(default)]
    checklists: Vec<Checklist>,
    as_of: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardResponse {
    stats: DashboardStats,
    compliance_status: ComplianceStatus,
}

async fn handler(
    Query(params): Query<FacilityQuery>,
    State(config): State<Config>,
    Json(request): Json<DashboardRequest>,
) -> impl IntoResponse {
    // ---
    info!("POST /dashboard/stats");

    let facility = params.facility_id.as_deref();
    let logs = for_facility(request.logs, facility);
    let incidents = for_facility(request.incidents, facility);
    let checklists = for_facility(request.checklists, facility);
    debug!(
        "Snapshot for {:?}: {} logs, {} incidents, {} checklists",
        facility,
        logs.len(),
        incidents.len(),
        checklists.len()
    );

    // Alerts are derived from this same snapshot so the count matches.
    let as_of = request.as_of.unwrap_or_else(Utc::now);
    let alerts = derive_alerts_with(&logs, as_of, &config.alert_policy);

    let stats = aggregate_with(
        &logs,
        &incidents,
        &checklists,
        &alerts,
        config.recent_pool_test_window,
    );
    let compliance_status = stats.compliance_status();

    info!(
        "Dashboard stats: rate={:?}, {} alerts, {} active incidents",
        stats.compliance_rate, stats.maintenance_alerts, stats.active_incidents
    );
    (
        StatusCode::OK,
        Json(DashboardResponse {
            stats,
            compliance_status,
        }),
    )
}
