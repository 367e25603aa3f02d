use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use super::FacilityQuery;
use crate::{derive_alerts_with, for_facility, Config, MaintenanceLog};

// ---

pub fn router() -> Router<Config> {
    // ---
    Router::new().route("/alerts", post(handler))
}

/// Body for `POST /alerts`. `asOf` defaults to the current time.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertsRequest {
    logs: Vec<MaintenanceLog>,
    as_of: Option<DateTime<Utc>>,
}

async fn handler(
    Query(params): Query<FacilityQuery>,
    State(config): State<Config>,
    Json(request): Json<AlertsRequest>,
) -> impl IntoResponse {
    // ---
    info!("POST /alerts - {} logs", request.logs.len());

    let logs = for_facility(request.logs, params.facility_id.as_deref());
    let as_of = request.as_of.unwrap_or_else(Utc::now);
    debug!(
        "Deriving alerts over {} logs for {:?} as of {}",
        logs.len(),
        params.facility_id,
        as_of
    );

    let alerts = derive_alerts_with(&logs, as_of, &config.alert_policy);

    info!("Derived {} alerts", alerts.len());
    (StatusCode::OK, Json(alerts))
}
