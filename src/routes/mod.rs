//! HTTP gateway: merges the per-area subrouters and owns the shared
//! request plumbing (facility filter query, error bodies).

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json, Router};
use serde::{Deserialize, Serialize};

use crate::{Config, ValidationError};

mod alerts;
mod compliance;
mod dashboard;
mod health;

// ---

pub fn router(config: Config) -> Router {
    // ---
    Router::new()
        .merge(compliance::router())
        .merge(alerts::router())
        .merge(dashboard::router())
        .merge(health::router())
        .with_state(config)
}

/// Optional `?facilityId=` filter applied to submitted record collections.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FacilityQuery {
    facility_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// 422 response for input that fails validation.
fn unprocessable(err: ValidationError) -> Response {
    // ---
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
        .into_response()
}
