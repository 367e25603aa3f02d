use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::{assess, ComplianceRules, RangeTable, ReadingSet, ValidationError};

// ---

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // ---
    Router::new().route("/compliance/evaluate", post(handler))
}

/// Body for `POST /compliance/evaluate`.
///
/// An explicit `ranges` table wins over the facility's `rules` record;
/// with neither, the readings are checked against the default standard.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    readings: ReadingSet,
    ranges: Option<RangeTable>,
    rules: Option<ComplianceRules>,
}

impl EvaluateRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        // ---
        self.readings.validate()?;
        if let Some(ranges) = &self.ranges {
            ranges.validate()?;
        }
        if let Some(rules) = &self.rules {
            rules.pool_testing_ranges.validate()?;
        }
        Ok(())
    }

    fn active_ranges(&self) -> RangeTable {
        // ---
        match &self.ranges {
            Some(ranges) => *ranges,
            None => ComplianceRules::active_ranges(self.rules.as_ref()),
        }
    }
}

async fn handler(Json(request): Json<EvaluateRequest>) -> impl IntoResponse {
    // ---
    info!("POST /compliance/evaluate");

    if let Err(e) = request.validate() {
        warn!("Rejected compliance request: {}", e);
        return super::unprocessable(e);
    }

    match (&request.ranges, &request.rules) {
        (Some(_), _) => debug!("Using ranges supplied with the request"),
        (None, Some(rules)) => debug!(
            "Using {:?} rules {} for facility {}",
            rules.standard, rules.id, rules.facility_id
        ),
        (None, None) => debug!("No facility ranges supplied, using default standard"),
    }
    let ranges = request.active_ranges();
    let assessment = assess(&request.readings, &ranges);

    info!(
        "Evaluation complete: compliant={}, {} violations, {} recommendations",
        assessment.result.is_compliant,
        assessment.result.violations.len(),
        assessment.recommendations.len()
    );
    (StatusCode::OK, Json(assessment)).into_response()
}
