//! Validation errors for malformed evaluation input.
//!
//! The evaluator, alert deriver and aggregator are total over well-formed
//! input and never fail. Callers that accept readings or range tables from
//! outside the process validate them first with
//! [`ReadingSet::validate`](crate::models::ReadingSet::validate) and
//! [`RangeTable::validate`](crate::models::RangeTable::validate).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{parameter} range is inverted: min {min} is greater than max {max}")]
    InvertedRange {
        parameter: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{parameter} range bound is not a finite number")]
    NonFiniteBound { parameter: &'static str },

    #[error("{parameter} reading is not a finite number")]
    NonFiniteReading { parameter: &'static str },
}
