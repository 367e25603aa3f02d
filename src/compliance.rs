//! Water-chemistry compliance evaluation.
//!
//! Pure functions over a [`ReadingSet`] and a [`RangeTable`]: no I/O, no
//! clock, no shared state. The same inputs always give the same output,
//! which is what lets a pool-test log freeze its result at recording time.

use serde::{Deserialize, Serialize};

use crate::models::{Deviation, Parameter, Range, RangeTable, ReadingSet, MAHC_STANDARD};

// ---

/// Parameters checked for violations, in reporting order.
///
/// Cyanuric acid and temperature have bounds in the range table but are
/// not checked.
pub const CHECKED_PARAMETERS: [Parameter; 4] = [
    Parameter::Ph,
    Parameter::Chlorine,
    Parameter::Alkalinity,
    Parameter::CalciumHardness,
];

/// Parameters that get a corrective-action recommendation, in order.
pub const ADVISED_PARAMETERS: [Parameter; 3] =
    [Parameter::Ph, Parameter::Chlorine, Parameter::Alkalinity];

/// Outcome of checking one reading set against a range table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceResult {
    pub is_compliant: bool,
    pub violations: Vec<String>,
}

/// Compliance result plus remediation advice, as frozen onto a pool test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    #[serde(flatten)]
    pub result: ComplianceResult,
    pub recommendations: Vec<String>,
}

/// Check readings against the table.
///
/// A parameter is checked only when both the reading and its bound are
/// present. Bounds are inclusive and compared exactly, with no tolerance.
pub fn evaluate(readings: &ReadingSet, ranges: &RangeTable) -> ComplianceResult {
    // ---
    let violations: Vec<String> = CHECKED_PARAMETERS
        .into_iter()
        .filter_map(|parameter| {
            let value = readings.get(parameter)?;
            let range = ranges.get(parameter)?;
            range
                .deviation(value)
                .map(|_| violation_message(parameter, value, range))
        })
        .collect();

    ComplianceResult {
        is_compliant: violations.is_empty(),
        violations,
    }
}

/// Corrective actions for out-of-range pH, chlorine and alkalinity.
///
/// Uses the default standard when no table is given. At most one
/// recommendation per parameter.
pub fn recommend(readings: &ReadingSet, ranges: Option<&RangeTable>) -> Vec<String> {
    // ---
    let ranges = ranges.unwrap_or(&MAHC_STANDARD);

    ADVISED_PARAMETERS
        .into_iter()
        .filter_map(|parameter| {
            let value = readings.get(parameter)?;
            let deviation = ranges.get(parameter)?.deviation(value)?;
            remedy(parameter, deviation)
        })
        .map(String::from)
        .collect()
}

/// [`evaluate`] and [`recommend`] against the same table.
pub fn assess(readings: &ReadingSet, ranges: &RangeTable) -> Assessment {
    Assessment {
        result: evaluate(readings, ranges),
        recommendations: recommend(readings, Some(ranges)),
    }
}

fn violation_message(parameter: Parameter, value: f64, range: Range) -> String {
    // ---
    let unit = parameter.unit_suffix();
    format!(
        "{} {}{} is outside range {}{}",
        parameter.label(),
        value,
        unit,
        range,
        unit
    )
}

fn remedy(parameter: Parameter, deviation: Deviation) -> Option<&'static str> {
    // ---
    let text = match (parameter, deviation) {
        (Parameter::Ph, Deviation::Low) => {
            "pH is too low. Add soda ash or sodium carbonate to increase pH."
        }
        (Parameter::Ph, Deviation::High) => {
            "pH is too high. Add muriatic acid or sodium bisulfate to lower pH."
        }
        (Parameter::Chlorine, Deviation::Low) => {
            "Chlorine is too low. Add chlorine to increase sanitizer levels."
        }
        (Parameter::Chlorine, Deviation::High) => {
            "Chlorine is too high. Dilute or allow time for chlorine to dissipate."
        }
        (Parameter::Alkalinity, Deviation::Low) => {
            "Alkalinity is too low. Add sodium bicarbonate to increase alkalinity."
        }
        (Parameter::Alkalinity, Deviation::High) => {
            "Alkalinity is too high. Add muriatic acid to lower alkalinity."
        }
        _ => return None,
    };
    Some(text)
}
