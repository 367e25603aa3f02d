//! Water-chemistry data models: readings, acceptable ranges and the
//! per-facility compliance rules that select a range table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ---

/// Chemical parameters captured by a pool test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Ph,
    Chlorine,
    Alkalinity,
    CalciumHardness,
    CyanuricAcid,
    Temperature,
}

impl Parameter {
    pub const ALL: [Parameter; 6] = [
        Parameter::Ph,
        Parameter::Chlorine,
        Parameter::Alkalinity,
        Parameter::CalciumHardness,
        Parameter::CyanuricAcid,
        Parameter::Temperature,
    ];

    /// Display name used in violation messages.
    pub fn label(self) -> &'static str {
        // ---
        match self {
            Parameter::Ph => "pH",
            Parameter::Chlorine => "Chlorine",
            Parameter::Alkalinity => "Alkalinity",
            Parameter::CalciumHardness => "Calcium Hardness",
            Parameter::CyanuricAcid => "Cyanuric Acid",
            Parameter::Temperature => "Temperature",
        }
    }

    /// Unit suffix appended directly after a value (`""` for pH).
    pub fn unit_suffix(self) -> &'static str {
        // ---
        match self {
            Parameter::Ph => "",
            Parameter::Temperature => "°F",
            _ => " ppm",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which side of a range a reading fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deviation {
    Low,
    High,
}

/// Inclusive `{min, max}` bound for a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `min <= value <= max`. Values on either bound are in range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Returns the side the value lies outside of, or `None` when in range.
    pub fn deviation(&self, value: f64) -> Option<Deviation> {
        // ---
        if value < self.min {
            Some(Deviation::Low)
        } else if value > self.max {
            Some(Deviation::High)
        } else {
            None
        }
    }

    fn validate(&self, parameter: Parameter) -> Result<(), ValidationError> {
        // ---
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ValidationError::NonFiniteBound {
                parameter: parameter.label(),
            });
        }
        if self.min > self.max {
            return Err(ValidationError::InvertedRange {
                parameter: parameter.label(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Formats as `min-max`, e.g. `7.2-7.8` or `80-120`.
impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

// ---

/// One pool-test submission. Any parameter may be absent; absent
/// parameters are never checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSet {
    #[serde(rename = "pH", skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chlorine: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alkalinity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calcium_hardness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cyanuric_acid: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl ReadingSet {
    pub fn get(&self, parameter: Parameter) -> Option<f64> {
        // ---
        match parameter {
            Parameter::Ph => self.ph,
            Parameter::Chlorine => self.chlorine,
            Parameter::Alkalinity => self.alkalinity,
            Parameter::CalciumHardness => self.calcium_hardness,
            Parameter::CyanuricAcid => self.cyanuric_acid,
            Parameter::Temperature => self.temperature,
        }
    }

    /// Rejects NaN and infinite readings.
    pub fn validate(&self) -> Result<(), ValidationError> {
        // ---
        for parameter in Parameter::ALL {
            if let Some(value) = self.get(parameter) {
                if !value.is_finite() {
                    return Err(ValidationError::NonFiniteReading {
                        parameter: parameter.label(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Acceptable bounds for each parameter. pH, chlorine and alkalinity are
/// always present; the rest are optional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeTable {
    #[serde(rename = "pH")]
    pub ph: Range,
    pub chlorine: Range,
    pub alkalinity: Range,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calcium_hardness: Option<Range>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cyanuric_acid: Option<Range>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Range>,
}

/// Model Aquatic Health Code bounds, used when a facility has not
/// configured its own rules.
pub const MAHC_STANDARD: RangeTable = RangeTable {
    ph: Range::new(7.2, 7.8),
    chlorine: Range::new(1.0, 10.0),
    alkalinity: Range::new(80.0, 120.0),
    calcium_hardness: Some(Range::new(200.0, 400.0)),
    cyanuric_acid: Some(Range::new(30.0, 50.0)),
    temperature: Some(Range::new(78.0, 84.0)),
};

impl Default for RangeTable {
    fn default() -> Self {
        MAHC_STANDARD
    }
}

impl RangeTable {
    pub fn get(&self, parameter: Parameter) -> Option<Range> {
        // ---
        match parameter {
            Parameter::Ph => Some(self.ph),
            Parameter::Chlorine => Some(self.chlorine),
            Parameter::Alkalinity => Some(self.alkalinity),
            Parameter::CalciumHardness => self.calcium_hardness,
            Parameter::CyanuricAcid => self.cyanuric_acid,
            Parameter::Temperature => self.temperature,
        }
    }

    /// The active table for a facility: its configured table, or the
    /// default standard when none is configured.
    pub fn resolve(configured: Option<&RangeTable>) -> RangeTable {
        configured.copied().unwrap_or_default()
    }

    /// Checks every bound is finite and not inverted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        // ---
        Parameter::ALL
            .into_iter()
            .filter_map(|parameter| self.get(parameter).map(|range| (parameter, range)))
            .try_for_each(|(parameter, range)| range.validate(parameter))
    }
}

// ---

/// Where a facility's range table comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStandard {
    #[serde(rename = "MAHC")]
    Mahc,
    #[serde(rename = "state")]
    State,
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "custom")]
    Custom,
}

/// The compliance rules record a facility has configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRules {
    pub id: String,
    pub facility_id: String,
    pub standard: ComplianceStandard,
    pub pool_testing_ranges: RangeTable,
}

impl ComplianceRules {
    /// Active table for an optional rules record.
    pub fn active_ranges(rules: Option<&ComplianceRules>) -> RangeTable {
        RangeTable::resolve(rules.map(|r| &r.pool_testing_ranges))
    }
}
