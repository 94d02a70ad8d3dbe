//! Vital Sign Readings

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Blood pressure reading in mmHg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BloodPressure {
    /// Upper (systolic) value
    pub systolic: i32,
    /// Lower (diastolic) value
    pub diastolic: i32,
}

impl BloodPressure {
    /// Create a new reading
    pub fn new(systolic: i32, diastolic: i32) -> Self {
        Self {
            systolic,
            diastolic,
        }
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

/// Which vital sign an observation carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalKind {
    BloodPressure,
    Temperature,
}

impl VitalKind {
    /// Stable label, used in logs and metric labels
    pub fn as_str(&self) -> &'static str {
        match self {
            VitalKind::BloodPressure => "blood_pressure",
            VitalKind::Temperature => "temperature",
        }
    }
}

impl fmt::Display for VitalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single newly measured vital sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Observation {
    BloodPressure(BloodPressure),
    Temperature { value: Decimal },
}

impl Observation {
    /// Temperature observation
    pub fn temperature(value: Decimal) -> Self {
        Observation::Temperature { value }
    }

    /// Vital kind of this observation
    pub fn kind(&self) -> VitalKind {
        match self {
            Observation::BloodPressure(_) => VitalKind::BloodPressure,
            Observation::Temperature { .. } => VitalKind::Temperature,
        }
    }
}

impl From<BloodPressure> for Observation {
    fn from(reading: BloodPressure) -> Self {
        Observation::BloodPressure(reading)
    }
}
