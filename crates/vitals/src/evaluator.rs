//! Baseline Comparison Rules
//!
//! Pure functions deciding whether an observed vital sign is normal for a patient.
//! Readings are not range-checked here: negative or implausible values are compared
//! like any other.

use crate::profile::HealthBaseline;
use crate::reading::{BloodPressure, Observation};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Maximum allowed deviation from the baseline temperature (inclusive)
pub const TEMPERATURE_TOLERANCE: Decimal = dec!(1.5);

/// Blood pressure is normal only when both components equal the baseline
pub fn is_blood_pressure_normal(baseline: BloodPressure, observed: BloodPressure) -> bool {
    observed.systolic == baseline.systolic && observed.diastolic == baseline.diastolic
}

/// Temperature is normal when within `TEMPERATURE_TOLERANCE` of the baseline
pub fn is_temperature_normal(baseline: Decimal, observed: Decimal) -> bool {
    (observed - baseline).abs() <= TEMPERATURE_TOLERANCE
}

/// Compare an observation against the baseline of the same vital kind
pub fn is_normal(baseline: &HealthBaseline, observation: &Observation) -> bool {
    match *observation {
        Observation::BloodPressure(observed) => {
            is_blood_pressure_normal(baseline.blood_pressure, observed)
        }
        Observation::Temperature { value } => {
            is_temperature_normal(baseline.normal_temperature, value)
        }
    }
}
