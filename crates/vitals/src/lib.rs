//! Vital Signs
//!
//! Data model for patient vital signs and the baseline comparison rules:
//! - Blood pressure must match the baseline exactly
//! - Temperature may drift from the baseline by up to 1.5 degrees
//!
//! Temperatures are exact decimals, so the 1.5 bound is compared without rounding.

pub mod evaluator;
mod profile;
mod reading;

pub use evaluator::{
    is_blood_pressure_normal, is_normal, is_temperature_normal, TEMPERATURE_TOLERANCE,
};
pub use profile::{HealthBaseline, NewPatient, PatientProfile};
pub use reading::{BloodPressure, Observation, VitalKind};
pub use rust_decimal::Decimal;
