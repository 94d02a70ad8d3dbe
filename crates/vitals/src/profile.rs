//! Patient Profile and Baseline

use crate::reading::BloodPressure;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Patient-specific normal values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthBaseline {
    /// Normal body temperature
    pub normal_temperature: Decimal,
    /// Normal blood pressure
    pub blood_pressure: BloodPressure,
}

impl HealthBaseline {
    pub fn new(normal_temperature: Decimal, blood_pressure: BloodPressure) -> Self {
        Self {
            normal_temperature,
            blood_pressure,
        }
    }
}

/// Stored patient record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    id: String,
    pub name: String,
    pub surname: String,
    pub birthday: NaiveDate,
    pub health: HealthBaseline,
}

impl PatientProfile {
    /// Create a profile with a known identifier
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        surname: impl Into<String>,
        birthday: NaiveDate,
        health: HealthBaseline,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            surname: surname.into(),
            birthday,
            health,
        }
    }

    /// Patient identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Baseline vitals
    pub fn health(&self) -> &HealthBaseline {
        &self.health
    }
}

/// Patient record that has not been assigned an identifier yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub surname: String,
    pub birthday: NaiveDate,
    pub health: HealthBaseline,
}

impl NewPatient {
    /// Attach an identifier, producing a full profile
    pub fn with_id(self, id: impl Into<String>) -> PatientProfile {
        PatientProfile {
            id: id.into(),
            name: self.name,
            surname: self.surname,
            birthday: self.birthday,
            health: self.health,
        }
    }
}
