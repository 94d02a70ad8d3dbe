//! In-Memory Repository

use crate::{new_patient_id, PatientLookup, PatientStore, StorageError};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info};
use vitals::{NewPatient, PatientProfile};

/// Patient repository held entirely in memory
pub struct InMemoryRepository {
    patients: Mutex<HashMap<String, PatientProfile>>,
}

impl InMemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        info!("Creating in-memory patient repository");
        Self {
            patients: Mutex::new(HashMap::new()),
        }
    }

    /// Create a repository pre-filled with profiles
    pub fn with_profiles(profiles: impl IntoIterator<Item = PatientProfile>) -> Self {
        let patients = profiles
            .into_iter()
            .map(|p| (p.id().to_string(), p))
            .collect::<HashMap<_, _>>();
        info!("Creating in-memory patient repository with {} patients", patients.len());
        Self {
            patients: Mutex::new(patients),
        }
    }

    /// Number of stored patients
    pub fn len(&self) -> usize {
        self.patients.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, PatientProfile>>, StorageError> {
        self.patients
            .lock()
            .map_err(|e| StorageError::Backend(format!("Lock error: {}", e)))
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientLookup for InMemoryRepository {
    fn get_by_id(&self, id: &str) -> Result<PatientProfile, StorageError> {
        let patients = self.lock()?;
        patients
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }
}

impl PatientStore for InMemoryRepository {
    fn add(&self, patient: NewPatient) -> Result<String, StorageError> {
        let id = new_patient_id();
        let mut patients = self.lock()?;
        patients.insert(id.clone(), patient.with_id(id.clone()));
        debug!("Added patient {}", id);
        Ok(id)
    }

    fn update(&self, profile: PatientProfile) -> Result<(), StorageError> {
        let mut patients = self.lock()?;
        match patients.get_mut(profile.id()) {
            Some(existing) => {
                debug!("Updated patient {}", profile.id());
                *existing = profile;
                Ok(())
            }
            None => Err(StorageError::NotFound(profile.id().to_string())),
        }
    }

    fn list(&self) -> Result<Vec<PatientProfile>, StorageError> {
        let patients = self.lock()?;
        let mut all: Vec<_> = patients.values().cloned().collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use vitals::{BloodPressure, HealthBaseline};

    fn new_patient() -> NewPatient {
        NewPatient {
            name: "Ivan".to_string(),
            surname: "Petrov".to_string(),
            birthday: NaiveDate::from_ymd_opt(1980, 11, 26).unwrap(),
            health: HealthBaseline::new(dec!(36.65), BloodPressure::new(120, 80)),
        }
    }

    #[test]
    fn test_add_and_get() {
        let repo = InMemoryRepository::new();
        let id = repo.add(new_patient()).unwrap();

        let profile = repo.get_by_id(&id).unwrap();
        assert_eq!(profile.id(), id);
        assert_eq!(profile.health().blood_pressure, BloodPressure::new(120, 80));
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let repo = InMemoryRepository::new();
        let a = repo.add(new_patient()).unwrap();
        let b = repo.add(new_patient()).unwrap();
        assert_ne!(a, b);
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_missing_patient() {
        let repo = InMemoryRepository::new();
        match repo.get_by_id("nobody") {
            Err(StorageError::NotFound(id)) => assert_eq!(id, "nobody"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_update() {
        let repo = InMemoryRepository::new();
        let id = repo.add(new_patient()).unwrap();

        let mut profile = repo.get_by_id(&id).unwrap();
        profile.health.normal_temperature = dec!(37.0);
        repo.update(profile).unwrap();

        assert_eq!(repo.get_by_id(&id).unwrap().health().normal_temperature, dec!(37.0));
    }

    #[test]
    fn test_update_unknown_patient() {
        let repo = InMemoryRepository::new();
        let profile = new_patient().with_id("ghost");
        assert!(matches!(repo.update(profile), Err(StorageError::NotFound(_))));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_with_profiles_and_list() {
        let repo = InMemoryRepository::with_profiles(vec![
            new_patient().with_id("b"),
            new_patient().with_id("a"),
        ]);
        let ids: Vec<_> = repo
            .list()
            .unwrap()
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
