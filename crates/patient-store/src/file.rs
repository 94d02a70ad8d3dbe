//! JSON File Repository
//!
//! Keeps every profile in memory and rewrites the whole file after each change.
//! Writes block the calling thread while holding the store lock, so async callers
//! should run them on a blocking pool.

use crate::{new_patient_id, PatientLookup, PatientStore, StorageError};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};
use vitals::{NewPatient, PatientProfile};

/// Patient repository backed by a JSON array on disk
pub struct JsonFileRepository {
    path: PathBuf,
    patients: Mutex<HashMap<String, PatientProfile>>,
}

impl JsonFileRepository {
    /// Open the file at `path`, starting empty if it does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let patients = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let profiles: Vec<PatientProfile> = serde_json::from_str(&contents)
                .map_err(|e| StorageError::SerializationError(e.to_string()))?;
            let mut patients = HashMap::with_capacity(profiles.len());
            for profile in profiles {
                let id = profile.id().to_string();
                if patients.insert(id.clone(), profile).is_some() {
                    return Err(StorageError::SerializationError(format!(
                        "Duplicate patient id: {}",
                        id
                    )));
                }
            }
            patients
        } else {
            HashMap::new()
        };

        info!(
            "Opened patient file {} ({} patients)",
            path.display(),
            patients.len()
        );

        Ok(Self {
            path,
            patients: Mutex::new(patients),
        })
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, PatientProfile>>, StorageError> {
        self.patients
            .lock()
            .map_err(|e| StorageError::Backend(format!("Lock error: {}", e)))
    }

    /// Write all profiles to a temporary sibling file, then move it into place
    fn persist(&self, patients: &HashMap<String, PatientProfile>) -> Result<(), StorageError> {
        let mut profiles: Vec<_> = patients.values().collect();
        profiles.sort_by(|a, b| a.id().cmp(b.id()));

        let json = serde_json::to_string_pretty(&profiles)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        debug!("Persisted {} patients to {}", profiles.len(), self.path.display());
        Ok(())
    }
}

impl PatientLookup for JsonFileRepository {
    fn get_by_id(&self, id: &str) -> Result<PatientProfile, StorageError> {
        let patients = self.lock()?;
        patients
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }
}

impl PatientStore for JsonFileRepository {
    fn add(&self, patient: NewPatient) -> Result<String, StorageError> {
        let id = new_patient_id();
        let mut patients = self.lock()?;
        patients.insert(id.clone(), patient.with_id(id.clone()));

        if let Err(e) = self.persist(&patients) {
            patients.remove(&id);
            return Err(e);
        }
        Ok(id)
    }

    fn update(&self, profile: PatientProfile) -> Result<(), StorageError> {
        let mut patients = self.lock()?;
        let id = profile.id().to_string();
        let previous = match patients.get_mut(&id) {
            Some(existing) => std::mem::replace(existing, profile),
            None => return Err(StorageError::NotFound(id)),
        };

        if let Err(e) = self.persist(&patients) {
            patients.insert(id, previous);
            return Err(e);
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<PatientProfile>, StorageError> {
        let patients = self.lock()?;
        let mut all: Vec<_> = patients.values().cloned().collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(all)
    }
}
