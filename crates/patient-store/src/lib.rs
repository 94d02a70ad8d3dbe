//! Patient Storage
//!
//! Lookup of patient profiles by identifier, with an in-memory repository and a
//! JSON file repository.

mod file;
mod repository;

pub use file::JsonFileRepository;
pub use repository::InMemoryRepository;

use std::sync::Arc;
use thiserror::Error;
use vitals::{NewPatient, PatientProfile};

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Patient not found: {0}")]
    NotFound(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Read access to patient profiles
pub trait PatientLookup: Send + Sync {
    /// Fetch a profile by identifier. Unknown identifiers yield `StorageError::NotFound`.
    fn get_by_id(&self, id: &str) -> Result<PatientProfile, StorageError>;
}

/// Write access to patient profiles
pub trait PatientStore: PatientLookup {
    /// Store a new patient and return the assigned identifier
    fn add(&self, patient: NewPatient) -> Result<String, StorageError>;

    /// Replace an existing profile
    fn update(&self, profile: PatientProfile) -> Result<(), StorageError>;

    /// All stored profiles
    fn list(&self) -> Result<Vec<PatientProfile>, StorageError>;
}

impl<T: PatientLookup + ?Sized> PatientLookup for Arc<T> {
    fn get_by_id(&self, id: &str) -> Result<PatientProfile, StorageError> {
        (**self).get_by_id(id)
    }
}

impl<T: PatientStore + ?Sized> PatientStore for Arc<T> {
    fn add(&self, patient: NewPatient) -> Result<String, StorageError> {
        (**self).add(patient)
    }

    fn update(&self, profile: PatientProfile) -> Result<(), StorageError> {
        (**self).update(profile)
    }

    fn list(&self) -> Result<Vec<PatientProfile>, StorageError> {
        (**self).list()
    }
}

fn new_patient_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
