//! Vital-Sign Monitoring
//!
//! Looks up a patient's baseline, evaluates a new observation against it and sends
//! an alert when the observation is abnormal.

mod service;

pub use service::{alert_message, CheckOutcome, MedicalService};

use alerting::AlertError;
use patient_store::StorageError;
use thiserror::Error;

/// Errors raised by the collaborators of a check, passed through as-is
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error(transparent)]
    Lookup(#[from] StorageError),

    #[error(transparent)]
    Delivery(#[from] AlertError),
}
