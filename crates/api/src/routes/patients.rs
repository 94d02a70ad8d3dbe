//! Patient Routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use patient_store::{PatientLookup, PatientStore};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use vitals::{NewPatient, PatientProfile};

use super::blocking;
use crate::{ApiError, AppState};

/// Response for patient creation
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Response for patient listing
#[derive(Debug, Serialize)]
pub struct PatientListResponse {
    pub data: Vec<PatientProfile>,
    pub count: usize,
}

/// Register a patient and their baseline
pub async fn create_patient(
    State(state): State<Arc<AppState>>,
    Json(patient): Json<NewPatient>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id = blocking(&state, move |state| Ok(state.store.add(patient)?)).await?;
    info!("Registered patient {}", id);
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Get a single patient
pub async fn get_patient(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PatientProfile>, ApiError> {
    Ok(Json(state.store.get_by_id(&id)?))
}

/// Replace the record of an existing patient
pub async fn update_patient(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patient): Json<NewPatient>,
) -> Result<Json<PatientProfile>, ApiError> {
    let profile = patient.with_id(id);
    let stored = profile.clone();
    blocking(&state, move |state| Ok(state.store.update(profile)?)).await?;
    info!("Updated patient {}", stored.id());
    Ok(Json(stored))
}

/// List all patients
pub async fn list_patients(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PatientListResponse>, ApiError> {
    let data = state.store.list()?;
    Ok(Json(PatientListResponse {
        count: data.len(),
        data,
    }))
}
