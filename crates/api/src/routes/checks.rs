//! Vital-Sign Check Routes

use axum::{
    extract::{Path, State},
    Json,
};
use metrics::counter;
use monitoring::CheckOutcome;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use vitals::{BloodPressure, Decimal, Observation, VitalKind};

use crate::{ApiError, AppState};

/// Temperature request body
#[derive(Debug, Deserialize)]
pub struct TemperatureBody {
    pub value: Decimal,
}

/// Response for every check endpoint
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub patient_id: String,
    pub vital: VitalKind,
    pub outcome: CheckOutcome,
}

/// Check a blood pressure reading
pub async fn check_blood_pressure(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
    Json(reading): Json<BloodPressure>,
) -> Result<Json<CheckResponse>, ApiError> {
    run_check(&state, patient_id, Observation::from(reading))
}

/// Check a temperature reading
pub async fn check_temperature(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
    Json(body): Json<TemperatureBody>,
) -> Result<Json<CheckResponse>, ApiError> {
    run_check(&state, patient_id, Observation::temperature(body.value))
}

/// Check an observation of any kind
pub async fn check_observation(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
    Json(observation): Json<Observation>,
) -> Result<Json<CheckResponse>, ApiError> {
    run_check(&state, patient_id, observation)
}

fn run_check(
    state: &AppState,
    patient_id: String,
    observation: Observation,
) -> Result<Json<CheckResponse>, ApiError> {
    let vital = observation.kind();
    match state.monitor.check(&patient_id, &observation) {
        Ok(outcome) => {
            counter!(
                "vitals_checks_total",
                "vital" => vital.as_str(),
                "outcome" => outcome.as_str()
            )
            .increment(1);
            Ok(Json(CheckResponse {
                patient_id,
                vital,
                outcome,
            }))
        }
        Err(e) => {
            counter!("vitals_check_errors_total", "vital" => vital.as_str()).increment(1);
            Err(e.into())
        }
    }
}
