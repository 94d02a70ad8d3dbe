//! API Error Types

use alerting::AlertError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use monitoring::MonitorError;
use patient_store::StorageError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors that stop the service from starting
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Patient storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Alert transport error: {0}")]
    Alerts(#[from] AlertError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Metrics exporter setup failed: {0}")]
    Metrics(String),

    #[error("Invalid rate limit configuration")]
    RateLimit,

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned from request handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Monitor(#[from] MonitorError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

fn storage_status(err: &StorageError) -> StatusCode {
    match err {
        StorageError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Monitor(MonitorError::Lookup(e)) | ApiError::Storage(e) => storage_status(e),
            ApiError::Monitor(MonitorError::Delivery(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
