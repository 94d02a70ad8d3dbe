//! Vitals Monitor API Server
//!
//! REST API for registering patients and submitting vital-sign observations.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
mod error;
pub mod rate_limit;
mod routes;

pub use crate::config::{AlertTransport, AppConfig};
pub use error::{ApiError, StartupError};

use alerting::{AlertSender, LogAlertSender, MqttAlertSender, NoopAlertSender};
use monitoring::MedicalService;
use patient_store::{InMemoryRepository, JsonFileRepository, PatientStore};

/// Service over the shared store and the configured alert transport
pub type Monitor = MedicalService<Arc<dyn PatientStore>, Arc<dyn AlertSender>>;

/// Application state shared across handlers
pub struct AppState {
    /// Patient repository
    pub store: Arc<dyn PatientStore>,
    /// Vital-sign checks
    pub monitor: Monitor,
    /// Prometheus exporter handle, if a recorder is installed
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<dyn PatientStore>, alerts: Arc<dyn AlertSender>) -> Self {
        Self {
            monitor: MedicalService::new(store.clone(), alerts),
            store,
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Build state from configuration. Must run inside a Tokio runtime when MQTT is selected.
    pub fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let store: Arc<dyn PatientStore> = match &config.storage.patients_file {
            Some(path) => Arc::new(JsonFileRepository::open(path)?),
            None => Arc::new(InMemoryRepository::new()),
        };

        let alerts: Arc<dyn AlertSender> = match config.alerts.transport {
            AlertTransport::Log => Arc::new(LogAlertSender::new()),
            AlertTransport::Mqtt => Arc::new(MqttAlertSender::connect(config.alerts.mqtt.clone())?),
            AlertTransport::Noop => Arc::new(NoopAlertSender),
        };

        Ok(Self::new(store, alerts))
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub patient_count: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route(
            "/api/v1/patients",
            get(routes::patients::list_patients).post(routes::patients::create_patient),
        )
        .route(
            "/api/v1/patients/:id",
            get(routes::patients::get_patient).put(routes::patients::update_patient),
        )
        .route(
            "/api/v1/patients/:id/blood-pressure",
            post(routes::checks::check_blood_pressure),
        )
        .route(
            "/api/v1/patients/:id/temperature",
            post(routes::checks::check_temperature),
        )
        .route(
            "/api/v1/patients/:id/observations",
            post(routes::checks::check_observation),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        patient_count: state.store.list().map(|p| p.len()).unwrap_or(0),
    })
}

/// Prometheus scrape endpoint
async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, String::new()),
    }
}

/// Initialize logging
pub fn init_logging(level: &str, json: bool) -> Result<(), StartupError> {
    let level = Level::from_str(level).map_err(|e| StartupError::Logging(e.to_string()))?;
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| StartupError::Logging(e.to_string()))
}

/// Run the server
pub async fn run_server(config: AppConfig) -> Result<(), StartupError> {
    let governor = create_governor(&config)?;
    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| StartupError::Metrics(e.to_string()))?;

    let state = Arc::new(AppState::from_config(&config)?.with_metrics(metrics));
    let app = create_router(state).layer(GovernorLayer { config: governor });

    info!("Starting API server on {}", config.server.addr);

    let listener = tokio::net::TcpListener::bind(config.server.addr.as_str()).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn create_governor(
    config: &AppConfig,
) -> Result<Arc<rate_limit::DefaultGovernorConfig>, StartupError> {
    rate_limit::create_governor_config(&config.rate_limit).ok_or(StartupError::RateLimit)
}
