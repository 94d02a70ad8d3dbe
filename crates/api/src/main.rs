//! Vitals Monitor - Main Entry Point

use api::{init_logging, run_server, AppConfig};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var_os("VITALS_CONFIG").map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    init_logging(&config.log_level, config.log_json)?;

    info!("=== Vitals Monitor v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Alert transport: {:?}, patient file: {:?}",
        config.alerts.transport, config.storage.patients_file
    );

    run_server(config).await?;

    Ok(())
}
