use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use registry_core::{
    CoreConfig, PatientService, config::patient_data_file_from_env_value,
};

/// Main entry point for the patient registry
///
/// Resolves configuration once, then serves the REST API until interrupted.
///
/// # Environment Variables
/// - `REGISTRY_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PATIENT_DATA_FILE`: JSON file holding the patient collection
///   (default: "patient_data/patients.json")
/// - `RUST_LOG`: tracing filter, on top of the default `info` level for the registry crates
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, binding or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("registry_run=info".parse()?)
                .add_directive("registry_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr: SocketAddr = std::env::var("REGISTRY_REST_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".into())
        .parse()?;

    let data_file: PathBuf =
        patient_data_file_from_env_value(std::env::var("PATIENT_DATA_FILE").ok());
    let cfg = CoreConfig::new(data_file)?;

    tracing::info!("++ Patient data file {}", cfg.patient_data_file().display());
    tracing::info!("++ Starting registry REST on {}", rest_addr);

    let app = router(AppState {
        patient_service: PatientService::from_config(&cfg),
    });

    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Registry REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
