use std::sync::Arc;

use anyhow::Context;

use storeroom_infra::AppConfig;
use storeroom_observability::LogFormat;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();

    let config = AppConfig::load().context("failed to load configuration")?;

    storeroom_observability::init_with(
        &config.telemetry.log_level,
        LogFormat::from_json_flag(config.telemetry.json),
    );

    let services = storeroom_api::app::services::build_services(&config.database)
        .await
        .context("failed to initialize product store")?;
    tracing::info!(store = services.backend_name(), "product store ready");

    let app = storeroom_api::app::build_app(Arc::new(services), &config.cors);

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr()))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
