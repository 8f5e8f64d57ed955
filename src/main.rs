use anyhow::Result;
use gas_forecast::{
    config::Config,
    handlers::{router, AppState, HealthState},
    services::{artifacts, EtherscanClient, GasForecaster},
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Starting gas-forecast v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {:?}", config.environment);

    // Fitted artifacts are loaded once and shared read-only
    let engine = artifacts::load_engine(&config.scaler_path, &config.model_path)?;

    let telemetry = Arc::new(EtherscanClient::new(
        &config.etherscan_api_url,
        &config.etherscan_api_key,
        config.chain_id,
        config.upstream_timeout(),
    )?);

    let app_state = AppState {
        forecaster: GasForecaster::new(telemetry, engine.clone()),
    };

    let health_state = HealthState {
        engine,
        started_at: Instant::now(),
    };

    let app = router(app_state, health_state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Prediction: http://{}/predict", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl+c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down gracefully...");
}
