use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::sync::Arc;
use tokengate::application::bootstrap::SessionBootstrapper;
use tokengate::application::engine::BalanceGate;
use tokengate::application::enricher::DetailEnricher;
use tokengate::config::{Config, LogFormat};
use tokengate::domain::ledger::Ledger;
use tokengate::infrastructure::in_memory::RecordingPayoutProcessor;
use tokengate::infrastructure::upstream::UpstreamClient;
use tokengate::interfaces::http;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config);

    let upstream = UpstreamClient::new(config.upstream()).into_diagnostic()?;
    let profile = config.session_profile().into_diagnostic()?;

    let bootstrapper = SessionBootstrapper::new(Box::new(upstream.clone()), profile)
        .with_settle_delay(config.settle_delay())
        .with_retry_after(config.bootstrap_retry());
    let ledger = Arc::new(Ledger::new(config.initial_balance));
    let gate = BalanceGate::new(
        config.auth_token.clone(),
        bootstrapper,
        ledger,
        Box::new(upstream.clone()),
        DetailEnricher::new(Box::new(upstream)),
        Box::new(RecordingPayoutProcessor::new()),
    );

    let app = http::router(Arc::new(gate));
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .into_diagnostic()?;

    tracing::info!(
        bind = %config.bind,
        initial_balance = config.initial_balance,
        "Server starting"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .into_diagnostic()?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.log_format {
        LogFormat::Json => subscriber.with(fmt::layer().json().with_target(true)).init(),
        LogFormat::Pretty => subscriber.with(fmt::layer().with_target(true)).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
