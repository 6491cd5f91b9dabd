//! chatrelay -- HTTP relay between chat clients and an LLM completion service.

mod cli;
mod http;
mod state;

use clap::Parser;

use chatrelay_infra::config::load_relay_config;
use chatrelay_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_directive(), cli.otel).map_err(|e| anyhow::anyhow!(e))?;

    let result = run(cli).await;

    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            let (config, api_key) = load_relay_config(cli.config.as_deref())
                .await?
                .into_parts()?;

            tracing::info!(
                model = %config.model,
                base_url = %config.base_url,
                timeout_secs = config.timeout_secs,
                persistence = config.persistence_enabled(),
                origins = ?config.allowed_origins,
                "Relay configured"
            );

            let state = AppState::init(config, api_key).await?;
            let app = http::router::build_router(state);

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(%addr, "Listening");

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            tracing::info!("Server stopped");
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
