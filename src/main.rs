use std::process::ExitCode;
use steel_solver::api::{self, AppState};
use steel_solver::config::ServerConfig;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = ServerConfig::from_env();
    info!(
        "convergence check: {}; population {}, {} generations, seed {}",
        config.convergence,
        config.run_defaults.population_size,
        config.run_defaults.generation_count,
        config.run_defaults.seed
    );

    let app = api::router(AppState::from(&config));
    let listener = match tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {}:{}: {err}", config.host, config.port);
            return ExitCode::FAILURE;
        }
    };
    match listener.local_addr() {
        Ok(addr) => info!("steel-solver listening on http://{addr}"),
        Err(_) => info!("steel-solver listening on port {}", config.port),
    }

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server exited unexpectedly: {err}");
        return ExitCode::FAILURE;
    }
    info!("server stopped");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to install ctrl-c handler: {err}");
        std::future::pending::<()>().await;
    }
}
