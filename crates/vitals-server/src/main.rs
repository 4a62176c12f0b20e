//! vitals diagnostic server.
//!
//! - Config: defaults -> YAML file -> `.env` -> process environment
//! - Routes: `/`, `/health`, `/ready`, `/actuator/health`, `/items/{id}`,
//!   `/metrics`, `/env`, `/info`
//! - Every response carries `X-Process-Time` and `X-Request-Count`

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vitals_server::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    // Real environment wins over .env files.
    dotenv_flow::dotenv_flow().ok();

    let cfg = match config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("config load failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.log_filter())))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let host = cfg.host.clone();
    let port = cfg.port;
    let state = AppState::new(cfg);
    let app = router::build_router(state.clone());

    let listener = match tokio::net::TcpListener::bind((host.as_str(), port)).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%host, port, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    let cfg = state.cfg();
    tracing::info!(%host, port, app = %cfg.app_name, version = %cfg.app_version, "vitals-server starting");
    tracing::info!("health check available at http://{host}:{port}/health");
    tracing::info!("readiness check available at http://{host}:{port}/ready");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
