use std::process::ExitCode;
use std::sync::Arc;

use authpages::api::{ApiError, HttpAuthApi};
use authpages::config::{AppConfig, ConfigError};
use authpages::{routes, state};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("server io failed: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; real env vars still apply.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "authpages failed to start");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;
    let api = HttpAuthApi::new(&config)?;
    let state = state::AppState::new(Arc::new(api));

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    tracing::info!(port = config.port, endpoint = %config.server_endpoint, "authpages listening");
    axum::serve(listener, app).await?;
    Ok(())
}
