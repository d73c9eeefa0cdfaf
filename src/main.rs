mod apidoc;
mod classify;
mod config;
mod deploy;
mod handlers;
mod models;
mod routes;
mod services;
mod usage;
mod utils;

use std::sync::Arc;

use config::{Config, ConfigError};
use services::{
    llm::{CompletionService, GeminiClient},
    vercel::VercelDeployer,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn CompletionService>,
    pub deployer: Arc<VercelDeployer>,
}

#[derive(Debug, Error)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::from_env()?;
    let http = reqwest::Client::new();
    // Compute before moving config pieces anywhere
    let addr = format!("{}:{}", cfg.app_host, cfg.app_port);

    let deployer = VercelDeployer::new(cfg.vercel.clone(), http.clone()).inspect_err(|e| {
        tracing::error!("Deployment subsystem unavailable: {e}");
    })?;
    let llm = GeminiClient::new(cfg.gemini.clone(), http);

    let state = AppState {
        llm: Arc::new(llm),
        deployer: Arc::new(deployer),
    };

    let app = routes::router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!("API Forge listening on http://{addr}");
    axum::serve(listener, app).await.map_err(StartupError::Serve)
}
