mod config;
mod errors;
mod export;
mod extract;
mod generation;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;
mod view;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{FileStorage, VersionStore};
use crate::view::ViewState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Tailor v{}", env!("CARGO_PKG_VERSION"));

    // Rehydrate the version store from its storage slot
    let storage = FileStorage::new(&config.data_dir);
    info!("Snapshot slot: {}", storage.path().display());
    let store = VersionStore::open(storage).into_shared();

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_base_url.clone());
    info!("LLM client initialized (endpoint: {})", config.openai_base_url);

    // Build app state
    let state = AppState {
        store,
        view: Arc::new(Mutex::new(ViewState::default())),
        backend: Arc::new(llm),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("127.0.0.1:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
