mod config;
mod errors;
mod llm_client;
mod models;
mod optimize;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::models::form::FileStore;
use crate::models::resume::ResumeDocument;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Load the base resume once; every optimization starts from this document
    let base_resume = load_base_resume(&config).await?;
    info!(
        "Base resume loaded from {} ({})",
        config.resume_path.display(),
        base_resume.name().unwrap_or("unnamed")
    );

    // Initialize the generative client — the credential lives here, server-side
    let llm = GeminiClient::new(config.gemini_api_url.clone(), config.gemini_api_key.clone());
    info!("Generative client initialized: {}", config.gemini_api_url);

    // Form-state persistence (file-backed by default)
    let form_store = Arc::new(FileStore::new(config.state_dir.clone()));

    // Build app state
    let state = AppState {
        llm,
        base_resume,
        form_store,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Reads and decodes the base resume document configured via `RESUME_PATH`.
async fn load_base_resume(config: &Config) -> Result<ResumeDocument> {
    let raw = tokio::fs::read_to_string(&config.resume_path)
        .await
        .with_context(|| {
            format!(
                "Failed to read base resume at {}",
                config.resume_path.display()
            )
        })?;

    let resume: ResumeDocument = serde_json::from_str(&raw).with_context(|| {
        format!(
            "Base resume at {} is not valid JSON",
            config.resume_path.display()
        )
    })?;

    Ok(resume)
}
