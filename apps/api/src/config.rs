use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::llm_client::DEFAULT_GEMINI_URL;

/// Application configuration loaded from environment variables.
/// The provider credential is the only required variable; it is never
/// embedded in source or shipped to a client-distributed artifact.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_url: String,
    pub resume_path: PathBuf,
    pub state_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_api_url: std::env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_URL.to_string()),
            resume_path: std::env::var("RESUME_PATH")
                .unwrap_or_else(|_| "data/resume.json".to_string())
                .into(),
            state_dir: std::env::var("STATE_DIR")
                .unwrap_or_else(|_| "data/state".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
