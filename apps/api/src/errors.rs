use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::OptimizeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Optimization error: {0}")]
    Optimize(#[from] OptimizeError),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Optimize(e) => {
                tracing::error!("Optimization error: {e}");
                let status = match e {
                    OptimizeError::Http(_) | OptimizeError::Transport { .. } => {
                        StatusCode::BAD_GATEWAY
                    }
                    OptimizeError::EmptyResponse
                    | OptimizeError::UnparsableResponse
                    | OptimizeError::MalformedJson(_) => StatusCode::UNPROCESSABLE_ENTITY,
                };
                (status, "OPTIMIZATION_ERROR", e.to_string())
            }
            AppError::Store(msg) => {
                tracing::error!("Store error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "A persistence error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
