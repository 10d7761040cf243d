//! Axum route handlers for the Optimization API.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::form::{FormState, FORM_STATE_KEY};
use crate::models::resume::ResumeDocument;
use crate::optimize::{run_optimization, OptimizationRequest, OptimizationResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OptimizeApiRequest {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportCoverLetterRequest {
    pub cover_letter: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/optimize
///
/// Tailors the stored base resume to one job application. The whole action
/// fails on the first stage error; no partial result is ever returned.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeApiRequest>,
) -> Result<Json<OptimizationResult>, AppError> {
    let request = OptimizationRequest::new(
        request.company_name,
        request.role,
        request.job_description,
        state.base_resume.clone(),
    )?;

    info!(
        "Optimizing resume for role '{}' at '{}'",
        request.role, request.company_name
    );

    let result = run_optimization(&state.llm, &request).await?;

    info!(
        "Optimization complete: cover letter {} chars",
        result.cover_letter.as_deref().map(str::len).unwrap_or(0)
    );

    Ok(Json(result))
}

/// GET /api/v1/resume
///
/// Returns the stored base resume for side-by-side comparison in the UI.
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeDocument> {
    Json(state.base_resume.clone())
}

/// GET /api/v1/form
///
/// Loads the persisted form state; a fresh (empty) state when none was saved.
pub async fn handle_get_form(State(state): State<AppState>) -> Result<Json<FormState>, AppError> {
    let form = match state.form_store.load(FORM_STATE_KEY).await? {
        Some(raw) => FormState::from_stored(&raw)?,
        None => FormState::default(),
    };
    Ok(Json(form))
}

/// PUT /api/v1/form
///
/// Persists the form fields so a returning user finds them pre-filled.
/// The server stamps `saved_at`; the client's value is ignored.
pub async fn handle_put_form(
    State(state): State<AppState>,
    Json(mut form): Json<FormState>,
) -> Result<Json<FormState>, AppError> {
    form.saved_at = Some(Utc::now());
    state
        .form_store
        .save(FORM_STATE_KEY, &form.to_stored()?)
        .await?;
    Ok(Json(form))
}

/// POST /api/v1/export/resume
///
/// Renders a resume document as a downloadable `optimized-resume.json`.
pub async fn handle_export_resume(
    Json(resume): Json<ResumeDocument>,
) -> Result<(HeaderMap, String), AppError> {
    let body = serde_json::to_string_pretty(&resume)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to render resume export: {e}")))?;
    Ok((
        attachment_headers("application/json", "optimized-resume.json"),
        body,
    ))
}

/// POST /api/v1/export/cover-letter
///
/// Renders cover-letter text as a downloadable `cover-letter.txt`.
pub async fn handle_export_cover_letter(
    Json(request): Json<ExportCoverLetterRequest>,
) -> (HeaderMap, String) {
    (
        attachment_headers("text/plain; charset=utf-8", "cover-letter.txt"),
        request.cover_letter,
    )
}

fn attachment_headers(content_type: &'static str, filename: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    // Filenames are fixed constants, always valid header values.
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
            .expect("static filename"),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::GeminiClient;
    use crate::models::form::MemoryStore;
    use crate::routes::build_router;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn spawn_gemini_stub(reply_text: &str) -> String {
        let text = reply_text.to_string();
        let router = Router::new().route(
            "/generate",
            post(move || {
                let text = text.clone();
                async move {
                    Json(json!({
                        "candidates": [{"content": {"parts": [{"text": text}]}}]
                    }))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{addr}/generate")
    }

    fn test_state(endpoint: String) -> AppState {
        AppState {
            llm: GeminiClient::new(endpoint, "test-key".to_string()),
            base_resume: ResumeDocument(json!({
                "name": "Jane Doe",
                "title": "Dev",
                "profile": "Builds things.",
                "work_experience": []
            })),
            form_store: Arc::new(MemoryStore::default()),
        }
    }

    // Endpoint that refuses connections immediately; used where no outbound
    // call is expected to happen at all.
    fn dead_endpoint() -> String {
        "http://127.0.0.1:9/generate".to_string()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_optimize_end_to_end_with_stubbed_transport() {
        let reply = r#"{"resume":{"name":"Jane Doe","title":"Engineer"},"coverLetter":"Dear Acme, I build things."}"#;
        let endpoint = spawn_gemini_stub(reply).await;
        let app = build_router(test_state(endpoint));

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/optimize",
                json!({
                    "company_name": "Acme",
                    "role": "Engineer",
                    "job_description": "Build things"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["coverLetter"].as_str().unwrap().starts_with("Dear Acme,"));
        assert_eq!(body["resume"]["name"], "Jane Doe");
        assert_eq!(body["resume"]["title"], "Engineer");
    }

    #[tokio::test]
    async fn test_optimize_rejects_empty_fields_before_transport() {
        let app = build_router(test_state(dead_endpoint()));

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/optimize",
                json!({"company_name": "", "role": "Engineer", "job_description": "Build things"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_optimize_with_unusable_model_output_fails_whole() {
        let endpoint = spawn_gemini_stub("I am sorry, I cannot do that.").await;
        let app = build_router(test_state(endpoint));

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/optimize",
                json!({
                    "company_name": "Acme",
                    "role": "Engineer",
                    "job_description": "Build things"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "OPTIMIZATION_ERROR");
    }

    #[tokio::test]
    async fn test_get_resume_returns_base_document() {
        let app = build_router(test_state(dead_endpoint()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/resume")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["name"], "Jane Doe");
    }

    #[tokio::test]
    async fn test_form_round_trip() {
        let state = test_state(dead_endpoint());

        let put = build_router(state.clone())
            .oneshot(json_request(
                "PUT",
                "/api/v1/form",
                json!({
                    "company_name": "Acme",
                    "role": "Engineer",
                    "job_description": "Build things"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(put.status(), StatusCode::OK);
        assert!(body_json(put).await["saved_at"].is_string());

        let get = build_router(state)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/form")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(get.status(), StatusCode::OK);
        let body = body_json(get).await;
        assert_eq!(body["company_name"], "Acme");
        assert_eq!(body["role"], "Engineer");
    }

    #[tokio::test]
    async fn test_get_form_defaults_when_unsaved() {
        let app = build_router(test_state(dead_endpoint()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/form")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["company_name"], "");
        assert!(body["saved_at"].is_null());
    }

    #[tokio::test]
    async fn test_export_resume_is_attachment() {
        let app = build_router(test_state(dead_endpoint()));

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/export/resume",
                json!({"name": "Jane Doe"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"optimized-resume.json\""
        );
        let body = body_json(response).await;
        assert_eq!(body["name"], "Jane Doe");
    }

    #[tokio::test]
    async fn test_export_cover_letter_is_attachment() {
        let app = build_router(test_state(dead_endpoint()));

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/export/cover-letter",
                json!({"cover_letter": "Dear Acme,\nhello"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"cover-letter.txt\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], &b"Dear Acme,\nhello"[..]);
    }
}
