//! Resume Optimization — the request/response protocol core.
//!
//! Flow: build prompt → one generative call → parse the reply.
//! Any stage failure aborts the whole operation; there is no partial result,
//! no retry, and no caching. Concurrent in-flight requests are the caller's
//! concern to prevent.

pub mod handlers;
pub mod parser;
pub mod prompts;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::{GeminiClient, OptimizeError};
use crate::models::resume::ResumeDocument;

/// Immutable inputs for one optimization pass. Constructed fresh per
/// user-initiated action and discarded after use.
#[derive(Debug, Clone)]
pub struct OptimizationRequest {
    pub company_name: String,
    pub role: String,
    pub job_description: String,
    pub base_resume: ResumeDocument,
}

impl OptimizationRequest {
    /// All four fields are required; no optimization is attempted otherwise.
    pub fn new(
        company_name: String,
        role: String,
        job_description: String,
        base_resume: ResumeDocument,
    ) -> Result<Self, AppError> {
        if company_name.trim().is_empty() {
            return Err(AppError::Validation(
                "company_name cannot be empty".to_string(),
            ));
        }
        if role.trim().is_empty() {
            return Err(AppError::Validation("role cannot be empty".to_string()));
        }
        if job_description.trim().is_empty() {
            return Err(AppError::Validation(
                "job_description cannot be empty".to_string(),
            ));
        }
        if base_resume.is_empty() {
            return Err(AppError::Validation(
                "base resume document is empty".to_string(),
            ));
        }

        Ok(Self {
            company_name,
            role,
            job_description,
            base_resume,
        })
    }
}

/// Structured result extracted from the model reply.
///
/// Both keys are tolerated missing (`resume` stays JSON null, `cover_letter`
/// stays `None`) — downstream rendering must be null-safe. A key present with
/// the wrong JSON type fails deserialization, and the operation as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    #[serde(default)]
    pub resume: ResumeDocument,
    #[serde(default, rename = "coverLetter")]
    pub cover_letter: Option<String>,
}

/// Runs the protocol core in strict sequence. The first failing stage
/// surfaces its error unmodified.
pub async fn run_optimization(
    llm: &GeminiClient,
    request: &OptimizationRequest,
) -> Result<OptimizationResult, OptimizeError> {
    let prompt = prompts::build_optimize_prompt(request)?;
    let envelope = llm.generate(&prompt).await?;
    parser::parse_optimization(&envelope)
}
