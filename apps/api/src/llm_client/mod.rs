/// Gemini Client — the single point of entry for all generative-API calls in Tailor.
///
/// ARCHITECTURAL RULE: No other module may call the provider directly.
/// The credential lives here, server-side; it must never reach a
/// browser-executed bundle.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// Default generateContent endpoint. Override with `GEMINI_API_URL`
/// (tests point this at a local stub).
pub const DEFAULT_GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Failure taxonomy for one optimization pass. Every stage failure aborts
/// the whole operation; nothing is retried or recovered internally.
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// Connection-level failure before any status line was read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status. The body is not parsed.
    #[error("Generative API error (status {status}): {message}")]
    Transport { status: u16, message: String },

    /// Envelope decoded but carried no generated text fragment.
    #[error("Generative API returned no text")]
    EmptyResponse,

    /// Generated text contained no brace-delimited span to extract.
    #[error("No JSON object found in generated text")]
    UnparsableResponse,

    /// A span was found but is not a valid optimization result.
    #[error("Generated JSON is malformed: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

// Request envelope — dictated by the provider's API: an ordered list of
// contents, each an ordered list of parts, each a text fragment.

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

// Response envelope. Every level defaults so a sparse or odd body degrades
// to "no text" instead of a decode failure.

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// The first generated text fragment: `candidates[0].content.parts[0].text`.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

/// The single generative client used by all services in Tailor.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            api_key,
        }
    }

    /// Sends one prompt and returns the decoded response envelope.
    ///
    /// Exactly one outbound call per invocation — no retry. A non-success
    /// status fails with `Transport` carrying the status description; the
    /// body is never read in that case.
    pub async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse, OptimizeError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OptimizeError::Transport {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        let envelope: GenerateContentResponse = response.json().await?;

        debug!(
            "Generative call succeeded: {} candidate(s)",
            envelope.candidates.len()
        );

        Ok(envelope)
    }
}
