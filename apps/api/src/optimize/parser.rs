//! Response parsing — turns the provider envelope's free-form reply into a
//! structured `OptimizationResult`.

use crate::llm_client::{GenerateContentResponse, OptimizeError};
use crate::optimize::OptimizationResult;

/// Extracts and validates an `OptimizationResult` from a decoded envelope.
///
/// The generated text may wrap the JSON payload in conversational prose, so
/// the candidate document is the span between the first `{` and the last `}`.
/// This is a heuristic, not a parser: it tolerates preamble and postamble but
/// will mis-slice replies containing multiple JSON-like blocks. Strengthening
/// it (e.g. a balanced-brace scan) would not change the public contract.
pub fn parse_optimization(
    response: &GenerateContentResponse,
) -> Result<OptimizationResult, OptimizeError> {
    let text = response.text().ok_or(OptimizeError::EmptyResponse)?;
    let span = extract_json_span(text).ok_or(OptimizeError::UnparsableResponse)?;
    Ok(serde_json::from_str(span)?)
}

/// Greedy first-`{`/last-`}` span, or `None` when no such span exists.
fn extract_json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
