// Shared prompt fragments. Each service that needs generative calls defines
// its own prompts.rs alongside it; this file holds the cross-cutting pieces.

/// Output-contract fragment appended to prompts that must come back as JSON.
pub const JSON_ONLY_CONTRACT: &str = "\
    Respond with a single JSON object and nothing else. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies outside the JSON object.";
