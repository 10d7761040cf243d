// All generative prompt constants for the Optimization module.
// Reuses the cross-cutting JSON contract from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_CONTRACT;
use crate::llm_client::OptimizeError;
use crate::optimize::OptimizationRequest;

/// Optimization prompt template.
/// Replace: `{company_name}`, `{role}`, `{jd_text}`, `{json_contract}`,
/// `{resume_json}`.
///
/// Values are substituted as-is, unescaped. The receiving model is expected
/// to handle arbitrary text, and escaping here would break the
/// verbatim-embedding contract.
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer optimizing a structured resume for applicant tracking systems (ATS).

I will give you my current resume as a JSON document, along with the application target:

Company Name: {company_name}

Target Role: {role}

Full Job Description:
{jd_text}

Your task:

1. Analyze the job description and extract the keywords, responsibilities, and values prioritized for the role.
2. Revise, rewrite, and reorganize the resume JSON to maximize ATS compatibility using industry-specific and JD-specific keywords.
3. Optimize section titles, summary, experiences, and skills for better ranking in automated systems and HR scans.
4. Keep the language natural but strategic, and the profile impactful, concise, and HR-friendly.

HARD RULES:
1. Preserve the word count of every point in every section — match the original counts as closely as possible.
2. Do NOT invent facts, employers, dates, or achievements that are not present in the resume JSON.
3. Every updated section must stay internally consistent with the candidate's background.
4. Output the revised resume formatted exactly like the original schema.
5. Also write a professional cover letter for this application.

{json_contract}

The JSON object must have exactly two top-level keys:
{
  "resume": { /* the optimized resume, same schema as the input */ },
  "coverLetter": "/* the cover letter text */"
}

RESUME JSON:
{resume_json}"#;

/// Renders the optimization prompt for one request. Deterministic: the same
/// request always produces the same text. The resume is embedded as indented
/// JSON so the embedded rendering re-parses to the original document.
pub fn build_optimize_prompt(request: &OptimizationRequest) -> Result<String, OptimizeError> {
    let resume_json = serde_json::to_string_pretty(&request.base_resume)?;

    // Substitution order is fixed; the resume block is last in the template
    // so the document always lands after the final marker line.
    Ok(OPTIMIZE_PROMPT_TEMPLATE
        .replace("{company_name}", &request.company_name)
        .replace("{role}", &request.role)
        .replace("{jd_text}", &request.job_description)
        .replace("{json_contract}", JSON_ONLY_CONTRACT)
        .replace("{resume_json}", &resume_json))
}
