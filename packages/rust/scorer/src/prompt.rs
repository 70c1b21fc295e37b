//! Prompt construction for resume-fit scoring.

use jobscout_shared::JobListing;

/// Descriptions beyond this add context-window cost without changing scores.
const DESCRIPTION_MAX_CHARS: usize = 2000;

/// Build the single scoring prompt for one listing.
///
/// The schema instruction is strict on purpose: the decoder tolerates prose
/// around the JSON object but requires every field to be present.
pub fn build_prompt(resume: &str, listing: &JobListing) -> String {
    let description = truncate_chars(&listing.description, DESCRIPTION_MAX_CHARS);
    let salary = listing.listed_salary.as_deref().unwrap_or("Not listed");

    format!(
        r#"You are a career advisor evaluating a job posting for a software engineer.

CANDIDATE RESUME:
{resume}

JOB POSTING:
Title: {title}
Source: {source}
Salary listed: {salary}
Description:
{description}

Evaluate this job for the candidate. Respond ONLY with a valid JSON object, no other text:
{{
  "fit_score": <integer 1-10, where 10 is perfect fit>,
  "is_backend": <true or false: is this a backend/systems engineering role?>,
  "is_remote": <true or false: is this explicitly remote?>,
  "salary_estimate": "<the listed salary range, or your best estimate, or null>",
  "summary": "<2 sentences: why this is or isn't a good fit for the candidate>",
  "match_reason": "<the single strongest reason this matches their background>",
  "concerns": "<the single biggest gap or concern, or 'None' if no concerns>"
}}"#,
        title = listing.stub.title,
        source = listing.stub.source.display_name(),
    )
}

/// Truncate at a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
