//! Decoding model output into a validated [`ScoreResult`].
//!
//! Small local models wrap their JSON in markdown fences or prose, and emit
//! `fit_score` in several shapes. The decoder tolerates the wrapping and the
//! shape drift, but a score that cannot be normalized into `1..=10` fails the
//! listing rather than defaulting.

use serde::Deserialize;
use serde_json::Value;

use jobscout_shared::{JobScoutError, Result, ScoreResult};

/// Raw record as the model emits it, before normalization.
#[derive(Debug, Deserialize)]
struct RawScore {
    fit_score: Value,
    is_backend: bool,
    is_remote: bool,
    #[serde(default)]
    salary_estimate: Option<String>,
    summary: String,
    match_reason: String,
    concerns: String,
}

/// Decode one model response into a validated score.
pub fn parse_score(raw: &str) -> Result<ScoreResult> {
    let body = extract_json_object(raw)?;

    let record: RawScore = serde_json::from_str(body).map_err(|e| {
        JobScoutError::score(format!(
            "model output is not a score record: {e}; output starts: {:?}",
            excerpt(raw)
        ))
    })?;

    let fit_score = normalize_fit_score(&record.fit_score)?;

    Ok(ScoreResult {
        fit_score,
        is_backend: record.is_backend,
        is_remote: record.is_remote,
        salary_estimate: normalize_salary(record.salary_estimate),
        summary: record.summary,
        match_reason: record.match_reason,
        concerns: record.concerns,
    })
}

/// Slice the outermost `{ … }` out of the response, stripping any markdown
/// fences around it. Prose before or after the object is ignored.
fn extract_json_object(raw: &str) -> Result<&str> {
    let text = raw.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);

    let start = text.find('{').ok_or_else(|| {
        JobScoutError::score(format!(
            "no JSON object in model output; output starts: {:?}",
            excerpt(raw)
        ))
    })?;
    let end = text
        .rfind('}')
        .ok_or_else(|| JobScoutError::score("unterminated JSON object in model output"))?;

    if end < start {
        return Err(JobScoutError::score("malformed JSON object in model output"));
    }

    Ok(&text[start..=end])
}

/// Accepts an integer, a float (round half up), or a string like `"8/10"` or
/// `"7.5"`. The result must land in `1..=10`.
fn normalize_fit_score(value: &Value) -> Result<u8> {
    let scored = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(f) = n.as_f64() {
                round_half_up(f)
            } else {
                return Err(JobScoutError::score(format!("unusable fit_score: {n}")));
            }
        }
        Value::String(s) => {
            let lead = s.split('/').next().unwrap_or("").trim();
            let parsed: f64 = lead
                .parse()
                .map_err(|_| JobScoutError::score(format!("unusable fit_score: {s:?}")))?;
            round_half_up(parsed)
        }
        other => {
            return Err(JobScoutError::score(format!(
                "fit_score has unexpected type: {other}"
            )));
        }
    };

    u8::try_from(scored)
        .ok()
        .filter(|s| (1..=10).contains(s))
        .ok_or_else(|| JobScoutError::score(format!("fit_score {scored} outside 1..=10")))
}

/// Leading slice of the raw output for error messages.
fn excerpt(text: &str) -> &str {
    match text.char_indices().nth(120) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Models render "no salary" several ways; fold them all into `None`.
fn normalize_salary(salary: Option<String>) -> Option<String> {
    let s = salary?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.to_lowercase().as_str() {
        "null" | "none" | "n/a" | "not listed" | "not specified" | "unknown" => None,
        _ => Some(trimmed.to_string()),
    }
}
