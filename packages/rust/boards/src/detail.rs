//! Detail-page fetching: turn a stub into a full listing.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use jobscout_shared::{JobListing, JobScoutError, JobStub, Result, Source};

use crate::browser::Browser;

/// Descriptions are capped here; anything longer adds nothing for scoring.
const DESCRIPTION_MAX_CHARS: usize = 3000;

/// Below this much usable text the page is a shell (login wall, JS stub)
/// and the fetch counts as a parse failure.
const DESCRIPTION_MIN_CHARS: usize = 150;

/// Phrases that mark a matched block as site chrome rather than the posting.
const NOISE_PHRASES: &[&str] = &[
    "learn the skills employers are hiring for",
    "related jobs",
    "sign in to apply",
    "create an account",
];

/// Generic content selectors, most to least specific.
const GENERIC_SELECTORS: &[&str] = &[
    ".job-description",
    "#job-description",
    "[class*='job-description']",
    "[class*='jobDescription']",
    "article",
    "main",
];

/// Board-specific selectors for the posting body, tried before the generic
/// list. These track each board's markup, not anything structural.
fn source_selectors(source: Source) -> &'static [&'static str] {
    match source {
        Source::WeWorkRemotely => &["#job-listing", ".listing-container", "section.job", "div.job"],
        Source::Remotive => &[".job-description", "[class*='JobDescription']", "article"],
        Source::Himalayas => &["[class*='description']", "[class*='JobDescription']", "article"],
        Source::WorkingNomads => &[".job-description", "article", "main"],
    }
}

/// Fetch the full description for one stub.
///
/// Navigates to the stub's URL and extracts the dominant text block, trying
/// the board's own selectors first. A timeout, non-2xx response, or a page
/// with no usable text all surface as [`JobScoutError::Fetch`] — the
/// coordinator owns the retry-once-then-skip policy, so there are no retries
/// here and never a listing with an empty description.
pub async fn fetch_detail(browser: &Browser, stub: &JobStub) -> Result<JobListing> {
    let page = browser.goto(&stub.url).await?;

    let mut selectors: Vec<&str> = source_selectors(stub.source).to_vec();
    selectors.extend_from_slice(GENERIC_SELECTORS);

    let text = page
        .dominant_text(&selectors, DESCRIPTION_MIN_CHARS, NOISE_PHRASES)
        .ok_or_else(|| {
            JobScoutError::fetch(stub.url.as_str(), "no job description text found on page")
        })?;

    debug!(url = %stub.url, chars = text.len(), "fetched job description");

    // Salary is pulled from the full text, before truncation can cut it off.
    let listed_salary = extract_salary(&text);

    Ok(JobListing {
        stub: stub.clone(),
        description: truncate_chars(&text, DESCRIPTION_MAX_CHARS),
        listed_salary,
    })
}

/// Truncate at a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Pull a `$…`-style salary span out of free text, when one is visible.
/// Matches shapes like `$95,000 - $120,000/yr`, `$80k–$130k USD`.
pub fn extract_salary(text: &str) -> Option<String> {
    static SALARY_RE: OnceLock<Regex> = OnceLock::new();
    let re = SALARY_RE.get_or_init(|| {
        Regex::new(
            r"(?i)\$[\d,]+(?:k)?(?:\s*[-–]\s*\$?[\d,]+(?:k)?)?(?:\s*(?:USD|/yr|/year|annually))?",
        )
        .expect("salary regex is valid")
    });

    re.find(text).map(|m| m.as_str().trim().to_string())
}
