//! Core domain types for the JobScout pipeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// The job boards JobScout scrapes. One adapter exists per variant; nothing
/// downstream of the adapters branches on the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    WeWorkRemotely,
    Remotive,
    Himalayas,
    WorkingNomads,
}

impl Source {
    /// Stable identifier used in config keys and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeWorkRemotely => "weworkremotely",
            Self::Remotive => "remotive",
            Self::Himalayas => "himalayas",
            Self::WorkingNomads => "workingnomads",
        }
    }

    /// Human-readable board name for digests.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::WeWorkRemotely => "We Work Remotely",
            Self::Remotive => "Remotive",
            Self::Himalayas => "Himalayas",
            Self::WorkingNomads => "Working Nomads",
        }
    }

    /// All boards, in the fixed order that defines cross-source discovery order.
    pub fn all() -> [Source; 4] {
        [
            Self::WeWorkRemotely,
            Self::Remotive,
            Self::Himalayas,
            Self::WorkingNomads,
        ]
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// JobStub
// ---------------------------------------------------------------------------

/// A minimal listing reference produced by a board adapter, before the full
/// description is fetched. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStub {
    /// Board the listing was discovered on.
    pub source: Source,
    /// Posting title as shown on the listing page.
    pub title: String,
    /// Absolute URL of the posting's detail page.
    pub url: Url,
}

impl JobStub {
    /// Identity key for deduplication: lower-cased title plus the canonical
    /// URL with query string and fragment stripped. Two stubs with equal keys
    /// refer to the same posting even when boards decorate links with
    /// tracking parameters.
    pub fn dedup_key(&self) -> String {
        let mut canonical = self.url.clone();
        canonical.set_query(None);
        canonical.set_fragment(None);

        let mut url_part = canonical.to_string();
        // Trailing slash is not significant (except for a bare root path).
        if url_part.ends_with('/') && canonical.path() != "/" {
            url_part.pop();
        }

        format!("{}|{}", self.title.trim().to_lowercase(), url_part)
    }
}

// ---------------------------------------------------------------------------
// JobListing
// ---------------------------------------------------------------------------

/// A stub plus the full description text from its detail page. Only the
/// detail fetcher creates these; a failed fetch surfaces an error rather
/// than a listing with an empty description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListing {
    pub stub: JobStub,
    /// Dominant visible text of the detail page, bounded in length.
    pub description: String,
    /// Salary span found in the posting text, when one is visible.
    pub listed_salary: Option<String>,
}

// ---------------------------------------------------------------------------
// ScoreResult
// ---------------------------------------------------------------------------

/// Validated model verdict for one listing. Constructed only by the scorer's
/// decode step; `fit_score` is always within 1..=10.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Resume-to-job match quality, 1 (poor) to 10 (perfect).
    pub fit_score: u8,
    /// Whether the model judged this a backend/systems role.
    pub is_backend: bool,
    /// Whether the posting is explicitly remote.
    pub is_remote: bool,
    /// Listed or model-estimated salary range, when available.
    pub salary_estimate: Option<String>,
    /// Two-sentence fit summary.
    pub summary: String,
    /// Strongest reason the posting matches the resume.
    pub match_reason: String,
    /// Biggest gap or concern.
    pub concerns: String,
}

// ---------------------------------------------------------------------------
// RankedJob
// ---------------------------------------------------------------------------

/// A listing joined with its valid score — the unit handed to filtering,
/// ranking, and the digest sender. Invalid or failed scorings never reach
/// this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedJob {
    pub listing: JobListing,
    pub score: ScoreResult,
}

// ---------------------------------------------------------------------------
// RunReport
// ---------------------------------------------------------------------------

/// Per-stage counters for one pipeline run, reported at completion.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// When the run started.
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// Raw stubs collected across all boards.
    pub scraped: usize,
    /// Stubs surviving deduplication (before the detail-fetch cap).
    pub deduped: usize,
    /// Listings with a successfully fetched description.
    pub fetched_ok: usize,
    /// Listings with a valid score.
    pub scored_ok: usize,
    /// Jobs passing the filter predicate (before truncation).
    pub filtered_in: usize,
    /// Boards that responded at all.
    pub sources_ok: usize,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub(title: &str, url: &str) -> JobStub {
        JobStub {
            source: Source::Remotive,
            title: title.into(),
            url: Url::parse(url).expect("test url"),
        }
    }

    #[test]
    fn dedup_key_strips_query_and_fragment() {
        let a = stub("Backend Engineer", "https://example.com/jobs/123?utm_source=feed");
        let b = stub("Backend Engineer", "https://example.com/jobs/123#apply");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn dedup_key_case_insensitive_title() {
        let a = stub("Backend Engineer", "https://example.com/jobs/123");
        let b = stub("BACKEND ENGINEER", "https://example.com/jobs/123");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn dedup_key_ignores_trailing_slash() {
        let a = stub("SRE", "https://example.com/jobs/9/");
        let b = stub("SRE", "https://example.com/jobs/9");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn dedup_key_distinguishes_different_paths() {
        let a = stub("SRE", "https://example.com/jobs/9");
        let b = stub("SRE", "https://example.com/jobs/10");
        assert_ne!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn source_roundtrip_serde() {
        let json = serde_json::to_string(&Source::WeWorkRemotely).expect("serialize");
        assert_eq!(json, r#""we_work_remotely""#);
        let parsed: Source = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, Source::WeWorkRemotely);
    }

    #[test]
    fn source_order_is_fixed() {
        let all = Source::all();
        assert_eq!(all[0], Source::WeWorkRemotely);
        assert_eq!(all[3], Source::WorkingNomads);
    }
}
