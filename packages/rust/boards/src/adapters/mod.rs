//! Board adapter trait and the built-in adapter for each job board.
//!
//! Each adapter knows one board's listing-page markup and turns it into
//! [`JobStub`]s. Adding a board means adding a variant here; nothing
//! downstream branches on the source.

mod himalayas;
mod remotive;
mod weworkremotely;
mod workingnomads;

use std::collections::HashSet;

use jobscout_shared::{JobStub, Source};

use crate::browser::Page;

pub use himalayas::HimalayasAdapter;
pub use remotive::RemotiveAdapter;
pub use weworkremotely::WeWorkRemotelyAdapter;
pub use workingnomads::WorkingNomadsAdapter;

/// Titles shorter than this are navigation chrome, not job titles.
const MIN_TITLE_LEN: usize = 5;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// One listing-page extractor per job board.
///
/// Extraction is a pure function of the fetched page: navigation happens in
/// the scrape engine, so an adapter has no side effects and a structural
/// failure (selectors matching nothing) yields an empty vector, not an error.
pub trait BoardAdapter: Send + Sync {
    /// The board this adapter handles.
    fn source(&self) -> Source;

    /// Extract (title, link) stubs from the board's listing page.
    fn extract_stubs(&self, page: &Page) -> Vec<JobStub>;
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Holds all board adapters in the fixed order that defines cross-source
/// discovery order.
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn BoardAdapter>>,
}

impl AdapterRegistry {
    /// Create a registry with all built-in adapters.
    pub fn new() -> Self {
        Self {
            adapters: vec![
                Box::new(WeWorkRemotelyAdapter),
                Box::new(RemotiveAdapter),
                Box::new(HimalayasAdapter),
                Box::new(WorkingNomadsAdapter),
            ],
        }
    }

    /// All adapters in discovery order.
    pub fn adapters(&self) -> &[Box<dyn BoardAdapter>] {
        &self.adapters
    }

    /// The adapter for a given board.
    pub fn for_source(&self, source: Source) -> Option<&dyn BoardAdapter> {
        self.adapters
            .iter()
            .find(|a| a.source() == source)
            .map(|a| a.as_ref())
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Shared extraction helpers
// ---------------------------------------------------------------------------

/// Build a stub from a raw (title, href) pair, resolving the link against the
/// page URL. Returns `None` for chrome links and titles too short to be jobs.
pub(crate) fn stub_from(source: Source, title: &str, href: &str, page: &Page) -> Option<JobStub> {
    let title = title.trim();
    if title.len() < MIN_TITLE_LEN {
        return None;
    }

    let url = page.resolve_link(href)?;

    Some(JobStub {
        source,
        title: title.to_string(),
        url,
    })
}

/// Tracks hrefs already emitted for one page, so repeated links to the same
/// posting (logo + title + "apply" all linking the same place) produce one stub.
#[derive(Default)]
pub(crate) struct SeenLinks(HashSet<String>);

impl SeenLinks {
    pub(crate) fn insert(&mut self, href: &str) -> bool {
        self.0.insert(href.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn page() -> Page {
        Page {
            url: Url::parse("https://board.example.com/jobs").unwrap(),
            body: String::new(),
        }
    }

    #[test]
    fn registry_order_matches_source_order() {
        let registry = AdapterRegistry::new();
        let sources: Vec<Source> = registry.adapters().iter().map(|a| a.source()).collect();
        assert_eq!(sources, Source::all().to_vec());
    }

    #[test]
    fn registry_finds_adapter_by_source() {
        let registry = AdapterRegistry::new();
        let adapter = registry.for_source(Source::Himalayas).unwrap();
        assert_eq!(adapter.source(), Source::Himalayas);
    }

    #[test]
    fn stub_from_rejects_short_titles() {
        let p = page();
        assert!(stub_from(Source::Remotive, "Go", "/jobs/1", &p).is_none());
        assert!(stub_from(Source::Remotive, "Go Engineer", "/jobs/1", &p).is_some());
    }

    #[test]
    fn stub_from_resolves_relative_links() {
        let p = page();
        let stub = stub_from(Source::Remotive, "Backend Engineer", "/jobs/1", &p).unwrap();
        assert_eq!(stub.url.as_str(), "https://board.example.com/jobs/1");
    }

    #[test]
    fn seen_links_dedupes_within_page() {
        let mut seen = SeenLinks::default();
        assert!(seen.insert("/jobs/1"));
        assert!(!seen.insert("/jobs/1"));
        assert!(seen.insert("/jobs/2"));
    }
}
