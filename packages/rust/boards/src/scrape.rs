//! Concurrent listing scrape across all boards.

use tracing::{info, warn};
use url::Url;

use jobscout_shared::{JobScoutError, JobStub, Source};

use crate::adapters::AdapterRegistry;
use crate::browser::Browser;

/// What one scrape pass produced.
#[derive(Debug)]
pub struct ScrapeOutcome {
    /// Stubs concatenated in board order — this fixes discovery order for
    /// everything downstream.
    pub stubs: Vec<JobStub>,
    /// Boards whose listing page responded (even with zero matches).
    pub sources_ok: usize,
}

/// Scrape every board's listing page.
///
/// Pages are fetched concurrently (one task per board) but results are
/// collected in `board_urls` order, so completion order never leaks into
/// discovery order. A board that fails to load or parse is logged and
/// contributes zero stubs; the remaining boards are still used.
pub async fn scrape_all(
    browser: &Browser,
    registry: &AdapterRegistry,
    board_urls: &[(Source, Url)],
) -> ScrapeOutcome {
    let mut handles = Vec::with_capacity(board_urls.len());

    for (source, url) in board_urls {
        let browser = browser.clone();
        let source = *source;
        let url = url.clone();
        handles.push((
            source,
            tokio::spawn(async move { browser.goto(&url).await }),
        ));
    }

    let mut stubs = Vec::new();
    let mut sources_ok = 0;

    for (source, handle) in handles {
        let page = match handle.await {
            Ok(Ok(page)) => page,
            Ok(Err(e)) => {
                let err = JobScoutError::SourceUnavailable {
                    board: source,
                    message: e.to_string(),
                };
                warn!(error = %err, "skipping board");
                continue;
            }
            Err(e) => {
                let err = JobScoutError::SourceUnavailable {
                    board: source,
                    message: format!("scrape task failed: {e}"),
                };
                warn!(error = %err, "skipping board");
                continue;
            }
        };

        sources_ok += 1;

        let Some(adapter) = registry.for_source(source) else {
            warn!(%source, "no adapter registered for source");
            continue;
        };

        let found = adapter.extract_stubs(&page);
        info!(%source, listings = found.len(), "scraped listing page");
        stubs.extend(found);
    }

    ScrapeOutcome { stubs, sources_ok }
}
