//! Himalayas board adapter.

use scraper::Selector;

use jobscout_shared::{JobStub, Source};

use super::weworkremotely::first_text_line;
use super::{BoardAdapter, SeenLinks, stub_from};
use crate::browser::Page;

/// Extracts listings from the Himalayas engineering jobs page.
///
/// Himalayas is a React app whose job cards are anchors to
/// `/jobs/<company>/<role>`; the role name is the card's first text line.
/// Anchors with fewer than two path segments under `/jobs/` are navigation
/// (category filters, the listing page itself), not postings.
pub struct HimalayasAdapter;

impl BoardAdapter for HimalayasAdapter {
    fn source(&self) -> Source {
        Source::Himalayas
    }

    fn extract_stubs(&self, page: &Page) -> Vec<JobStub> {
        let doc = page.document();
        let Ok(card_sel) = Selector::parse("a[href^='/jobs/']") else {
            return Vec::new();
        };

        let mut stubs = Vec::new();
        let mut seen = SeenLinks::default();

        for card in doc.select(&card_sel) {
            let Some(href) = card.value().attr("href") else {
                continue;
            };
            if !is_posting_path(href) || !seen.insert(href) {
                continue;
            }

            let title = first_text_line(&card);
            if let Some(stub) = stub_from(self.source(), &title, href, page) {
                stubs.push(stub);
            }
        }

        stubs
    }
}

/// A posting path looks like `/jobs/<company>/<role>`.
fn is_posting_path(href: &str) -> bool {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    path.trim_matches('/').split('/').count() >= 3
}
