//! Remotive board adapter.

use scraper::Selector;

use jobscout_shared::{JobStub, Source};

use super::weworkremotely::first_text_line;
use super::{BoardAdapter, SeenLinks, stub_from};
use crate::browser::Page;

/// Extracts listings from the Remotive software-dev category page.
///
/// Remotive renders job rows as `job-tile` list items; the first anchor in a
/// tile links to the posting and carries the title text.
pub struct RemotiveAdapter;

impl BoardAdapter for RemotiveAdapter {
    fn source(&self) -> Source {
        Source::Remotive
    }

    fn extract_stubs(&self, page: &Page) -> Vec<JobStub> {
        let doc = page.document();
        let Ok(tile_sel) = Selector::parse("li[class*='job-tile'], div[class*='job-tile']") else {
            return Vec::new();
        };
        let Ok(link_sel) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        let mut stubs = Vec::new();
        let mut seen = SeenLinks::default();

        for tile in doc.select(&tile_sel) {
            let Some(link) = tile.select(&link_sel).next() else {
                continue;
            };
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            if !seen.insert(href) {
                continue;
            }

            let title = first_text_line(&link);
            if let Some(stub) = stub_from(self.source(), &title, href, page) {
                stubs.push(stub);
            }
        }

        stubs
    }
}
