//! Working Nomads board adapter.

use scraper::Selector;

use jobscout_shared::{JobStub, Source};

use super::weworkremotely::first_text_line;
use super::{BoardAdapter, SeenLinks, stub_from};
use crate::browser::Page;

/// Extracts listings from the Working Nomads development category page.
///
/// Jobs render as `.job-item` rows (older markup: `li` with a job class),
/// each with an `a.job-title` link; heading links are the fallback.
pub struct WorkingNomadsAdapter;

impl BoardAdapter for WorkingNomadsAdapter {
    fn source(&self) -> Source {
        Source::WorkingNomads
    }

    fn extract_stubs(&self, page: &Page) -> Vec<JobStub> {
        let doc = page.document();
        let Ok(row_sel) = Selector::parse(".job-item, li[class*='job']") else {
            return Vec::new();
        };
        let Ok(title_sel) = Selector::parse("a.job-title, h2 a, h3 a") else {
            return Vec::new();
        };

        let mut stubs = Vec::new();
        let mut seen = SeenLinks::default();

        for row in doc.select(&row_sel) {
            let Some(link) = row.select(&title_sel).next() else {
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

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn listing_page(body: &str) -> Page {
        Page {
            url: Url::parse("https://www.workingnomads.com/jobs?category=development").unwrap(),
            body: body.to_string(),
        }
    }

    const LISTING: &str = r#"<html><body>
        <div class="job-item">
          <h3><a class="job-title" href="/jobs/backend-developer-acme">Backend Developer</a></h3>
          <span class="company">Acme</span>
          <span class="salary">$100k-$120k</span>
        </div>
        <li class="job-row">
          <h2><a href="/jobs/devops-engineer-globex">DevOps Engineer</a></h2>
        </li>
    </body></html>"#;

    #[test]
    fn extracts_rows_with_title_links() {
        let page = listing_page(LISTING);
        let stubs = WorkingNomadsAdapter.extract_stubs(&page);

        assert_eq!(stubs.len(), 2);
        assert_eq!(stubs[0].title, "Backend Developer");
        assert_eq!(
            stubs[0].url.as_str(),
            "https://www.workingnomads.com/jobs/backend-developer-acme"
        );
        assert_eq!(stubs[1].title, "DevOps Engineer");
    }

    #[test]
    fn rows_without_links_are_skipped() {
        let page = listing_page(r#"<div class="job-item"><span>ad slot</span></div>"#);
        assert!(WorkingNomadsAdapter.extract_stubs(&page).is_empty());
    }
}
