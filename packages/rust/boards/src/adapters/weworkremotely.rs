//! We Work Remotely board adapter.

use scraper::Selector;

use jobscout_shared::{JobStub, Source};

use super::{BoardAdapter, SeenLinks, stub_from};
use crate::browser::Page;

/// Extracts listings from We Work Remotely category pages.
///
/// WWR renders each job as an `<li>` inside `section.jobs`, with the whole
/// card wrapped in an anchor and the role name in `span.title`.
pub struct WeWorkRemotelyAdapter;

impl BoardAdapter for WeWorkRemotelyAdapter {
    fn source(&self) -> Source {
        Source::WeWorkRemotely
    }

    fn extract_stubs(&self, page: &Page) -> Vec<JobStub> {
        let doc = page.document();
        let Ok(card_sel) = Selector::parse("section.jobs li a[href]") else {
            return Vec::new();
        };
        let Ok(title_sel) = Selector::parse("span.title") else {
            return Vec::new();
        };

        let mut stubs = Vec::new();
        let mut seen = SeenLinks::default();

        for card in doc.select(&card_sel) {
            let Some(href) = card.value().attr("href") else {
                continue;
            };
            if !seen.insert(href) {
                continue;
            }

            // Prefer the dedicated title span; fall back to the card's first
            // text line for markup variants without one.
            let title = card
                .select(&title_sel)
                .next()
                .map(|el| el.text().collect::<String>())
                .unwrap_or_else(|| first_text_line(&card));

            if let Some(stub) = stub_from(self.source(), &title, href, page) {
                stubs.push(stub);
            }
        }

        stubs
    }
}

/// First non-empty line of an element's visible text.
pub(crate) fn first_text_line(el: &scraper::ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn listing_page(body: &str) -> Page {
        Page {
            url: Url::parse("https://weworkremotely.com/categories/remote-back-end-programming-jobs")
                .unwrap(),
            body: body.to_string(),
        }
    }

    const LISTING: &str = r#"<html><body>
        <section class="jobs">
          <ul>
            <li><a href="/remote-jobs/acme-backend-engineer">
              <span class="company">Acme</span>
              <span class="title">Backend Engineer</span>
            </a></li>
            <li><a href="/remote-jobs/globex-platform-engineer">
              <span class="company">Globex</span>
              <span class="title">Platform Engineer</span>
            </a></li>
            <li class="view-all"><a href="/categories/all">All</a></li>
          </ul>
        </section>
    </body></html>"#;

    #[test]
    fn extracts_titles_and_absolute_urls() {
        let page = listing_page(LISTING);
        let stubs = WeWorkRemotelyAdapter.extract_stubs(&page);

        assert_eq!(stubs.len(), 2);
        assert_eq!(stubs[0].title, "Backend Engineer");
        assert_eq!(
            stubs[0].url.as_str(),
            "https://weworkremotely.com/remote-jobs/acme-backend-engineer"
        );
        assert!(stubs.iter().all(|s| s.source == Source::WeWorkRemotely));
    }

    #[test]
    fn empty_page_yields_no_stubs() {
        let page = listing_page("<html><body><p>maintenance</p></body></html>");
        assert!(WeWorkRemotelyAdapter.extract_stubs(&page).is_empty());
    }

    #[test]
    fn repeated_links_collapse_to_one_stub() {
        let body = r#"<html><body><section class="jobs"><ul>
            <li><a href="/remote-jobs/acme-1"><span class="title">Backend Engineer</span></a></li>
            <li><a href="/remote-jobs/acme-1"><span class="title">Backend Engineer</span></a></li>
        </ul></section></body></html>"#;
        let page = listing_page(body);
        assert_eq!(WeWorkRemotelyAdapter.extract_stubs(&page).len(), 1);
    }
}
