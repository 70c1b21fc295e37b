//! HTTP page browser — the capability surface the pipeline depends on.
//!
//! [`Browser`] navigates to a URL and returns a [`Page`]; a page can resolve
//! links and extract visible text by selector. Adapters and the detail
//! fetcher depend only on this surface, so a different retrieval engine
//! (e.g. a headless browser) could replace it without touching the pipeline.

use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use jobscout_shared::{JobScoutError, Result};

/// User-Agent string for page requests.
const USER_AGENT: &str = concat!("JobScout/", env!("CARGO_PKG_VERSION"));

/// Per-page fetch timeout. Detail pages that hang longer than this become a
/// skip, never a pipeline abort.
const PAGE_TIMEOUT: Duration = Duration::from_secs(20);

// ---------------------------------------------------------------------------
// Browser
// ---------------------------------------------------------------------------

/// Shared page retriever. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Browser {
    client: Client,
}

impl Browser {
    /// Create a browser with the default timeout and redirect policy.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(PAGE_TIMEOUT)
            .build()
            .map_err(|e| JobScoutError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Navigate to `url` and return the rendered page.
    ///
    /// Network errors, timeouts, and non-2xx responses all surface as
    /// [`JobScoutError::Fetch`]; the caller decides whether that is a
    /// source-level or job-level failure.
    pub async fn goto(&self, url: &Url) -> Result<Page> {
        debug!(%url, "fetching page");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| JobScoutError::fetch(url.as_str(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(JobScoutError::fetch(url.as_str(), format!("HTTP {status}")));
        }

        // Redirects may land on a different final URL; relative links must
        // resolve against where we ended up, not where we started.
        let final_url = response.url().clone();

        let body = response
            .text()
            .await
            .map_err(|e| JobScoutError::fetch(url.as_str(), format!("body read failed: {e}")))?;

        Ok(Page {
            url: final_url,
            body,
        })
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// A fetched page. Holds the raw body and parses on demand so the parsed
/// document never has to cross an await point.
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after redirects.
    pub url: Url,
    /// Raw response body.
    pub body: String,
}

impl Page {
    /// Parse the body as an HTML document.
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }

    /// Resolve an href found on this page to an absolute URL.
    /// Anchors, `javascript:`, and `mailto:` links resolve to `None`.
    pub fn resolve_link(&self, href: &str) -> Option<Url> {
        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
        {
            return None;
        }

        let mut resolved = self.url.join(href).ok()?;
        resolved.set_fragment(None);
        Some(resolved)
    }

    /// Extract the first text block matching one of `selectors` that is at
    /// least `min_len` characters long and contains none of the `noise`
    /// phrases (matched case-insensitively). Selectors are tried in order,
    /// every match per selector, so a widget sharing a selector with the real
    /// content does not mask it.
    pub fn dominant_text(&self, selectors: &[&str], min_len: usize, noise: &[&str]) -> Option<String> {
        let doc = self.document();

        for sel_str in selectors {
            let Ok(sel) = Selector::parse(sel_str) else {
                continue;
            };

            for el in doc.select(&sel) {
                let text = collapse_whitespace(&el.text().collect::<Vec<_>>().join("\n"));
                if text.len() < min_len {
                    continue;
                }
                let lower = text.to_lowercase();
                if noise.iter().any(|phrase| lower.contains(phrase)) {
                    continue;
                }
                return Some(text);
            }
        }

        None
    }
}

/// Collapse runs of blank lines and trim each line, preserving line breaks
/// so listing text keeps its visual structure.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> Page {
        Page {
            url: Url::parse("https://board.example.com/jobs/listing").unwrap(),
            body: body.to_string(),
        }
    }

    #[test]
    fn resolve_relative_link() {
        let p = page("<html></html>");
        let resolved = p.resolve_link("/jobs/acme/backend-engineer").unwrap();
        assert_eq!(
            resolved.as_str(),
            "https://board.example.com/jobs/acme/backend-engineer"
        );
    }

    #[test]
    fn resolve_skips_anchors_and_schemes() {
        let p = page("<html></html>");
        assert!(p.resolve_link("#apply").is_none());
        assert!(p.resolve_link("javascript:void(0)").is_none());
        assert!(p.resolve_link("mailto:jobs@example.com").is_none());
        assert!(p.resolve_link("").is_none());
    }

    #[test]
    fn resolve_strips_fragment() {
        let p = page("<html></html>");
        let resolved = p.resolve_link("/jobs/1#section").unwrap();
        assert!(resolved.fragment().is_none());
    }

    #[test]
    fn dominant_text_prefers_earlier_selector() {
        let p = page(
            r#"<html><body>
                <article>This is the long article body with plenty of text in it.</article>
                <main>Shorter main text here but still long enough to pass.</main>
            </body></html>"#,
        );
        let text = p.dominant_text(&["article", "main"], 20, &[]).unwrap();
        assert!(text.contains("article body"));
    }

    #[test]
    fn dominant_text_skips_noise_blocks() {
        let p = page(
            r#"<html><body>
                <article>Sign in to apply for this role and create an account today friends.</article>
                <main>Real job description: build backend services in a small team, remote.</main>
            </body></html>"#,
        );
        let text = p
            .dominant_text(&["article", "main"], 20, &["sign in to apply"])
            .unwrap();
        assert!(text.contains("Real job description"));
    }

    #[test]
    fn dominant_text_respects_min_len() {
        let p = page("<html><body><main>tiny</main></body></html>");
        assert!(p.dominant_text(&["main"], 150, &[]).is_none());
    }

    #[test]
    fn collapse_whitespace_drops_blank_lines() {
        let text = "  Title  \n\n\n   Company \n";
        assert_eq!(collapse_whitespace(text), "Title\nCompany");
    }

    #[tokio::test]
    async fn goto_surfaces_http_errors() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let browser = Browser::new().unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let err = browser.goto(&url).await.unwrap_err();
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn goto_returns_body() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_string("<html>ok</html>"),
            )
            .mount(&server)
            .await;

        let browser = Browser::new().unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let page = browser.goto(&url).await.unwrap();
        assert!(page.body.contains("ok"));
    }
}
