//! Resume-fit scoring against a local inference endpoint.
//!
//! The [`Scorer`] builds one prompt per listing (resume + posting + strict
//! JSON schema instruction), sends it to an Ollama-style `/api/generate`
//! endpoint, and decodes the response into a validated
//! [`ScoreResult`](jobscout_shared::ScoreResult). Malformed or out-of-range
//! output is a [`JobScoutError::Score`], never a defaulted score.

pub mod parse;
pub mod prompt;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use jobscout_shared::{JobListing, JobScoutError, Result, ScoreResult};

/// Local models can take minutes per response; this is a ceiling, not a target.
const GENERATE_TIMEOUT: Duration = Duration::from_secs(300);

/// Timeout for the INIT health check — one fast round trip.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Request body for `/api/generate`.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

/// Model options — low temperature keeps the JSON payload stable.
#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

/// Response body for `/api/generate` (non-streaming).
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

/// Client for the local inference endpoint.
#[derive(Debug, Clone)]
pub struct Scorer {
    client: reqwest::Client,
    endpoint: Url,
    model: String,
}

impl Scorer {
    /// Create a scorer for the given endpoint base URL and model identifier.
    pub fn new(endpoint: Url, model: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(GENERATE_TIMEOUT)
            .build()
            .map_err(|e| JobScoutError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            model: model.into(),
        })
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// One round trip to verify the endpoint is reachable before any
    /// scraping starts. Failure here is fatal for the run.
    pub async fn health_check(&self) -> Result<()> {
        let url = self.api_url("api/tags")?;

        let response = self
            .client
            .get(url.as_str())
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                JobScoutError::fatal(format!("inference endpoint unreachable at {url}: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(JobScoutError::fatal(format!(
                "inference endpoint health check failed: HTTP {} from {url}",
                response.status()
            )));
        }

        debug!(endpoint = %self.endpoint, model = %self.model, "inference endpoint healthy");
        Ok(())
    }

    /// Score one listing against the resume.
    ///
    /// The caller serializes these calls — a single local model instance
    /// handles one request at a time, and queueing requests behind it turns
    /// resource pressure into garbled output.
    pub async fn score(&self, resume: &str, listing: &JobListing) -> Result<ScoreResult> {
        let prompt = prompt::build_prompt(resume, listing);
        let raw = self.generate(&prompt).await?;
        parse::parse_score(&raw)
    }

    /// Send one prompt to `/api/generate` and return the raw response text.
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = self.api_url("api/generate")?;

        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions { temperature: 0.1 },
        };

        let response = self
            .client
            .post(url.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| JobScoutError::score(format!("generate request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(JobScoutError::score(format!(
                "generate returned HTTP {}",
                response.status()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| JobScoutError::score(format!("invalid generate response: {e}")))?;

        Ok(body.response)
    }

    fn api_url(&self, path: &str) -> Result<Url> {
        self.endpoint
            .join(path)
            .map_err(|e| JobScoutError::config(format!("invalid endpoint path {path}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobscout_shared::{JobStub, Source};
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn listing() -> JobListing {
        JobListing {
            stub: JobStub {
                source: Source::Remotive,
                title: "Backend Engineer".into(),
                url: Url::parse("https://example.com/jobs/1").unwrap(),
            },
            description: "Build APIs in a fully remote backend team.".into(),
            listed_salary: None,
        }
    }

    fn valid_payload() -> serde_json::Value {
        serde_json::json!({
            "response": r#"{
                "fit_score": 8,
                "is_backend": true,
                "is_remote": true,
                "salary_estimate": "$100k-$130k",
                "summary": "Strong overlap with distributed systems work.",
                "match_reason": "Backend infrastructure experience.",
                "concerns": "None"
            }"#
        })
    }

    async fn scorer_for(server: &MockServer) -> Scorer {
        Scorer::new(Url::parse(&server.uri()).unwrap(), "qwen2.5:7b").unwrap()
    }

    #[tokio::test]
    async fn health_check_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"models": []})))
            .mount(&server)
            .await;

        scorer_for(&server).await.health_check().await.unwrap();
    }

    #[tokio::test]
    async fn health_check_failure_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = scorer_for(&server).await.health_check().await.unwrap_err();
        assert!(matches!(err, JobScoutError::Fatal { .. }));
    }

    #[tokio::test]
    async fn score_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_string_contains("Backend Engineer"))
            .and(body_string_contains("\"stream\":false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(valid_payload()))
            .mount(&server)
            .await;

        let result = scorer_for(&server)
            .await
            .score("resume text", &listing())
            .await
            .unwrap();
        assert_eq!(result.fit_score, 8);
        assert!(result.is_backend);
        assert_eq!(result.salary_estimate.as_deref(), Some("$100k-$130k"));
    }

    #[tokio::test]
    async fn malformed_model_output_is_score_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"response": "I cannot evaluate this."})),
            )
            .mount(&server)
            .await;

        let err = scorer_for(&server)
            .await
            .score("resume text", &listing())
            .await
            .unwrap_err();
        assert!(matches!(err, JobScoutError::Score { .. }));
    }

    #[tokio::test]
    async fn endpoint_error_is_score_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = scorer_for(&server)
            .await
            .score("resume text", &listing())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("HTTP 503"));
    }
}
