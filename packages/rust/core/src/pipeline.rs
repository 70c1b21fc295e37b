//! End-to-end run: scrape → dedupe → fetch details → score → filter → rank.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use jobscout_boards::{dedupe, fetch_detail, scrape_all, AdapterRegistry, Browser};
use jobscout_scorer::Scorer;
use jobscout_shared::{
    JobListing, JobScoutError, JobStub, PipelineConfig, RankedJob, Result, RunReport, ScoreResult,
};

use crate::digest::DigestSender;
use crate::rank::{filter_jobs, rank_jobs, top_jobs};

/// What one complete run produced.
#[derive(Debug)]
pub struct PipelineResult {
    /// The final digest, best first, already truncated to the digest size.
    pub jobs: Vec<RankedJob>,
    /// Per-stage counters.
    pub report: RunReport,
}

/// Progress callback for reporting run status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each detail page is fetched.
    fn detail_fetched(&self, title: &str, current: usize, total: usize);
    /// Called after each listing is scored.
    fn job_scored(&self, title: &str, current: usize, total: usize);
    /// Called when the run completes.
    fn done(&self, result: &PipelineResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn detail_fetched(&self, _title: &str, _current: usize, _total: usize) {}
    fn job_scored(&self, _title: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &PipelineResult) {}
}

/// Run the full pipeline.
///
/// 1. Verify the resume and the inference endpoint
/// 2. Scrape every board's listing page
/// 3. Dedupe and cap to the detail-fetch budget
/// 4. Fetch detail pages (bounded concurrency, order preserved)
/// 5. Score each listing against the resume (sequential)
/// 6. Filter, rank, truncate, and hand off the digest
///
/// A failed board, fetch, or scoring skips that item; only a missing resume,
/// an unreachable inference endpoint, or zero responding boards abort the run.
#[instrument(skip_all, fields(boards = config.board_urls.len(), model = %config.model))]
pub async fn run_pipeline(
    config: &PipelineConfig,
    resume: &str,
    progress: &dyn ProgressReporter,
    digest: &dyn DigestSender,
) -> Result<PipelineResult> {
    let start = Instant::now();
    let started_at = chrono::Utc::now();

    // --- Phase 1: Init ---
    if resume.trim().is_empty() {
        return Err(JobScoutError::fatal(
            "resume is empty; nothing to score against",
        ));
    }

    progress.phase("Checking inference endpoint");
    let scorer = Scorer::new(config.endpoint.clone(), &config.model)?;
    scorer.health_check().await?;

    let browser = Browser::new()?;
    let registry = AdapterRegistry::new();

    // --- Phase 2: Scrape ---
    progress.phase("Scraping job boards");
    let outcome = scrape_all(&browser, &registry, &config.board_urls).await;
    if outcome.sources_ok == 0 {
        return Err(JobScoutError::fatal(
            "no job board responded; check network connectivity and board URLs",
        ));
    }
    let scraped = outcome.stubs.len();
    let sources_ok = outcome.sources_ok;

    // --- Phase 3: Dedupe and cap ---
    let mut stubs = dedupe(outcome.stubs);
    let deduped = stubs.len();
    if stubs.len() > config.max_detail_fetches {
        info!(
            deduped,
            cap = config.max_detail_fetches,
            "capping detail fetches"
        );
        stubs.truncate(config.max_detail_fetches);
    }

    // --- Phase 4: Fetch details ---
    progress.phase("Fetching job details");
    let listings = fetch_details(&browser, stubs, config.fetch_concurrency, progress).await;
    let fetched_ok = listings.len();

    // --- Phase 5: Score ---
    progress.phase("Scoring against resume");
    let total = listings.len();
    let mut scored = Vec::with_capacity(total);
    for (i, listing) in listings.into_iter().enumerate() {
        match score_with_retry(&scorer, resume, &listing).await {
            Ok(score) => {
                progress.job_scored(&listing.stub.title, i + 1, total);
                scored.push(RankedJob { listing, score });
            }
            Err(e) => {
                warn!(url = %listing.stub.url, error = %e, "scoring failed, skipping listing");
            }
        }
    }
    let scored_ok = scored.len();

    // --- Phase 6: Filter, rank, digest ---
    progress.phase("Filtering and ranking");
    let filtered = filter_jobs(scored, config.fit_threshold);
    let filtered_in = filtered.len();
    let jobs = top_jobs(rank_jobs(filtered), config.digest_size);

    let report = RunReport {
        started_at,
        scraped,
        deduped,
        fetched_ok,
        scored_ok,
        filtered_in,
        sources_ok,
        elapsed: start.elapsed(),
    };

    digest.send(&jobs, &report)?;

    let result = PipelineResult { jobs, report };
    progress.done(&result);

    info!(
        scraped = result.report.scraped,
        deduped = result.report.deduped,
        fetched_ok = result.report.fetched_ok,
        scored_ok = result.report.scored_ok,
        filtered_in = result.report.filtered_in,
        digest = result.jobs.len(),
        elapsed_ms = result.report.elapsed.as_millis(),
        "pipeline complete"
    );

    Ok(result)
}

/// Fetch detail pages with bounded concurrency.
///
/// Results are reassembled by stub index, so concurrent completion order
/// never changes downstream order. Failed fetches (after one retry) are
/// dropped with a warning.
async fn fetch_details(
    browser: &Browser,
    stubs: Vec<JobStub>,
    concurrency: usize,
    progress: &dyn ProgressReporter,
) -> Vec<JobListing> {
    let total = stubs.len();
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut handles = Vec::with_capacity(total);

    for (idx, stub) in stubs.into_iter().enumerate() {
        let browser = browser.clone();
        let semaphore = semaphore.clone();
        handles.push(tokio::spawn(async move {
            let permit = semaphore.acquire_owned().await;
            if permit.is_err() {
                let err = JobScoutError::fetch(stub.url.as_str(), "fetch pool closed");
                return (idx, stub, Err(err));
            }
            let result = fetch_with_retry(&browser, &stub).await;
            (idx, stub, result)
        }));
    }

    let mut slots: Vec<Option<JobListing>> = (0..total).map(|_| None).collect();
    let mut completed = 0;

    for handle in handles {
        match handle.await {
            Ok((idx, stub, Ok(listing))) => {
                completed += 1;
                progress.detail_fetched(&stub.title, completed, total);
                slots[idx] = Some(listing);
            }
            Ok((_, stub, Err(e))) => {
                completed += 1;
                warn!(url = %stub.url, error = %e, "detail fetch failed, skipping listing");
            }
            Err(e) => {
                completed += 1;
                warn!(error = %e, "detail fetch task failed");
            }
        }
    }

    slots.into_iter().flatten().collect()
}

async fn fetch_with_retry(browser: &Browser, stub: &JobStub) -> Result<JobListing> {
    match fetch_detail(browser, stub).await {
        Ok(listing) => Ok(listing),
        Err(first) => {
            debug!(url = %stub.url, error = %first, "detail fetch failed, retrying once");
            fetch_detail(browser, stub).await
        }
    }
}

async fn score_with_retry(
    scorer: &Scorer,
    resume: &str,
    listing: &JobListing,
) -> Result<ScoreResult> {
    match scorer.score(resume, listing).await {
        Ok(score) => Ok(score),
        Err(first) => {
            debug!(url = %listing.stub.url, error = %first, "scoring failed, retrying once");
            scorer.score(resume, listing).await
        }
    }
}
