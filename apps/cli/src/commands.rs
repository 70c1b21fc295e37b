//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use jobscout_core::pipeline::{run_pipeline, PipelineResult, ProgressReporter};
use jobscout_core::DigestSender;
use jobscout_scorer::Scorer;
use jobscout_shared::{
    expand_home, init_config, load_config, load_config_from, AppConfig, PipelineConfig, RankedJob,
    RunReport,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// JobScout — find remote backend jobs that fit your resume.
#[derive(Parser)]
#[command(
    name = "jobscout",
    version,
    about = "Scrape remote job boards and rank postings against your resume with a local model.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the full pipeline and print the digest.
    Run {
        /// Config file path (defaults to ~/.jobscout/jobscout.toml).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Resume text file (overrides the configured path).
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Minimum fit score to keep a job (1-10).
        #[arg(short, long)]
        threshold: Option<u8>,

        /// Cap on detail-page fetches this run.
        #[arg(long)]
        max_fetch: Option<usize>,

        /// Maximum number of jobs in the digest.
        #[arg(long)]
        top: Option<usize>,
    },

    /// Verify the inference endpoint is reachable.
    Check,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match cli.verbose {
        0 => "jobscout=info",
        1 => "jobscout=debug",
        _ => "jobscout=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run {
            config,
            resume,
            threshold,
            max_fetch,
            top,
        } => cmd_run(config.as_deref(), resume.as_deref(), threshold, max_fetch, top).await,
        Command::Check => cmd_check().await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

async fn cmd_run(
    config_path: Option<&std::path::Path>,
    resume_path: Option<&std::path::Path>,
    threshold: Option<u8>,
    max_fetch: Option<usize>,
    top: Option<usize>,
) -> Result<()> {
    let app_config = match config_path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    let mut pipeline_config = PipelineConfig::try_from(&app_config)?;
    if let Some(t) = threshold {
        if !(1..=10).contains(&t) {
            return Err(eyre!("--threshold must be within 1..=10, got {t}"));
        }
        pipeline_config.fit_threshold = t;
    }
    if let Some(cap) = max_fetch {
        pipeline_config.max_detail_fetches = cap;
    }
    if let Some(n) = top {
        pipeline_config.digest_size = n;
    }

    let resume = load_resume(resume_path, &app_config)?;

    info!(
        boards = pipeline_config.board_urls.len(),
        model = %pipeline_config.model,
        threshold = pipeline_config.fit_threshold,
        "starting run"
    );

    let reporter = CliProgress::new();
    let digest = ConsoleDigest;
    let result = run_pipeline(&pipeline_config, &resume, &reporter, &digest).await?;

    println!();
    println!("  Scraped:  {} listings", result.report.scraped);
    println!("  Unique:   {}", result.report.deduped);
    println!("  Fetched:  {}", result.report.fetched_ok);
    println!("  Scored:   {}", result.report.scored_ok);
    println!("  Matched:  {}", result.report.filtered_in);
    println!("  Time:     {:.1}s", result.report.elapsed.as_secs_f64());
    println!();

    Ok(())
}

/// Read the resume text, preferring the CLI flag over the configured path.
fn load_resume(flag: Option<&std::path::Path>, config: &AppConfig) -> Result<String> {
    let path = match flag {
        Some(p) => p.to_path_buf(),
        None => expand_home(&config.pipeline.resume_path),
    };

    let text = std::fs::read_to_string(&path).map_err(|e| {
        eyre!(
            "cannot read resume at '{}': {e}. Put your resume text there or pass --resume.",
            path.display()
        )
    })?;

    if text.trim().is_empty() {
        return Err(eyre!("resume at '{}' is empty", path.display()));
    }

    Ok(text)
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

async fn cmd_check() -> Result<()> {
    let config = load_config()?;
    let pipeline_config = PipelineConfig::try_from(&config)?;

    let resume = load_resume(None, &config)?;
    println!(
        "Resume OK: {} ({} chars)",
        expand_home(&config.pipeline.resume_path).display(),
        resume.trim().len()
    );

    let scorer = Scorer::new(pipeline_config.endpoint.clone(), &pipeline_config.model)?;
    scorer.health_check().await?;

    println!(
        "Inference endpoint OK: {} (model {})",
        pipeline_config.endpoint, pipeline_config.model
    );
    for (source, url) in &pipeline_config.board_urls {
        println!("  {}: {url}", source.display_name());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn detail_fetched(&self, title: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Fetching [{current}/{total}] {title}"));
    }

    fn job_scored(&self, title: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Scoring [{current}/{total}] {title}"));
    }

    fn done(&self, _result: &PipelineResult) {
        self.spinner.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// Console digest
// ---------------------------------------------------------------------------

/// Prints the ranked digest to stdout.
struct ConsoleDigest;

impl DigestSender for ConsoleDigest {
    fn send(&self, jobs: &[RankedJob], report: &RunReport) -> jobscout_shared::Result<()> {
        println!();
        println!(
            "  Job digest — {}",
            report.started_at.format("%Y-%m-%d %H:%M UTC")
        );
        if jobs.is_empty() {
            println!("  No matching jobs this run. Try lowering --threshold.");
            return Ok(());
        }

        println!("  Top {} matches:", jobs.len());
        println!();
        for (i, job) in jobs.iter().enumerate() {
            let score = &job.score;
            println!(
                "  {}. [{}/10] {} — {}",
                i + 1,
                score.fit_score,
                job.listing.stub.title,
                fit_label(score.fit_score)
            );
            println!("     {}", job.listing.stub.url);
            println!("     Source: {}", job.listing.stub.source.display_name());
            if let Some(salary) = display_salary(job) {
                println!("     Salary: {salary}");
            }
            println!("     {}", score.summary);
            println!("     Why: {}", score.match_reason);
            if !score.concerns.eq_ignore_ascii_case("none") {
                println!("     Concerns: {}", score.concerns);
            }
            println!();
        }
        Ok(())
    }
}

/// Model estimate first, the salary span scraped from the posting as fallback.
fn display_salary(job: &RankedJob) -> Option<&str> {
    job.score
        .salary_estimate
        .as_deref()
        .or(job.listing.listed_salary.as_deref())
}

fn fit_label(fit_score: u8) -> &'static str {
    match fit_score {
        8..=10 => "Strong fit",
        6..=7 => "Decent fit",
        _ => "Weak fit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobscout_shared::{JobListing, JobStub, ScoreResult, Source};

    #[test]
    fn fit_labels_band_correctly() {
        assert_eq!(fit_label(10), "Strong fit");
        assert_eq!(fit_label(8), "Strong fit");
        assert_eq!(fit_label(7), "Decent fit");
        assert_eq!(fit_label(5), "Weak fit");
        assert_eq!(fit_label(1), "Weak fit");
    }

    fn ranked(salary_estimate: Option<&str>, listed_salary: Option<&str>) -> RankedJob {
        RankedJob {
            listing: JobListing {
                stub: JobStub {
                    source: Source::Remotive,
                    title: "Backend Engineer".into(),
                    url: "https://example.com/jobs/1".parse().unwrap(),
                },
                description: "desc".into(),
                listed_salary: listed_salary.map(String::from),
            },
            score: ScoreResult {
                fit_score: 8,
                is_backend: true,
                is_remote: true,
                salary_estimate: salary_estimate.map(String::from),
                summary: "s".into(),
                match_reason: "m".into(),
                concerns: "None".into(),
            },
        }
    }

    #[test]
    fn salary_falls_back_to_the_posting_text() {
        let estimated = ranked(Some("$100k-$130k"), Some("$95,000/yr"));
        assert_eq!(display_salary(&estimated), Some("$100k-$130k"));

        let listed_only = ranked(None, Some("$95,000/yr"));
        assert_eq!(display_salary(&listed_only), Some("$95,000/yr"));

        assert_eq!(display_salary(&ranked(None, None)), None);
    }

    #[test]
    fn load_resume_reads_flag_path() {
        let path = std::env::temp_dir().join("jobscout-resume-test.txt");
        std::fs::write(&path, "Backend engineer, ten years of Rust.").unwrap();
        let text = load_resume(Some(&path), &AppConfig::default()).unwrap();
        assert!(text.contains("Backend engineer"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn load_resume_rejects_blank_file() {
        let path = std::env::temp_dir().join("jobscout-resume-blank.txt");
        std::fs::write(&path, "   \n").unwrap();
        assert!(load_resume(Some(&path), &AppConfig::default()).is_err());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn load_resume_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("jobscout-resume-missing.txt");
        assert!(load_resume(Some(&path), &AppConfig::default()).is_err());
    }
}
