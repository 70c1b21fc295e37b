//! Application configuration for JobScout.
//!
//! User config lives at `~/.jobscout/jobscout.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{JobScoutError, Result};
use crate::types::Source;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "jobscout.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".jobscout";

// ---------------------------------------------------------------------------
// Config structs (matching jobscout.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Job board listing URLs.
    #[serde(default)]
    pub boards: BoardsConfig,

    /// Local inference endpoint settings.
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Pipeline tuning knobs.
    #[serde(default)]
    pub pipeline: PipelineDefaults,
}

/// `[boards]` section — one listing URL per board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardsConfig {
    #[serde(default = "default_weworkremotely_url")]
    pub weworkremotely: String,

    #[serde(default = "default_remotive_url")]
    pub remotive: String,

    #[serde(default = "default_himalayas_url")]
    pub himalayas: String,

    #[serde(default = "default_workingnomads_url")]
    pub workingnomads: String,
}

impl BoardsConfig {
    /// The configured listing URL for a board.
    pub fn url_for(&self, source: Source) -> &str {
        match source {
            Source::WeWorkRemotely => &self.weworkremotely,
            Source::Remotive => &self.remotive,
            Source::Himalayas => &self.himalayas,
            Source::WorkingNomads => &self.workingnomads,
        }
    }
}

impl Default for BoardsConfig {
    fn default() -> Self {
        Self {
            weworkremotely: default_weworkremotely_url(),
            remotive: default_remotive_url(),
            himalayas: default_himalayas_url(),
            workingnomads: default_workingnomads_url(),
        }
    }
}

fn default_weworkremotely_url() -> String {
    "https://weworkremotely.com/categories/remote-back-end-programming-jobs".into()
}
fn default_remotive_url() -> String {
    "https://remotive.com/remote-jobs/software-dev".into()
}
fn default_himalayas_url() -> String {
    "https://himalayas.app/jobs/engineering".into()
}
fn default_workingnomads_url() -> String {
    "https://www.workingnomads.com/jobs?category=development".into()
}

/// `[ollama]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the local inference endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier passed on every generate request.
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:11434".into()
}
fn default_model() -> String {
    "qwen2.5:7b".into()
}

/// `[pipeline]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineDefaults {
    /// Cap on detail-page fetches per run.
    #[serde(default = "default_max_detail_fetches")]
    pub max_detail_fetches: usize,

    /// Minimum fit score a job must reach to survive filtering.
    #[serde(default = "default_fit_threshold")]
    pub fit_threshold: u8,

    /// Maximum number of jobs handed to the digest sender.
    #[serde(default = "default_digest_size")]
    pub digest_size: usize,

    /// Concurrent detail-page fetches.
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,

    /// Path to the resume text file.
    #[serde(default = "default_resume_path")]
    pub resume_path: String,
}

impl Default for PipelineDefaults {
    fn default() -> Self {
        Self {
            max_detail_fetches: default_max_detail_fetches(),
            fit_threshold: default_fit_threshold(),
            digest_size: default_digest_size(),
            fetch_concurrency: default_fetch_concurrency(),
            resume_path: default_resume_path(),
        }
    }
}

fn default_max_detail_fetches() -> usize {
    40
}
fn default_fit_threshold() -> u8 {
    5
}
fn default_digest_size() -> usize {
    10
}
fn default_fetch_concurrency() -> usize {
    4
}
fn default_resume_path() -> String {
    "~/.jobscout/resume.txt".into()
}

// ---------------------------------------------------------------------------
// Pipeline config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime pipeline configuration — validated URLs, merged from config file
/// plus CLI flags. No stage reads ambient configuration; everything flows
/// through this struct.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Listing URL per board, in discovery order.
    pub board_urls: Vec<(Source, Url)>,
    /// Cap on detail-page fetches per run.
    pub max_detail_fetches: usize,
    /// Minimum fit score to survive filtering.
    pub fit_threshold: u8,
    /// Maximum jobs handed to the digest sender.
    pub digest_size: usize,
    /// Concurrent detail-page fetches.
    pub fetch_concurrency: usize,
    /// Base URL of the inference endpoint.
    pub endpoint: Url,
    /// Model identifier.
    pub model: String,
}

impl TryFrom<&AppConfig> for PipelineConfig {
    type Error = JobScoutError;

    fn try_from(config: &AppConfig) -> Result<Self> {
        let mut board_urls = Vec::with_capacity(4);
        for source in Source::all() {
            let raw = config.boards.url_for(source);
            let url = Url::parse(raw).map_err(|e| {
                JobScoutError::config(format!("invalid listing URL for {source}: '{raw}': {e}"))
            })?;
            board_urls.push((source, url));
        }

        let endpoint = Url::parse(&config.ollama.endpoint).map_err(|e| {
            JobScoutError::config(format!(
                "invalid ollama endpoint '{}': {e}",
                config.ollama.endpoint
            ))
        })?;

        if config.pipeline.fit_threshold < 1 || config.pipeline.fit_threshold > 10 {
            return Err(JobScoutError::config(format!(
                "fit_threshold must be within 1..=10, got {}",
                config.pipeline.fit_threshold
            )));
        }

        Ok(Self {
            board_urls,
            max_detail_fetches: config.pipeline.max_detail_fetches,
            fit_threshold: config.pipeline.fit_threshold,
            digest_size: config.pipeline.digest_size,
            fetch_concurrency: config.pipeline.fetch_concurrency.max(1),
            endpoint,
            model: config.ollama.model.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.jobscout/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| JobScoutError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.jobscout/jobscout.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| JobScoutError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| JobScoutError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| JobScoutError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| JobScoutError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| JobScoutError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Expand a leading `~/` in a configured path against the user's home.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
