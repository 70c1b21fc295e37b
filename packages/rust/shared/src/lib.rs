//! Shared types, error model, and configuration for JobScout.
//!
//! This crate is the foundation depended on by all other JobScout crates.
//! It provides:
//! - [`JobScoutError`] — the unified error type
//! - Domain types ([`JobStub`], [`JobListing`], [`ScoreResult`], [`RankedJob`])
//! - Configuration ([`AppConfig`], [`PipelineConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BoardsConfig, OllamaConfig, PipelineConfig, PipelineDefaults, config_dir,
    config_file_path, expand_home, init_config, load_config, load_config_from,
};
pub use error::{JobScoutError, Result};
pub use types::{JobListing, JobStub, RankedJob, RunReport, ScoreResult, Source};
