//! Error types for JobScout.
//!
//! Library crates use [`JobScoutError`] via `thiserror`.
//! The CLI app wraps this with `color-eyre` for rich diagnostics.
//!
//! Per-job error kinds (`SourceUnavailable`, `Fetch`, `Score`) are recovered
//! inside the pipeline coordinator and surface only in run counters and logs.
//! Only `Fatal` aborts a run.

use std::path::PathBuf;

use crate::types::Source;

/// Top-level error type for all JobScout operations.
#[derive(Debug, thiserror::Error)]
pub enum JobScoutError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Unrecoverable run failure: empty resume, inference endpoint down at
    /// the health check, or no job board reachable at all.
    #[error("fatal: {message}")]
    Fatal { message: String },

    /// A board's listing page failed to load or parse. The board contributes
    /// zero stubs and the run continues.
    #[error("source {board} unavailable: {message}")]
    SourceUnavailable { board: Source, message: String },

    /// Detail page network/timeout/parse failure for one stub.
    #[error("fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    /// Model unreachable or its output failed validation.
    #[error("score error: {message}")]
    Score { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, JobScoutError>;

impl JobScoutError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a fatal run error from any displayable message.
    pub fn fatal(msg: impl Into<String>) -> Self {
        Self::Fatal {
            message: msg.into(),
        }
    }

    /// Create a fetch error for a detail page.
    pub fn fetch(url: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: msg.into(),
        }
    }

    /// Create a score error from any displayable message.
    pub fn score(msg: impl Into<String>) -> Self {
        Self::Score {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
