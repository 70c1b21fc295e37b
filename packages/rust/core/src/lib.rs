//! Pipeline orchestration for JobScout.
//!
//! This crate ties the boards and scorer crates together into the end-to-end
//! run: scrape every board, dedupe, fetch details, score against the resume,
//! then filter and rank into a digest.

pub mod digest;
pub mod pipeline;
pub mod rank;

pub use digest::{DigestSender, SilentDigest};
pub use pipeline::{run_pipeline, PipelineResult, ProgressReporter, SilentProgress};
pub use rank::{filter_jobs, rank_jobs, top_jobs};
