//! Job board scraping: browser capability, per-board adapters, deduplication,
//! and detail-page fetching.
//!
//! This crate provides:
//! - [`browser`] — the navigate/extract capability everything else is built on
//! - [`adapters`] — one [`BoardAdapter`] per job board
//! - [`dedupe`] — stable first-seen-wins stub deduplication
//! - [`detail`] — full-description fetch for a single stub
//! - [`scrape`] — concurrent listing scrape across all boards

pub mod adapters;
pub mod browser;
pub mod dedupe;
pub mod detail;
pub mod scrape;

pub use adapters::{
    AdapterRegistry, BoardAdapter, HimalayasAdapter, RemotiveAdapter, WeWorkRemotelyAdapter,
    WorkingNomadsAdapter,
};
pub use browser::{Browser, Page};
pub use dedupe::dedupe;
pub use detail::{extract_salary, fetch_detail};
pub use scrape::{ScrapeOutcome, scrape_all};
