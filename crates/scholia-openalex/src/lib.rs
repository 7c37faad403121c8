//! Scholia OpenAlex - works-search API client
//!
//! This crate fetches the complete works list for a set of author ids
//! through the cursor-paginated OpenAlex works API: bounded parallel
//! fetches, a shared request permit pool, and per-author partial-failure
//! tolerance.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use scholia_core::ProgressContext;
//! use scholia_openalex::{Config, fetch_many};
//!
//! let config = Config::default();
//! let progress = Arc::new(ProgressContext::new());
//! let ids = vec!["A5023888391".to_string()];
//!
//! let (works, summary) = fetch_many(&config, &ids, &progress);
//! summary.log();
//! println!("{} authors with works", works.len());
//! ```

pub mod abstract_decode;
pub mod api;
pub mod config;
pub mod paginator;
pub mod runner;
pub mod work;

// Re-exports for convenience
pub use api::ApiClient;
pub use config::Config;
pub use paginator::{FetchOutcome, fetch_author_works};
pub use runner::{RunSummary, fetch_many};
pub use work::{Authorship, WorkRow};
