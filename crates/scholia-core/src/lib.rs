//! Scholia Core - Common infrastructure for the author-works pipeline
//!
//! This crate provides the reusable pieces shared by the fetch and
//! aggregation stages: the request permit pool, the HTTP client facade,
//! the task queue, progress reporting, and logging.

pub mod http;
pub mod logging;
pub mod permit;
pub mod progress;
pub mod queue;
pub mod shutdown;

// Re-exports for convenience
pub use http::{ApiError, SHARED_RUNTIME, http_client, http_get_with_retry};
pub use logging::{IndicatifLogger, init_logging};
pub use permit::{Permit, PermitPool};
pub use progress::{ProgressContext, SharedProgress};
pub use queue::TaskQueue;
pub use shutdown::{request_shutdown, shutdown_requested};
