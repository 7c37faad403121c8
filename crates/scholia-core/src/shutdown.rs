//! Graceful shutdown support via atomic flag

use std::sync::atomic::{AtomicBool, Ordering};

static FLAG: AtomicBool = AtomicBool::new(false);

/// Check if shutdown was requested. Fetch workers poll this between
/// authors; in-flight pagination is never interrupted.
pub fn shutdown_requested() -> bool {
    FLAG.load(Ordering::Relaxed)
}

/// Request shutdown. Returns whether it was already requested, so a
/// signal handler can escalate on the second signal.
pub fn request_shutdown() -> bool {
    FLAG.swap(true, Ordering::Relaxed)
}
