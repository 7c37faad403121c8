//! Counting permit pool bounding in-flight API requests.
//!
//! Uses `Mutex + Condvar` from std — no external dependencies. The pool
//! caps the aggregate request rate across all fetch workers; it is a
//! separate bound from the worker count, and the two compose (e.g. 5
//! workers sharing 10 request permits).

use std::sync::{Condvar, Mutex};

/// A counting permit pool limiting concurrent access to the upstream API.
pub struct PermitPool {
    available: Mutex<usize>,
    cond: Condvar,
}

/// RAII guard that returns one permit on drop.
pub struct Permit<'a>(&'a PermitPool);

impl PermitPool {
    /// Create a pool with `capacity` permits.
    pub fn new(capacity: usize) -> Self {
        Self {
            available: Mutex::new(capacity),
            cond: Condvar::new(),
        }
    }

    /// Block until a permit is available, then take it.
    pub fn acquire(&self) -> Permit<'_> {
        let mut count = self.available.lock().unwrap();
        while *count == 0 {
            count = self.cond.wait(count).unwrap();
        }
        *count -= 1;
        Permit(self)
    }

    /// Permits currently available (snapshot, for diagnostics).
    pub fn available(&self) -> usize {
        *self.available.lock().unwrap()
    }
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        let mut count = self.0.available.lock().unwrap();
        *count += 1;
        self.0.cond.notify_one();
    }
}
