//! Lock-free task queue distributing fetch tasks across parallel workers

use std::sync::atomic::{AtomicUsize, Ordering};

/// Lock-free queue handing out items to workers.
///
/// Workers call [`next()`](TaskQueue::next) to atomically claim the next
/// item. Items are claimed in submission order, one worker each.
pub struct TaskQueue<T> {
    items: Vec<T>,
    cursor: AtomicUsize,
}

impl<T> TaskQueue<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Claim the next item to process (lock-free)
    pub fn next(&self) -> Option<&T> {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.items.get(i)
    }

    /// Total items in queue
    pub fn total(&self) -> usize {
        self.items.len()
    }
}
