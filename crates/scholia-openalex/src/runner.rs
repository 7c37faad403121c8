//! Parallel fetch orchestration across a batch of authors

use std::sync::Mutex;
use std::time::Instant;

use rustc_hash::FxHashMap;

use scholia_core::progress::{SharedProgress, fmt_num};
use scholia_core::{PermitPool, TaskQueue, shutdown_requested};

use crate::api::ApiClient;
use crate::config::Config;
use crate::paginator::fetch_author_works;
use crate::work::WorkRow;

/// Per-author fetch outcome kept for the summary
#[derive(Debug)]
struct TaskStats {
    partial: bool,
    works: usize,
    requests: usize,
}

/// Fetch the works lists for all `author_ids` with bounded parallelism.
///
/// Workers claim authors off a shared queue; one permit pool bounds
/// in-flight requests across all of them. A failed or partial author
/// never cancels its siblings. Authors that yield zero records are
/// omitted from the result map.
pub fn fetch_many(
    config: &Config,
    author_ids: &[String],
    progress: &SharedProgress,
) -> (FxHashMap<String, Vec<WorkRow>>, RunSummary) {
    let start = Instant::now();

    if author_ids.is_empty() {
        log::warn!("No authors to fetch");
        return (FxHashMap::default(), RunSummary::empty());
    }

    log::info!(
        "Fetching works for {} authors ({} workers, {} request permits)",
        fmt_num(author_ids.len()),
        config.concurrency,
        config.rate_limit
    );

    let api = ApiClient::new(config);
    let permits = PermitPool::new(config.rate_limit.max(1));
    let queue = TaskQueue::new(author_ids.to_vec());

    let batch_pb = progress.batch_bar(author_ids.len());
    let results: Mutex<FxHashMap<String, Vec<WorkRow>>> = Mutex::new(FxHashMap::default());
    let stats: Mutex<Vec<TaskStats>> = Mutex::new(Vec::new());

    rayon::scope(|s| {
        for _ in 0..config.concurrency.max(1) {
            s.spawn(|_| {
                while let Some(author_id) = queue.next() {
                    if shutdown_requested() {
                        break;
                    }
                    let pb = progress.task_bar(author_id);
                    pb.set_message("fetching...");

                    let outcome = fetch_author_works(&api, author_id, &permits);

                    pb.finish_and_clear();
                    batch_pb.inc(1);

                    stats.lock().expect("worker thread panicked").push(TaskStats {
                        partial: outcome.partial,
                        works: outcome.works.len(),
                        requests: outcome.requests,
                    });
                    if !outcome.works.is_empty() {
                        results
                            .lock()
                            .expect("worker thread panicked")
                            .insert(author_id.clone(), outcome.works);
                    }
                }
            });
        }
    });

    batch_pb.finish_and_clear();

    let results = results.into_inner().unwrap();
    let stats = stats.into_inner().unwrap();

    let partial = stats.iter().filter(|s| s.partial).count();
    let empty = stats.iter().filter(|s| !s.partial && s.works == 0).count();
    let summary = RunSummary {
        total_authors: author_ids.len(),
        completed: stats.len() - partial - empty,
        partial,
        empty,
        total_works: stats.iter().map(|s| s.works).sum(),
        total_requests: stats.iter().map(|s| s.requests).sum(),
        elapsed: start.elapsed(),
    };

    (results, summary)
}

/// Summary of a batch fetch
#[derive(Debug)]
pub struct RunSummary {
    pub total_authors: usize,
    /// Authors fully fetched with at least one work
    pub completed: usize,
    /// Authors that stopped on a failed page but kept accumulated works
    pub partial: usize,
    /// Authors that yielded no records (omitted from the result map)
    pub empty: usize,
    pub total_works: usize,
    pub total_requests: usize,
    pub elapsed: std::time::Duration,
}

impl RunSummary {
    pub fn empty() -> Self {
        Self {
            total_authors: 0,
            completed: 0,
            partial: 0,
            empty: 0,
            total_works: 0,
            total_requests: 0,
            elapsed: std::time::Duration::ZERO,
        }
    }

    /// True when no author yielded any data at all
    pub fn is_all_empty(&self) -> bool {
        self.total_works == 0
    }

    pub fn log(&self) {
        log::info!("=== Fetch Summary ===");
        log::info!(
            "Authors: {}/{} complete ({} partial, {} empty)",
            self.completed,
            self.total_authors,
            self.partial,
            self.empty
        );
        log::info!(
            "Works: {} across {} requests",
            fmt_num(self.total_works),
            fmt_num(self.total_requests)
        );
        log::info!("Time: {:.1}s", self.elapsed.as_secs_f64());
        if self.total_works > 0 && !self.elapsed.is_zero() {
            let works_per_sec = self.total_works as f64 / self.elapsed.as_secs_f64();
            log::info!("Throughput: {works_per_sec:.0} works/sec");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_summary_empty() {
        let summary = RunSummary::empty();
        assert_eq!(summary.total_authors, 0);
        assert_eq!(summary.completed, 0);
        assert_eq!(summary.partial, 0);
        assert!(summary.is_all_empty());
        assert_eq!(summary.elapsed, std::time::Duration::ZERO);
    }

    #[test]
    fn run_summary_log_does_not_panic() {
        let summary = RunSummary {
            total_authors: 10,
            completed: 7,
            partial: 2,
            empty: 1,
            total_works: 1234,
            total_requests: 15,
            elapsed: std::time::Duration::from_secs(5),
        };
        summary.log();
    }

    #[test]
    fn run_summary_log_zero_works() {
        // Should not panic with zero elapsed time either
        RunSummary::empty().log();
    }
}
