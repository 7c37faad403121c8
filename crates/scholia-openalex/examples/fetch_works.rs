//! Example: fetch all works for a handful of author ids
//!
//! Usage:
//!   cargo run -p scholia-openalex --example fetch_works -- \
//!     A5023888391 A5017898742 --mailto you@example.org

use std::sync::Arc;

use scholia_core::ProgressContext;
use scholia_openalex::Config;

fn main() {
    scholia_core::init_logging(false, false, None);

    let mut config = Config::default();
    let mut author_ids = Vec::new();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--mailto" => {
                i += 1;
                config.mailto = args.get(i).cloned();
            }
            "--workers" | "-w" => {
                i += 1;
                match args.get(i).and_then(|v| v.parse().ok()) {
                    Some(workers) => config.concurrency = workers,
                    None => {
                        eprintln!("--workers needs a number");
                        std::process::exit(2);
                    }
                }
            }
            "--help" | "-h" => {
                eprintln!("usage: fetch_works [--mailto EMAIL] [--workers N] AUTHOR_ID...");
                return;
            }
            id => author_ids.push(id.to_string()),
        }
        i += 1;
    }

    if author_ids.is_empty() {
        eprintln!("no author ids given");
        std::process::exit(2);
    }

    let progress = Arc::new(ProgressContext::new());
    let (results, summary) = scholia_openalex::fetch_many(&config, &author_ids, &progress);
    summary.log();

    for (author_id, works) in &results {
        log::info!("{author_id}: {} works", works.len());
    }
}
