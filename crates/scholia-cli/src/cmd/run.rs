//! Run subcommand - fetch and aggregate in one pass

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use scholia_aggregate::{
    Aggregator, build_pair_rows, read_id_list, read_id_set, write_group_rows, write_pair_rows,
};
use scholia_core::SharedProgress;
use scholia_core::progress::fmt_num;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// File with author ids, one per line
    #[arg(short, long)]
    pub authors: PathBuf,

    /// File with relevant work ids, one per line (flags matching works)
    #[arg(short, long)]
    pub relevant: Option<PathBuf>,

    /// Output CSV for (work, author) pair rows
    #[arg(long, default_value = "authors_works.csv")]
    pub pairs: PathBuf,

    /// Output CSV for per-group summary rows
    #[arg(long, default_value = "authors_works_aggregated.csv")]
    pub summary: PathBuf,

    /// Number of parallel author fetches
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// In-flight request permits shared across fetches
    #[arg(long)]
    pub rate_limit: Option<usize>,

    /// Email for the polite pool
    #[arg(long)]
    pub mailto: Option<String>,
}

pub fn run(args: RunArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let author_ids = read_id_list(&args.authors)?;
    anyhow::ensure!(
        !author_ids.is_empty(),
        "No author ids in {}",
        args.authors.display()
    );

    let relevant = match &args.relevant {
        Some(path) => read_id_set(path)?,
        None => Default::default(),
    };

    let mut oa_config = config.openalex();
    if let Some(workers) = args.workers {
        oa_config.concurrency = workers;
    }
    if let Some(rate_limit) = args.rate_limit {
        oa_config.rate_limit = rate_limit;
    }
    if args.mailto.is_some() {
        oa_config.mailto = args.mailto.clone();
    }

    log::info!("Running full pipeline for {} authors", author_ids.len());

    // Stage 1: fetch
    let (works, summary) = scholia_openalex::fetch_many(&oa_config, &author_ids, progress);
    summary.log();
    if summary.is_all_empty() {
        anyhow::bail!("No author yielded any works");
    }
    if summary.partial > 0 {
        log::warn!(
            "{} of {} authors returned partial results",
            summary.partial,
            summary.total_authors
        );
    }

    // Stage 2: dedup into pair rows
    let pair_rows = build_pair_rows(&author_ids, &works, &relevant);
    write_pair_rows(&args.pairs, &pair_rows)?;

    // Stage 3: group and summarize
    let mut aggregator = Aggregator::new();
    for row in &pair_rows {
        aggregator.observe(row);
    }
    let groups = aggregator.summarize();
    write_group_rows(&args.summary, &groups)?;

    super::print_summary(
        "Run",
        &[
            (
                "Authors",
                format!(
                    "{}/{} ({} partial, {} empty)",
                    summary.completed, summary.total_authors, summary.partial, summary.empty
                ),
            ),
            ("Works", fmt_num(summary.total_works)),
            ("Pair rows", fmt_num(pair_rows.len())),
            ("Author groups", fmt_num(groups.len())),
            ("Pairs output", args.pairs.display().to_string()),
            ("Summary output", args.summary.display().to_string()),
            ("Time", format!("{:.1}s", summary.elapsed.as_secs_f64())),
        ],
    );

    Ok(())
}
