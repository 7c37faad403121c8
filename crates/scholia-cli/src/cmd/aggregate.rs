//! Aggregate subcommand - group pair rows and summarize per author

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use scholia_aggregate::{Aggregator, read_pair_rows, write_group_rows};
use scholia_core::progress::fmt_num;

#[derive(Args, Debug)]
pub struct AggregateArgs {
    /// Input CSV of (work, author) pair rows
    #[arg(short, long, default_value = "authors_works.csv")]
    pub input: PathBuf,

    /// Output CSV for per-group summary rows
    #[arg(short, long, default_value = "authors_works_aggregated.csv")]
    pub output: PathBuf,
}

pub fn run(args: AggregateArgs) -> Result<()> {
    let rows = read_pair_rows(&args.input)?;
    anyhow::ensure!(!rows.is_empty(), "No pair rows in {}", args.input.display());

    let mut aggregator = Aggregator::new();
    for row in &rows {
        aggregator.observe(row);
    }
    let groups = aggregator.summarize();

    log::info!(
        "Aggregated {} pair rows into {} author groups",
        fmt_num(rows.len()),
        fmt_num(groups.len())
    );
    write_group_rows(&args.output, &groups)?;

    super::print_summary(
        "Aggregate",
        &[
            ("Pair rows", fmt_num(rows.len())),
            ("Author groups", fmt_num(groups.len())),
            ("Output", args.output.display().to_string()),
        ],
    );

    Ok(())
}
