//! scholia - author-works fetch and aggregation CLI
//!
//! Fetches the complete works lists for a set of OpenAlex author ids,
//! exports deduplicated (work, author) rows, and aggregates per-author
//! statistics grouped by normalized name.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "scholia")]
#[command(about = "Fetch author works from OpenAlex and aggregate per-author statistics")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./scholia.toml or ~/.config/scholia/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch author works and export deduplicated (work, author) rows
    Fetch(cmd::fetch::FetchArgs),
    /// Aggregate pair rows into per-author-group summaries
    Aggregate(cmd::aggregate::AggregateArgs),
    /// Fetch and aggregate in one pass
    Run(cmd::run::RunArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Progress context (TTY auto-detect)
    let progress = Arc::new(scholia_core::ProgressContext::new());

    // Logging:
    //   TTY:     quiet (warn) unless --debug  — progress bars show activity
    //   non-TTY: info unless --debug          — logs are the only progress indicator
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = if is_tty { !cli.debug } else { false };
    scholia_core::init_logging(quiet, cli.debug, multi);

    setup_signal_handlers();

    // Load configuration
    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Fetch(args) => cmd::fetch::run(args, &config, &progress),
        Command::Aggregate(args) => cmd::aggregate::run(args),
        Command::Run(args) => cmd::run::run(args, &config, &progress),
        Command::Config => {
            cmd::print_summary(
                "Setting",
                &[
                    ("API base URL", config.api.base_url.clone()),
                    (
                        "Mailto",
                        config
                            .api
                            .mailto
                            .clone()
                            .unwrap_or_else(|| "not set".to_string()),
                    ),
                    ("Page size", config.api.per_page.to_string()),
                    ("Workers", config.fetch.concurrency.to_string()),
                    ("Rate limit", config.fetch.rate_limit.to_string()),
                    ("Max retries", config.fetch.max_retries.to_string()),
                ],
            );
            Ok(())
        }
    }
}

fn setup_signal_handlers() {
    // First signal: finish in-flight authors, skip the rest.
    // Second signal: force exit.
    // SAFETY: atomic swap and process::exit are async-signal-safe
    unsafe {
        for sig in [signal_hook::consts::SIGTERM, signal_hook::consts::SIGINT] {
            signal_hook::low_level::register(sig, || {
                if scholia_core::request_shutdown() {
                    std::process::exit(130);
                }
            })
            .expect("Failed to register signal handler");
        }
    }
}
