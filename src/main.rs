//! Sitelens main entry point
//!
//! This is the command-line interface for the Sitelens SEO insight crawler.

use anyhow::Context;
use clap::Parser;
use sitelens::crawler::{crawl, CrawlOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitelens: a single-domain SEO insight crawler
///
/// Sitelens crawls one web domain starting from its sitemap (or root),
/// renders each page in a headless browser, and stores SEO signals such
/// as headings, link counts, and keyword density in a SQLite database.
#[derive(Parser, Debug)]
#[command(name = "sitelens")]
#[command(version = "1.0.0")]
#[command(about = "A single-domain SEO insight crawler", long_about = None)]
struct Cli {
    /// Domain to crawl, e.g. example.com
    #[arg(value_name = "DOMAIN")]
    domain: String,

    /// Maximum number of pages to store
    #[arg(long, default_value_t = 50, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    max_pages: usize,

    /// Path to the SQLite insight database
    #[arg(long, default_value = "./insights.db")]
    database: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let options = CrawlOptions::for_domain(cli.domain.clone(), cli.max_pages);
    tracing::info!(
        "crawling {} (up to {} pages, database {})",
        cli.domain,
        cli.max_pages,
        cli.database.display()
    );

    let report = crawl(options, &cli.database)
        .await
        .with_context(|| format!("crawl of {} aborted", cli.domain))?;

    println!(
        "Crawled {}: {} pages stored, {} skipped, {} failed",
        cli.domain, report.pages_persisted, report.skipped, report.failed
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitelens=info,warn"),
            1 => EnvFilter::new("sitelens=debug,info"),
            2 => EnvFilter::new("sitelens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
