//! Wiki-Indexer main entry point
//!
//! This is the command-line interface for the Wiki-Indexer crawler.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wiki_indexer::config::{load_config_with_hash, Config};
use wiki_indexer::crawler::{run_crawl, CrawlMode, CrawlOptions};
use wiki_indexer::output::{
    load_statistics, print_crawl_report, print_statistics, print_term_counts, ranked_counts,
};
use wiki_indexer::storage::{self, open_index};

/// Wiki-Indexer: an incremental same-site crawler
///
/// Wiki-Indexer follows article links outward from a seed page, breadth
/// first, and records term frequencies for each page it visits once.
#[derive(Parser, Debug)]
#[command(name = "wiki-indexer")]
#[command(version)]
#[command(about = "An incremental same-site wiki crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Clear the index before crawling
    #[arg(long)]
    reset: bool,

    /// Load the seed's links into the frontier before crawling
    #[arg(long)]
    prime: bool,

    /// Re-fetch pages even when they are already indexed
    #[arg(long)]
    testing: bool,

    /// Print the pages containing TERM and exit
    #[arg(long, value_name = "TERM", conflicts_with_all = ["dry_run", "stats"])]
    counts: Option<String>,

    /// Show statistics from the index and exit
    #[arg(long, conflicts_with_all = ["dry_run", "counts"])]
    stats: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with_all = ["stats", "counts"])]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config).map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else if let Some(term) = &cli.counts {
        handle_counts(&config, term)?;
    } else {
        let options = CrawlOptions {
            reset: cli.reset,
            prime: cli.prime,
            mode: CrawlMode::from(cli.testing),
        };
        handle_crawl(&config, options).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wiki_indexer=info,warn"),
            1 => EnvFilter::new("wiki_indexer=debug,info"),
            2 => EnvFilter::new("wiki_indexer=trace,debug"),
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

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &Config) {
    println!("=== Wiki-Indexer Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed: {}", config.crawler.seed);
    println!("  Article prefix: {}", config.crawler.article_prefix);
    println!("  Max cycles: {}", config.crawler.max_cycles);
    println!("  Pages to index: {}", config.crawler.pages_to_index);

    println!("\nFetcher:");
    println!("  Content root: {}", config.fetcher.content_root);
    println!("  Block selector: {}", config.fetcher.block_selector);
    println!("  Timeout: {}s", config.fetcher.timeout_secs);
    match &config.fetcher.cache_dir {
        Some(dir) => println!("  Source: saved pages in {}", dir),
        None => println!("  Source: HTTP"),
    }

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  Report terms: {}", config.output.report_terms.join(", "));

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling from {}", config.crawler.seed);
}

/// Handles the --stats mode: shows statistics from the index
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let index = open_index(Path::new(&config.output.database_path))?;
    let stats = load_statistics(&index)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the --counts mode: ranks the pages containing a term
fn handle_counts(config: &Config, term: &str) -> anyhow::Result<()> {
    let index = open_index(Path::new(&config.output.database_path))?;
    let term = term.to_lowercase();
    let ranked = ranked_counts(&index, &term)?;
    print_term_counts(&term, &ranked);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, options: CrawlOptions) -> anyhow::Result<()> {
    if options.reset {
        tracing::info!("Clearing the index before crawling");
    }

    let index = storage::shared(open_index(Path::new(&config.output.database_path))?);

    let report = match run_crawl(config, options, index.clone()).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };
    print_crawl_report(&report);

    let store = storage::lock(&index).context("index lock poisoned")?;
    for term in &config.output.report_terms {
        let ranked = ranked_counts(&*store, term)?;
        print_term_counts(term, &ranked);
    }

    Ok(())
}
