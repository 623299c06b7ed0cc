//! link-sieve main entry point
//!
//! Command-line access to the crawl step: validate URLs against the configured
//! scope, or run one crawl step on a local or fetched page.

use anyhow::Context;
use clap::{Parser, Subcommand};
use link_sieve::config::{load_config_with_hash, Config};
use link_sieve::crawler::{build_http_client, fetch_page, CrawlStep, PageResponse};
use link_sieve::url::{UrlValidator, Verdict};
use link_sieve::LinkOutcome;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// link-sieve: decide which links on a crawled page belong in the frontier
///
/// Links are filtered by per-domain politeness, crawl scope and file type,
/// and crawl-trap detection.
#[derive(Parser, Debug)]
#[command(name = "link-sieve")]
#[command(version)]
#[command(about = "Link discovery and crawl control for a focused crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check URLs against the crawl scope without touching trap counts
    Check {
        /// URLs to validate
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Run one crawl step and print the links that survive
    Step {
        /// Absolute URL of the page
        page_url: String,

        /// Read the page body from this file instead of fetching it
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,

        /// Status code to pair with --html
        #[arg(long, default_value_t = 200, requires = "html")]
        status: u16,
    },

    /// Print the effective configuration and exit
    ShowConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load(cli.config.as_ref())?;

    match cli.command {
        Command::Check { urls } => Ok(handle_check(&config, &urls)),
        Command::Step {
            page_url,
            html,
            status,
        } => handle_step(&config, &page_url, html, status).await,
        Command::ShowConfig => {
            handle_show_config(&config);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_sieve=info,warn"),
            1 => EnvFilter::new("link_sieve=debug,info"),
            2 => EnvFilter::new("link_sieve=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn load(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Handles `check`: one line per URL, non-zero exit if any URL is malformed
fn handle_check(config: &Config, urls: &[String]) -> ExitCode {
    let validator = UrlValidator::new(&config.scope);
    let mut malformed = false;

    for url in urls {
        match validator.check(url) {
            Ok(Verdict::Accept) => println!("valid\t{}", url),
            Ok(Verdict::Reject(reason)) => println!("invalid ({})\t{}", reason, url),
            Err(e) => {
                malformed = true;
                println!("error ({})\t{}", e, url);
            }
        }
    }

    if malformed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Handles `step`: builds a page response, runs one crawl step, prints survivors
async fn handle_step(
    config: &Config,
    page_url: &str,
    html: Option<PathBuf>,
    status: u16,
) -> anyhow::Result<ExitCode> {
    let response = match html {
        Some(path) => {
            let body = std::fs::read(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            PageResponse::new(status, Some(body))
        }
        None => {
            let client = build_http_client(&config.fetch)?;
            fetch_page(&client, page_url).await?
        }
    };

    let step = CrawlStep::new(config);
    tracing::debug!(
        "Politeness interval {:?}, trap threshold {} visits",
        step.gate().min_interval(),
        step.traps().max_visits()
    );
    let report = step.step_with_report(page_url, &response).await?;

    for link in &report.accepted {
        println!("{}", link);
    }

    let mut by_outcome: BTreeMap<String, usize> = BTreeMap::new();
    for (link, outcome) in &report.rejected {
        tracing::debug!("Dropped {} ({})", link, outcome);
        *by_outcome.entry(outcome.to_string()).or_default() += 1;
    }
    let filtered = report
        .rejected
        .iter()
        .filter(|(_, outcome)| outcome.is_filtered())
        .count();
    tracing::info!(
        "{} of {} links kept, {} filtered by policy",
        report.accepted.len(),
        report.candidates(),
        filtered
    );
    for (outcome, count) in &by_outcome {
        tracing::info!("  {}: {}", outcome, count);
    }

    if report.count(LinkOutcome::Malformed) > 0 {
        tracing::warn!(
            "{} malformed link(s) dropped",
            report.count(LinkOutcome::Malformed)
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Handles `show-config`: prints the effective configuration
fn handle_show_config(config: &Config) {
    println!("=== link-sieve configuration ===\n");

    println!("Politeness:");
    println!("  Minimum interval: {}ms", config.politeness.min_interval_ms);

    println!("\nAllowed domains ({}):", config.scope.allowed_domains.len());
    for domain in &config.scope.allowed_domains {
        println!("  - {}", domain);
    }

    println!("\nRestricted paths ({}):", config.scope.restricted_paths.len());
    for restriction in &config.scope.restricted_paths {
        println!("  - {} -> {}", restriction.domain, restriction.path_prefix);
    }

    println!(
        "\nDisallowed extensions ({}):\n  {}",
        config.scope.disallowed_extensions.len(),
        config.scope.disallowed_extensions.join(" ")
    );

    println!("\nTrap detection:");
    println!("  Max visits per base URL: {}", config.trap.max_visits);
    if config.trap.path_heuristic {
        println!(
            "  Path heuristic: on (length > {}, or {}+ nested segments)",
            config.trap.max_path_length, config.trap.max_path_segments
        );
    } else {
        println!("  Path heuristic: off");
    }

    println!("\nFetch:");
    println!("  User agent: {}", config.fetch.user_agent);
    println!("  Timeout: {}s", config.fetch.timeout_secs);
}
