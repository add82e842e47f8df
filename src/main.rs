//! User Directory Search - Command Line Interface
//!
//! This binary loads a user directory (by default the public placeholder endpoint),
//! indexes it, and answers prefix searches over names, usernames and email addresses.
//!
//! # Commands
//!
//! - **`search`** - Runs a single search and prints the matching users
//! - **`interactive`** - Treats every stdin line as the current value of a search field;
//!   results are printed once typing settles. The line `:clear` clears the field.
//! - **`info`** - Displays statistics about the loaded directory and its index
//!
//! # Usage Examples
//!
//! ```bash
//! # Search the default directory
//! usersearch search bre
//!
//! # Search a local copy
//! usersearch --source ./users.json search "lean"
//!
//! # Type-ahead session with a 150ms settle period
//! usersearch --settle-ms 150 interactive
//!
//! # Index statistics
//! usersearch info
//! ```
//!
//! # Configuration
//!
//! `USERSEARCH_SOURCE` and `USERSEARCH_SETTLE_MS` set defaults; flags override them.
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `warn`).
//!
//! # Exit Codes
//!
//! - `0` - Success (including searches with no matches)
//! - `1` - The directory could not be loaded, or stdin failed

use std::process;
use std::time::Duration;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::error;
use tracing_subscriber::EnvFilter;
use usersearch::config::SearchConfig;
use usersearch::searching::query_pipeline::{QueryPipeline, SearchState, search_input};
use usersearch::searching::search_results::{LatestResults, SearchOutcome, SearchResults};

/// Command to clear the search field in interactive mode.
const CLEAR_COMMAND: &str = ":clear";

#[derive(Parser, Debug)]
#[command(name = "usersearch", version, about = "Prefix search over a user directory")]
struct Cli {
    /// URL, s3:// URI or local path of the user collection JSON
    #[arg(long, global = true)]
    source: Option<String>,

    /// Quiet period in milliseconds before a typed term is searched
    #[arg(long, global = true)]
    settle_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search once and print the matching users
    Search {
        /// Name, username or email prefix; empty lists everyone
        term: String,
    },
    /// Read search field values from stdin, one per line
    Interactive,
    /// Show statistics about the directory and its index
    Info,
}

/// Entry point for the directory search CLI.
///
/// Installs logging, resolves configuration (environment first, then flags), loads the
/// directory once, and dispatches to the requested command. A failed load prints the
/// user-facing message, logs the cause, and exits with code 1.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = SearchConfig::load();
    if let Some(source) = cli.source {
        config.source = source;
    }
    if let Some(settle_ms) = cli.settle_ms {
        config.settle_period = Duration::from_millis(settle_ms);
    }

    let mut state = SearchState::load(&config.source).await;
    if let Some(message) = state.message() {
        eprintln!("{}", message);
        process::exit(1);
    }

    match cli.command {
        Command::Search { term } => handle_search(&mut state, &term),
        Command::Interactive => {
            if let SearchState::Ready(pipeline) = state {
                handle_interactive(pipeline, config.settle_period).await;
            }
        }
        Command::Info => handle_info(&state, &config),
    }
}

/// Handles the `search` command: one immediate search, no debounce.
fn handle_search(state: &mut SearchState, term: &str) {
    match state.handle_search(term) {
        SearchOutcome::Results(results) => print_results(&results),
        outcome @ (SearchOutcome::Loading | SearchOutcome::LoadFailed) => {
            eprintln!("{}", outcome.message().unwrap_or("Users are still loading."));
            process::exit(1);
        }
    }
}

/// Handles the `interactive` command.
///
/// Each stdin line is a full field value and goes through the debouncer, so pasting
/// many lines at once only searches the last one. Results are printed through a
/// [`LatestResults`] slot so nothing superseded is ever shown.
async fn handle_interactive(mut pipeline: QueryPipeline, settle_period: Duration) {
    let (input, mut debouncer) = search_input(settle_period);
    let (results_tx, mut results_rx) = mpsc::channel::<SearchResults>(16);

    let runner = tokio::spawn(async move {
        pipeline.run(&mut debouncer, results_tx).await
    });

    let printer = tokio::spawn(async move {
        let mut latest = LatestResults::default();
        while let Some(results) = results_rx.recv().await {
            if latest.offer(results) {
                if let Some(current) = latest.current() {
                    print_results(current);
                }
            }
        }
    });

    println!(
        "Type to search ({}ms settle). '{}' clears, Ctrl-D exits.",
        settle_period.as_millis(),
        CLEAR_COMMAND
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut exit_code = 0;
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let sent = if line.trim() == CLEAR_COMMAND {
                    input.clear().await
                } else {
                    input.change(line).await
                };
                if sent.is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read stdin: {e}");
                exit_code = 1;
                break;
            }
        }
    }

    drop(input);
    match runner.await {
        Ok(searches) => tracing::debug!(searches, "interactive session finished"),
        Err(e) => {
            error!("Search pipeline task failed: {e}");
            exit_code = 1;
        }
    }
    if let Err(e) = printer.await {
        error!("Result printer task failed: {e}");
        exit_code = 1;
    }

    if exit_code != 0 {
        process::exit(exit_code);
    }
}

/// Handles the `info` command.
fn handle_info(state: &SearchState, config: &SearchConfig) {
    let SearchState::Ready(pipeline) = state else {
        return;
    };
    let directory = pipeline.directory();
    let stats = directory.index().stats();

    println!("Directory Information for: {}", config.source);
    println!("  Users:            {}", directory.len());
    println!("  Token insertions: {}", stats.tokens_inserted);
    println!("  Distinct tokens:  {}", stats.distinct_tokens);
    println!("  Trie nodes:       {}", stats.node_count);
    println!("  Settle period:    {}ms", config.settle_period.as_millis());
}

fn print_results(results: &SearchResults) {
    if let Some(message) = results.message() {
        println!("{}", message);
        return;
    }

    if results.is_filtered() {
        println!("{} user(s) matching '{}':", results.len(), results.term);
    } else {
        println!("All {} user(s):", results.len());
    }
    for user in &results.users {
        println!("  [{}] {}", user.initial().unwrap_or('?'), user);
        if !user.company.catch_phrase.is_empty() {
            println!("    \"{}\"", user.company.catch_phrase);
        }
    }
}
