//! # verdict CLI
//!
//! Runs small computations through verdict and renders their outcomes.
//!
//! Usage:
//!   verdict lookup --store <file.json> <key>
//!   verdict delay --ms <n> [--timeout-ms <n>] <value>
//!   verdict panic <message>
//!
//! Examples:
//!   verdict lookup --store records.json user:7
//!   verdict delay --ms 200 42
//!   verdict delay --ms 200 --timeout-ms 50 42
//!   verdict -v panic "index out of range"

mod store;

use clap::{ArgAction, Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use verdict_core::{Fault, Intercept, Outcome};

#[derive(Parser)]
#[command(name = "verdict")]
#[command(author, version, about = "verdict - run a computation, get an outcome")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a record in a JSON store
    Lookup {
        /// Path to the JSON object of records
        #[arg(short, long)]
        store: PathBuf,

        /// Record key
        key: String,
    },
    /// Resolve a value after a delay
    Delay {
        /// Delay before the value resolves, in milliseconds
        #[arg(long, default_value = "100")]
        ms: u64,

        /// Give up after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        value: String,
    },
    /// Panic inside a computation and show what gets captured
    Panic {
        message: String,
    },
}

fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

/// Print the value to stdout or the error message to stderr
fn render<T: fmt::Display>(outcome: &Outcome<T>, verbose: bool) -> ExitCode {
    outcome.visit(
        |value| println!("{}", value),
        |err| {
            eprintln!("error: {}", err);
            if verbose {
                eprintln!("\n{:?}", err);
            }
        },
    );

    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn delayed(value: String, delay: Duration, limit: Option<Duration>) -> Outcome<String> {
    let intercept = Intercept::grouped("delay");

    Outcome::from_async_computation_with(
        || async move {
            let settle = async {
                tokio::time::sleep(delay).await;
                value
            };
            match limit {
                Some(limit) => tokio::time::timeout(limit, settle).await.map_err(|_| {
                    Fault::timeout(format!("no value within {}ms", limit.as_millis()))
                }),
                None => Ok(settle.await),
            }
        },
        &intercept,
    )
    .await
}

fn panicking(message: String) -> Outcome<()> {
    Outcome::from_computation_with(
        move || -> Result<(), Fault> { panic!("{}", message) },
        &Intercept::grouped("demo"),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    // Panics are captured as outcomes; keep the default hook from printing them.
    std::panic::set_hook(Box::new(|info| {
        tracing::debug!(%info, "panic intercepted");
    }));

    let verbose = cli.verbose > 0;
    let code = match cli.command {
        Commands::Lookup { store, key } => render(&store::lookup(&store, &key), verbose),
        Commands::Delay {
            ms,
            timeout_ms,
            value,
        } => {
            let outcome = delayed(
                value,
                Duration::from_millis(ms),
                timeout_ms.map(Duration::from_millis),
            )
            .await;
            render(&outcome, verbose)
        }
        Commands::Panic { message } => {
            let outcome = panicking(message);
            outcome.for_each_err(|err| {
                if let Some(details) = err.details() {
                    tracing::info!(%details, "captured");
                }
            });
            render(&outcome.map_value(|()| "no panic"), verbose)
        }
    };

    Ok(code)
}
