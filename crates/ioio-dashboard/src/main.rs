//! # ioio-dashboard CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ioio_dashboard::commands::delete::{run_delete, DeleteArgs};
use ioio_dashboard::commands::show::{run_show, ShowArgs};
use ioio_dashboard::commands::view::{run_view, ViewArgs};
use ioio_dashboard::{ApiClient, DEFAULT_API_URL};

/// IOIO inquiry dashboard
///
/// Totals, recent activity and tables of property and service inquiries,
/// read from the Submission API.
#[derive(Parser, Debug)]
#[command(name = "ioio-dashboard", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Base URL of the Submission API.
    #[arg(long, env = "IOIO_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show statistics and both tables (default).
    Show(ShowArgs),

    /// Show every field of one record.
    View(ViewArgs),

    /// Delete one record.
    Delete(DeleteArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level. Logs go to stderr so
    // tables on stdout stay clean.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let client = match ApiClient::new(&cli.api_url) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };
    tracing::debug!(api_url = %cli.api_url, "ioio-dashboard starting");

    let result = match cli.command.unwrap_or(Commands::Show(ShowArgs::default())) {
        Commands::Show(args) => run_show(&args, &client).await,
        Commands::View(args) => run_view(&args, &client).await,
        Commands::Delete(args) => run_delete(&args, &client).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
