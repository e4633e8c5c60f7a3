//! leetcode-export main entry point
//!
//! This is the command-line interface for exporting a LeetCode account's
//! solved problems and accepted submissions as JSON.

use anyhow::Context;
use clap::Parser;
use leetcode_export::config::{
    load_config, resolve_credentials, validate, Config, CredentialOverrides,
};
use leetcode_export::output::{log_summary, write_export};
use leetcode_export::Exporter;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// leetcode-export: Export solved problems and accepted submissions
///
/// Authenticates with a browser session cookie and CSRF token, walks every
/// solved problem and writes one JSON document with profile statistics,
/// problem metadata and the latest accepted submission per language.
#[derive(Parser, Debug)]
#[command(name = "leetcode-export")]
#[command(version)]
#[command(about = "Export solved LeetCode problems and accepted submissions", long_about = None)]
struct Cli {
    /// Account username
    #[arg(long)]
    username: Option<String>,

    /// Value of the LEETCODE_SESSION cookie
    #[arg(long)]
    session: Option<String>,

    /// Value of the csrftoken cookie
    #[arg(long)]
    csrf: Option<String>,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the export to this file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write compact JSON instead of indented JSON
    #[arg(long)]
    compact: bool,

    /// Override the service base URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", diagnostic_line(&e));
            ExitCode::FAILURE
        }
    }
}

/// The single line printed for a fatal error, context chain included
fn diagnostic_line(error: &anyhow::Error) -> String {
    format!("Error: {:#}", error)
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to standard error so the JSON document on standard output stays
/// clean.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("leetcode_export=info,warn"),
            1 => EnvFilter::new("leetcode_export=debug,info"),
            2 => EnvFilter::new("leetcode_export=trace,debug"),
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

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(base_url) = cli.base_url {
        config.service.base_url = base_url;
    }
    validate(&config).context("invalid configuration")?;

    let credentials = resolve_credentials(
        &config,
        CredentialOverrides {
            username: cli.username,
            session: cli.session,
            csrf_token: cli.csrf,
        },
    )
    .context("invalid credentials")?;

    let output_path = cli
        .output
        .or_else(|| config.output.path.as_ref().map(PathBuf::from));
    let pretty = config.output.pretty && !cli.compact;

    let exporter = Exporter::new(config, credentials).context("failed to set up HTTP client")?;
    let outcome = exporter.run().await?;

    log_summary(&outcome.document, &outcome.stats);

    write_export(&outcome.document, output_path.as_deref(), pretty)
        .with_context(|| match output_path.as_deref() {
            Some(path) => format!("failed to write export to {}", path.display()),
            None => "failed to write export to standard output".to_string(),
        })?;

    Ok(())
}
