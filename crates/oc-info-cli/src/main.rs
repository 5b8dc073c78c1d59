//! oc-info - OC registry inspection CLI
//!
//! Summarises the active components of an OC registry.
//!
//! ## Options
//!
//! - `authors`: every author of active components
//! - `dependencies`: every node.js dependency of active components
//! - `plugins`: every registry plugin used by active components
//!
//! `--details` lists the components behind each entry.

mod console;

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use oc_info_core::{
    headline, inspect, render_entries, AggregationKey, ClientConfig, HttpRegistryClient,
    InfoError, InspectRequest, RegistryClient,
};
use tracing::{debug, Level};

use crate::console::Console;

const USAGE: &str = "Usage: oc-info https://your-registry-url.domain.com <option> [--details]

Available options:
* authors :: shows all the authors of active components
* dependencies :: shows all the node.js dependencies of active components
* plugins :: shows all the node.js plugins used by active components

Flags:
* --details :: lists the components contributing to each entry

Any further argument is rejected as a usage error.";

#[derive(Parser, Debug)]
#[command(name = "oc-info")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect the active components of an OC registry", long_about = None)]
#[command(override_usage = "oc-info <REGISTRY_URL> <OPTION> [--details]")]
struct Cli {
    /// Registry root URL
    registry_url: String,

    /// Summary to produce: authors, dependencies or plugins
    option: String,

    /// List the components contributing to each entry
    #[arg(long)]
    details: bool,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json_logs: bool,

    /// User-Agent sent to the registry (default: $OC_INFO_USER_AGENT or oc-info/<version>)
    #[arg(long)]
    user_agent: Option<String>,
}

/// Parsed and validated command line.
#[derive(Debug)]
struct Invocation {
    cli: Cli,
    key: AggregationKey,
}

/// Why the command line was not accepted.
#[derive(Debug)]
enum ArgsError {
    /// `--help` / `--version`: print clap's output and succeed.
    Display(clap::Error),
    /// Usage error with an optional message shown above the usage text.
    Usage(Option<InfoError>),
}

fn parse_args<I, T>(args: I) -> std::result::Result<Invocation, ArgsError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ArgsError::Display(err),
        ErrorKind::MissingRequiredArgument
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => ArgsError::Usage(None),
        _ => ArgsError::Usage(Some(InfoError::Usage(clap_message(&err)))),
    })?;

    let key = cli
        .option
        .parse::<AggregationKey>()
        .map_err(|e| ArgsError::Usage(Some(e)))?;

    Ok(Invocation { cli, key })
}

/// First line of a clap error without its `error: ` prefix.
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string()
}

/// Process outcome, mapped to exit code 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let mut console = Console::stdio();
    let invocation = match parse_args(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(error) => return report_args_error(error, &mut console).into(),
    };

    let level = if invocation.cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    oc_info_core::init_tracing(invocation.cli.json_logs, level);

    let client = match build_client(&invocation.cli) {
        Ok(client) => client,
        Err(err) => {
            let _ = console.error(&format!("{err:#}"));
            return ExitCode::FAILURE;
        }
    };

    execute(invocation, client, &mut console).await.into()
}

/// Print help/version or the usage text for a rejected command line.
fn report_args_error<O: Write, E: Write>(
    error: ArgsError,
    console: &mut Console<O, E>,
) -> Status {
    match error {
        ArgsError::Display(err) => {
            let _ = err.print();
            Status::Success
        }
        ArgsError::Usage(error) => {
            if let Some(error) = error {
                let _ = console.error(&error.to_string());
            }
            let _ = console.error_text(USAGE);
            Status::Failure
        }
    }
}

fn build_client(cli: &Cli) -> Result<Arc<dyn RegistryClient>> {
    let mut config = ClientConfig::from_env();
    if let Some(user_agent) = cli.user_agent.as_deref() {
        config = config.with_user_agent(user_agent);
    }
    debug!(user_agent = %config.user_agent, "building registry client");
    let client = HttpRegistryClient::new(&config).context("Failed to create HTTP client")?;
    Ok(Arc::new(client))
}

/// Run the inspection and print its outcome; any error becomes one error
/// line and [`Status::Failure`].
async fn execute<O: Write, E: Write>(
    invocation: Invocation,
    client: Arc<dyn RegistryClient>,
    console: &mut Console<O, E>,
) -> Status {
    match run(invocation, client, console).await {
        Ok(()) => Status::Success,
        Err(err) => {
            let _ = console.error(&format!("{err:#}"));
            Status::Failure
        }
    }
}

async fn run<O: Write, E: Write>(
    invocation: Invocation,
    client: Arc<dyn RegistryClient>,
    console: &mut Console<O, E>,
) -> Result<()> {
    let Invocation { cli, key } = invocation;
    let request = InspectRequest::new(&cli.registry_url, key).with_details(cli.details);
    let aggregation = inspect(client, &request).await?;

    if aggregation.active_count == 0 {
        console.warn(&format!(
            "No active components found in {}",
            request.registry_url
        ))?;
    }

    console.ok(&headline(&aggregation))?;
    for entry in render_entries(&aggregation) {
        console.line(&entry)?;
    }
    Ok(())
}
