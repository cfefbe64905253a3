mod config;
mod output;
mod registry;
mod samples;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rtb_argparse::{OptionSpec, ParseError, ParseOutcome};
use rtb_client::{Credentials, HttpTransport, ServiceEndpoint};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::Settings;
use crate::registry::SampleEnv;

#[derive(Parser)]
#[command(name = "rtb-samples")]
#[command(version, about = "Runnable samples for the Real-time Bidding API", long_about = None)]
struct Cli {
    /// Path to the config file (default: ./rtb-samples.json when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available samples
    List(ListArgs),

    /// Run a sample; arguments after the sample name belong to the sample
    #[command(disable_help_flag = true)]
    Run(RunArgs),
}

#[derive(Parser)]
struct ListArgs {
    /// Print samples and their options as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct RunArgs {
    /// Dotted sample name, e.g. bidders.pretargeting_configs.list
    #[arg(value_name = "SAMPLE")]
    sample: String,

    /// Sample arguments; pass --help to see them
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    args: Vec<String>,
}

/// The requested sample is not in the catalog.
#[derive(Debug, thiserror::Error)]
#[error("unknown sample '{0}'; run `rtb-samples list` to see available samples")]
struct UnknownSample(String);

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List(args) => list(args),
        Commands::Run(args) => run(args, cli.config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            exit_code(&err)
        }
    }
}

/// Input errors exit with 2; configuration and remote failures with 1.
fn exit_code(err: &anyhow::Error) -> ExitCode {
    if err.downcast_ref::<ParseError>().is_some() || err.downcast_ref::<UnknownSample>().is_some()
    {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

fn report(err: &anyhow::Error) {
    if let Some(parse) = err.downcast_ref::<ParseError>() {
        eprintln!("error: {parse}");
        return;
    }
    eprintln!("error: {err:#}");
}

#[derive(Serialize)]
struct SampleSummary<'a> {
    name: &'a str,
    description: &'a str,
    options: Vec<OptionSpec>,
}

fn list(args: ListArgs) -> Result<()> {
    let catalog = registry::catalog();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.json {
        let summaries: Vec<SampleSummary<'_>> = catalog
            .iter()
            .map(|s| SampleSummary {
                name: s.name,
                description: s.description,
                options: s.option_set().options().to_vec(),
            })
            .collect();
        serde_json::to_writer_pretty(&mut out, &summaries)?;
        writeln!(out)?;
        return Ok(());
    }

    let width = catalog.iter().map(|s| s.name.len()).max().unwrap_or(0);
    for sample in catalog {
        writeln!(out, "{:<width$}  {}", sample.name, sample.description)?;
    }
    Ok(())
}

fn run(args: RunArgs, config_path: Option<PathBuf>) -> Result<()> {
    let sample = registry::find(&args.sample).ok_or_else(|| UnknownSample(args.sample.clone()))?;

    let parsed = match sample.option_set().parse(&args.args)? {
        ParseOutcome::Parsed(parsed) => parsed,
        ParseOutcome::Help(text) => {
            print!("{text}");
            return Ok(());
        }
    };

    let loaded = config::load_config(config_path.as_deref())?;
    let settings = Settings::resolve(loaded)?;
    tracing::debug!(
        sample = sample.name,
        endpoint = %settings.realtime_bidding_endpoint,
        max_page_size = settings.max_page_size,
        "running sample"
    );
    for (name, value) in parsed.iter().filter(|(name, _)| parsed.is_explicit(name)) {
        tracing::debug!(option = name, ?value, "sample argument");
    }

    let (rtb, pubsub) = transports(&settings)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = {
        let mut env = SampleEnv::new(&rtb, &pubsub, settings.max_page_size, &mut out);
        (sample.run)(&parsed, &mut env)
    };
    out.flush()?;
    result.with_context(|| format!("sample {} failed", sample.name))
}

fn transports(settings: &Settings) -> Result<(HttpTransport, HttpTransport)> {
    let credentials = Credentials::load(settings.key_file.as_deref())?;
    let rtb_endpoint = ServiceEndpoint::parse(&settings.realtime_bidding_endpoint)
        .context("invalid Real-time Bidding endpoint")?;
    let pubsub_endpoint =
        ServiceEndpoint::parse(&settings.pubsub_endpoint).context("invalid Pub/Sub endpoint")?;

    let rtb = HttpTransport::new(rtb_endpoint, credentials.clone())?;
    let pubsub = HttpTransport::new(pubsub_endpoint, credentials)?;
    Ok((rtb, pubsub))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
