use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use cmsbench::config::{Config, LoggingConfig};
use cmsbench::error::Result;
use cmsbench::report::parse_reports;
use cmsbench::results::{build_document, record_run};

#[derive(Parser, Debug)]
#[command(name = "cmsbench", about = "Collect hey load-test reports into JSON results")]
struct Cli {
    /// TOML config file (defaults to $CMSBENCH_CONFIG)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Print Prometheus metrics to stderr on exit
    #[arg(long, global = true)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a report and write the result document
    Parse {
        /// Report file; reads stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
        /// Scenario label
        #[arg(long)]
        label: Option<String>,
        /// Host identifier recorded in the result
        #[arg(long)]
        hostname: Option<String>,
        /// Result file path
        #[arg(long)]
        output: Option<String>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
        /// Print the result document instead of writing it
        #[arg(long)]
        stdout: bool,
    },
    /// Parse a report and print the structured reports
    Inspect {
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

async fn read_input(input: Option<&Path>) -> Result<String> {
    let text = match input {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };
    Ok(text)
}

async fn run(command: Command, mut config: Config) -> Result<()> {
    match command {
        Command::Parse {
            input,
            label,
            hostname,
            output,
            pretty,
            stdout,
        } => {
            if let Some(label) = label {
                config.run.label = label;
            }
            if let Some(hostname) = hostname {
                config.run.hostname = hostname;
            }
            if let Some(output) = output {
                config.output.path = output;
            }
            config.output.pretty |= pretty;
            config.validate()?;

            let text = read_input(input.as_deref()).await?;
            if stdout {
                let doc = build_document(&text, &config.run)?;
                println!("{}", doc.to_json(config.output.pretty)?);
            } else {
                record_run(&text, &config).await?;
            }
        }
        Command::Inspect { input } => {
            let text = read_input(input.as_deref()).await?;
            let reports = parse_reports(&text)?;
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Load config first (needed for logging setup)
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cmsbench: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.logging);
    cmsbench::metrics::init();

    tracing::debug!(hostname = %config.run.hostname, "cmsbench starting");

    let outcome = run(cli.command, config).await;

    if cli.print_metrics {
        eprint!("{}", cmsbench::metrics::render());
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, kind = e.kind(), "benchmark run failed, no result written");
            ExitCode::FAILURE
        }
    }
}
