mod aggregator;
mod cipher;
mod config;
mod engine;
mod gateway;
mod models;
mod source;
mod types;
mod workers;

use std::fs;
use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::{EngineConfig, GatewayConfig};
use crate::engine::{DonationEngine, Report};
use crate::gateway::OmiseGateway;
use crate::source::RecordSource;

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: A single positional argument does not warrant the clap crate yet.
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: async-donation-engine [input].csv.rot128 [log_level:optional] > [report].txt");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        eprintln!("Required environment: OMISE_PUBLIC_KEY, OMISE_SECRET_KEY");
        exit(1);
    }

    let path = &args[1];
    let log_level = args.get(2)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let encrypted = fs::read(path)
        .with_context(|| format!("Unable to read input file [{path}]"))?;

    let engine_config = EngineConfig::from_env()?;
    let gateway_config = GatewayConfig::from_env()
        .context("Unable to configure the payment gateway")?;
    let gateway = Arc::new(OmiseGateway::new(&gateway_config)?);
    let engine = DonationEngine::new(gateway, engine_config);

    info!("Performing donations from [{path}]");

    let source = RecordSource::from_bytes(cipher::decrypt(&encrypted));
    let timer = Instant::now();
    let report = engine.run(source).await?;
    let duration = timer.elapsed();

    info!("Processed donations in: {duration:?}");

    write_report_to_stdout(&report)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Stdout carries the report, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_report_to_stdout(report: &Report) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    write!(output, "{report}")?;
    output.flush()?;

    Ok(())
}
