use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use calc_logging::{LogFormat, LogLevel, Logger, LoggingConfig, init_logging};
use calculator::{LocalCalculatorClient, Service};
use calculator_sdk::{ReplOptions, run_repl};
use clap::Parser;
use tokio::io::BufReader;

/// Calculator - interactive integer calculator, no server needed
#[derive(Parser)]
#[command(name = "calc-app")]
#[command(about = "Calculator - interactive integer calculator, no server needed")]
#[command(version)]
struct Cli {
    /// Log level: debug, info, warn or error
    #[arg(long, default_value = "info")]
    log_level: LogLevel,

    /// Log output format: text or json
    #[arg(long, default_value = "text")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&LoggingConfig::new(cli.log_level, cli.log_format))
        .context("Failed to initialize logger")?;

    let log = Logger::tracing();
    log.named("app").info("Calculator application starting");

    let client = LocalCalculatorClient::new(Arc::new(Service::new(&log)));

    let mut stdout = std::io::stdout().lock();
    writeln!(
        stdout,
        "Calculator\n\
         Available operations: add, subtract, multiply, divide\n\
         Format: <operation> <number1> <number2>\n\
         Type 'quit', 'exit' or 'q' to exit\n"
    )?;

    run_repl(
        &client,
        BufReader::new(tokio::io::stdin()),
        &mut stdout,
        ReplOptions::default(),
    )
    .await
    .context("Error reading input")?;

    Ok(())
}
