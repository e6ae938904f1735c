use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use calc_logging::{LogFormat, LogLevel, LoggingConfig, init_logging};
use calculator_sdk::{ClientConfig, HttpCalculatorClient, ReplOptions, run_repl};
use clap::Parser;
use tokio::io::BufReader;

/// Calculator Client - interactive front end for calc-server
#[derive(Parser)]
#[command(name = "calc-client")]
#[command(about = "Calculator Client - interactive front end for calc-server")]
#[command(version)]
struct Cli {
    /// Calculator service URL
    #[arg(long, default_value = "http://localhost:8080")]
    server: String,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    /// Log level: debug, info, warn or error
    #[arg(long, default_value = "warn")]
    log_level: LogLevel,
}

const BANNER: &str = "\
Calculator Client
Available operations: add, subtract, multiply, divide
Format: <operation> <number1> <number2>
Type 'quit', 'exit' or 'q' to exit";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(&LoggingConfig::new(cli.log_level, LogFormat::Text))
        .context("Failed to initialize logger")?;

    let config = ClientConfig::new(cli.server, Duration::from_secs(cli.timeout));
    tracing::info!(server = %config.server_url, timeout = ?config.timeout, "connecting");

    let client = match HttpCalculatorClient::connect(config).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            println!("Error: Calculator service is not available");
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{BANNER}\n")?;

    run_repl(
        &client,
        BufReader::new(tokio::io::stdin()),
        &mut stdout,
        ReplOptions { echo_input: true },
    )
    .await
    .context("Error reading input")?;

    Ok(ExitCode::SUCCESS)
}
