use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use calc_logging::{LogFormat, LogLevel, Logger, init_logging};
use calculator::{ServerConfig, ServerOverrides, server};
use clap::Parser;

/// Calculator Server - integer arithmetic over HTTP+JSON
///
/// Settings are layered: defaults, then the YAML file given with --config,
/// then `CALC_SERVER_*` environment variables, then these flags.
#[derive(Parser)]
#[command(name = "calc-server")]
#[command(about = "Calculator Server - integer arithmetic over HTTP+JSON")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind [default: 0.0.0.0]
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on [default: 8080]
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level: debug, info, warn or error [default: info]
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Log output format: text or json [default: text]
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Time allowed to receive a request head, e.g. 5s [default: 5s]
    #[arg(long, value_parser = humantime::parse_duration)]
    read_header_timeout: Option<Duration>,

    /// Time allowed for in-flight requests at shutdown [default: 10s]
    #[arg(long, value_parser = humantime::parse_duration)]
    shutdown_timeout: Option<Duration>,
}

impl Cli {
    fn overrides(&self) -> ServerOverrides {
        ServerOverrides {
            host: self.host,
            port: self.port,
            log_level: self.log_level,
            log_format: self.log_format,
            read_header_timeout: self.read_header_timeout,
            shutdown_timeout: self.shutdown_timeout,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ServerConfig::load(cli.config.as_deref(), cli.overrides())?;
    init_logging(&config.logging()).context("Failed to initialize logger")?;

    let log = Logger::tracing().named("server");
    log.info(format_args!(
        "Starting server on {} (log level {}, format {})",
        config.bind_addr(),
        config.log_level,
        config.log_format
    ));

    if let Err(e) = server::run(&config, &log).await {
        log.fatal(format_args!("Server failed: {e}"));
        return Err(e.into());
    }

    tracing::info!("Server exited");
    Ok(())
}
