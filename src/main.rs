use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use link_harvest::api::config::ApiConfig;
use link_harvest::api::start_server;
use link_harvest::utils::logger::{init_logger, init_stdout_logger};

/// Link scraping and download proxy server
#[derive(Debug, Parser)]
#[command(name = "link-harvest", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory for log files (stdout when omitted)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ApiConfig::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if cli.log_dir.is_some() {
        config.log_dir = cli.log_dir;
    }

    match &config.log_dir {
        Some(dir) => init_logger(dir)?,
        None => init_stdout_logger()?,
    }

    let host = config.host.clone();
    start_server(&host, config.port, Some(config)).await
}
