//! mvc-helper diagnostics server.
//!
//! Serves the request helpers over HTTP so their output can be checked
//! against a real deployment (proxy headers, DNS, path base):
//!
//! ```text
//! GET  /                            → host URL, application URL
//! ANY  /{controller}/{action}       → routing values, client IP, hostname
//! ANY  /admin/{controller}/{action} → same, area "admin"
//! POST /echo                        → raw request body
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use mvc_helper::config::{load_config, HelperConfig};
use mvc_helper::observability::init_logging;
use mvc_helper::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "mvc-helper")]
#[command(about = "Diagnostics server for routing, URL, client and body helpers", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => HelperConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability)?;

    tracing::info!("mvc-helper v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        path_base = %config.site.path_base,
        trust_forwarded_headers = config.site.trust_forwarded_headers,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
