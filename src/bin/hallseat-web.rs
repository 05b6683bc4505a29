//! hallseat Web Server Binary
//!
//! This binary starts the hallseat web server that provides a REST API
//! for building seating plans from a browser frontend.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3001)
//! hallseat-web
//!
//! # Specify host and port
//! hallseat-web --host 0.0.0.0 --port 8080
//! ```

use std::net::SocketAddr;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hallseat::config::Config;
use hallseat::web;

/// hallseat Web Server - REST API for seating plans
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Using default configuration: {e:#}");
        Config::default()
    });
    info!(
        "Default layout: {} rows x {} tables x {} seats, {} hall(s)",
        config.layout.rows,
        config.layout.tables_per_row,
        config.layout.seats_per_table,
        config.layout.sections
    );

    // Build socket address
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    // Start the server
    web::run_server(config, addr).await
}
