use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use opc_publisher_service::{db, serve, AppState};

#[derive(Parser, Debug)]
#[command(name = "opc-publisher-service")]
#[command(about = "Reference OPC Publisher REST service", long_about = None)]
struct Args {
    /// Bind address for HTTP server
    #[arg(long, env = "OPC_PUBLISHER_BIND", default_value = "0.0.0.0:9080")]
    bind: String,

    /// Database file path
    #[arg(long, env = "OPC_PUBLISHER_DB")]
    db_path: Option<PathBuf>,

    /// Maximum number of published nodes returned per page
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    page_size: u64,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting OPC Publisher service");

    let db = db::init_db(args.db_path)?;

    let state = Arc::new(AppState {
        db,
        page_size: args.page_size as usize,
    });

    let addr: SocketAddr = args.bind.parse().context("Invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    serve(listener, state).await
}
