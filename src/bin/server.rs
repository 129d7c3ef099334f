//! echoline Server Binary
//!
//! Starts the thread-per-connection echo server.

use std::sync::Arc;

use clap::Parser;
use echoline::config::{parse_addr, DEFAULT_BACKLOG};
use echoline::{Config, Server, ShutdownController};
use tracing_subscriber::{fmt, EnvFilter};

/// echoline Server
#[derive(Parser, Debug)]
#[command(name = "echoline-server")]
#[command(about = "Echo every message back behind a fixed marker")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    listen: String,

    /// Listen backlog
    #[arg(short, long, default_value_t = DEFAULT_BACKLOG)]
    backlog: i32,

    /// Do not set SO_REUSEADDR/SO_REUSEPORT
    #[arg(long)]
    no_reuse: bool,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,echoline=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("echoline Server v{}", echoline::VERSION);

    let listen_addr = match parse_addr(&args.listen) {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    // Build config from args
    let config = Config::builder()
        .listen_addr(listen_addr)
        .backlog(args.backlog)
        .reuse_address(!args.no_reuse)
        .build();

    let shutdown = Arc::new(ShutdownController::new());
    if let Err(e) = shutdown.install() {
        tracing::error!("{}", e);
        std::process::exit(1);
    }

    let server = match Server::bind(&config, Arc::clone(&shutdown)) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Server listening on {}, press Ctrl+C to stop",
        server.local_addr()
    );

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
