//! echoline Client Binary
//!
//! Interactive client: type a line, get the server's reply.

use std::io;
use std::sync::Arc;

use clap::Parser;
use echoline::config::parse_addr;
use echoline::{Config, Session, ShutdownController};
use tracing_subscriber::{fmt, EnvFilter};

/// echoline Client
#[derive(Parser, Debug)]
#[command(name = "echoline-client")]
#[command(about = "Interactive client for the echoline server")]
#[command(version)]
struct Args {
    /// Server address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    server: String,
}

fn main() {
    // Logs go to stderr; stdout is the conversation
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,echoline=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> echoline::Result<()> {
    let config = Config::builder()
        .server_addr(parse_addr(&args.server)?)
        .build();

    let shutdown = Arc::new(ShutdownController::new());
    shutdown.install()?;

    let session = Session::connect(&config)?;
    shutdown.track(session.get_ref().try_clone()?);

    println!("Connected to server {}", config.server_addr);

    let end = session.run(io::stdin().lock(), io::stdout())?;
    tracing::debug!("Session ended: {:?}", end);

    Ok(())
}
