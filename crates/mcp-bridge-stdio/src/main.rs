//! MCP stdio bridge - exposes an HTTP (JSON or SSE) MCP server over stdio.
//!
//! Reads newline-delimited JSON-RPC requests from stdin, POSTs each one to
//! the upstream endpoint and writes the reply to stdout. Clients that can
//! only spawn stdio servers can then use servers that only speak HTTP.

use anyhow::{Context, Result};
use clap::Parser;
use mcp_bridge_core::{Bridge, BridgeConfig};
use tokio::io::BufReader;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "mcp-bridge-stdio")]
#[command(about = "Bridge line-delimited JSON-RPC on stdio to an MCP HTTP endpoint")]
struct Args {
    /// Upstream MCP endpoint, e.g. http://127.0.0.1:3845/mcp
    #[arg(long)]
    url: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn init_logging(args: &Args) {
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };

    // stdout carries the protocol; logs must go to stderr.
    let builder = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    if args.json_logs {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let config = BridgeConfig::new(&args.url).context("invalid --url")?;
    let bridge = Bridge::new(config)?;

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        result = bridge.run(stdin, stdout) => {
            let processed = result?;
            info!("Exiting after {} requests", processed);
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, exiting");
            // A pending stdin read would keep the runtime from shutting down.
            std::process::exit(0);
        }
    }

    Ok(())
}
