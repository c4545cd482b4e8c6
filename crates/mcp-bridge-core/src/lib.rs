//! MCP Bridge Core - line-delimited JSON-RPC over stdio to an HTTP endpoint.
//!
//! A process that only speaks newline-delimited JSON-RPC on its standard
//! streams can use this crate to talk to a JSON-RPC server reachable over
//! HTTP, whose replies come back either as a JSON body or as a Server-Sent
//! Events stream.
//!
//! # Architecture
//!
//! - **Frame reader** (`frame`): splits input into trimmed, non-blank lines
//! - **Sequencer** (`sequencer`): single worker, one upstream call at a time, in order
//! - **Transport** (`transport`): one POST per line, session header round-tripping
//! - **Extractor** (`sse`): plain JSON or SSE `data:` payload reassembly
//! - **Translator** (`translate`): every failure becomes a JSON-RPC error reply
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_bridge_core::{Bridge, BridgeConfig};
//!
//! #[tokio::main]
//! async fn main() -> mcp_bridge_core::Result<()> {
//!     let config = BridgeConfig::new("http://127.0.0.1:3845/mcp")?;
//!     let bridge = Bridge::new(config)?;
//!
//!     let stdin = tokio::io::BufReader::new(tokio::io::stdin());
//!     let processed = bridge.run(stdin, tokio::io::stdout()).await?;
//!     eprintln!("bridged {} requests", processed);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod frame;
pub mod protocol;
pub mod sequencer;
pub mod session;
pub mod sse;
pub mod translate;
pub mod transport;

#[cfg(test)]
mod testing;

pub use config::{BridgeConfig, ProtocolConfig};
pub use error::{BridgeError, Result};
pub use frame::{FrameReader, OutputWriter};
pub use protocol::ErrorEnvelope;
pub use sequencer::Sequencer;
pub use session::SessionTracker;
pub use sse::{Extracted, ResponseFormat};
pub use transport::{HttpTransport, RawResponse, Transport};

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{info, warn};

/// A configured bridge, ready to run over a pair of streams.
pub struct Bridge {
    transport: HttpTransport,
}

impl Bridge {
    /// Create a bridge POSTing to the configured endpoint.
    pub fn new(config: BridgeConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        info!("Bridging stdio to {}", transport.endpoint());
        Ok(Self { transport })
    }

    /// Bridge `input` to the upstream and write replies to `output`.
    ///
    /// Runs until `input` reaches EOF, then waits for every line already read
    /// to be answered. Returns the number of lines processed. Stops without
    /// waiting for more input if writing to `output` fails.
    pub async fn run<R, W>(self, input: R, output: W) -> Result<u64>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let mut frames = FrameReader::new(input);
        let sequencer = Sequencer::spawn(self.transport, OutputWriter::new(output));

        let read_result = loop {
            let frame = tokio::select! {
                frame = frames.next_frame() => frame,
                // Worker stopped; finish() reports why.
                _ = sequencer.stopped() => break Ok(()),
            };

            match frame {
                Ok(Some(line)) => {
                    if sequencer.submit(line).is_err() {
                        break Ok(());
                    }
                }
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            }
        };

        let processed = sequencer.finish().await?;
        if let Err(e) = read_result {
            warn!("Stopped reading input: {}", e);
            return Err(e);
        }

        info!("Input closed; {} requests bridged", processed);
        Ok(processed)
    }
}
