//! Strictly ordered, one-at-a-time request processing.
//!
//! Upstreams require the `initialize` handshake before anything else, so lines
//! are handled by a single worker task in arrival order. The worker owns the
//! transport, the session tracker and the output stream; callers only enqueue
//! lines.
//!
//! # Ordering
//!
//! Line `n + 1` is not parsed or sent until line `n` has been answered (or
//! failed). A failing line never stops the worker. Only a failed write to the
//! output stream does.

use crate::frame::OutputWriter;
use crate::session::SessionTracker;
use crate::transport::Transport;
use crate::translate::process_line;
use crate::{BridgeError, Result};
use tokio::io::AsyncWrite;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Handle to the request worker.
pub struct Sequencer {
    tx: mpsc::UnboundedSender<String>,
    worker: JoinHandle<Result<u64>>,
}

impl Sequencer {
    /// Start the worker on the current tokio runtime.
    pub fn spawn<T, W>(transport: T, writer: OutputWriter<W>) -> Self
    where
        T: Transport,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(transport, writer, rx));
        Self { tx, worker }
    }

    /// Queue a line behind every line submitted before it.
    ///
    /// Fails only if the worker has already stopped.
    pub fn submit(&self, line: String) -> Result<()> {
        self.tx.send(line).map_err(|_| BridgeError::WorkerStopped {
            message: "request queue is closed".to_string(),
        })
    }

    /// Resolves once the worker has stopped taking lines.
    ///
    /// Only happens early when writing to the output stream failed.
    pub async fn stopped(&self) {
        self.tx.closed().await
    }

    /// Close the queue and wait for every queued line to be processed.
    ///
    /// Returns the number of lines processed.
    pub async fn finish(self) -> Result<u64> {
        let Self { tx, worker } = self;
        drop(tx);

        worker.await.map_err(|e| BridgeError::WorkerStopped {
            message: e.to_string(),
        })?
    }
}

async fn run_worker<T, W>(
    transport: T,
    mut writer: OutputWriter<W>,
    mut rx: mpsc::UnboundedReceiver<String>,
) -> Result<u64>
where
    T: Transport,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let mut session = SessionTracker::new();
    let mut processed = 0u64;

    while let Some(line) = rx.recv().await {
        if let Some(message) = process_line(&transport, &mut session, &line).await {
            writer.write_message(&message).await?;
        }
        processed += 1;
    }

    debug!("Request queue drained after {} lines", processed);
    Ok(processed)
}
