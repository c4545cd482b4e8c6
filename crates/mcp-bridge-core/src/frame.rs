//! Line framing for the stdio side of the bridge.
//!
//! Defines the wire format on stdin/stdout: one UTF-8 JSON document per line.
//!
//! ```text
//! {"jsonrpc":"2.0","id":1,"method":"initialize",...}\n
//! ```
//!
//! Blank lines on input are dropped without producing a reply. Input bytes
//! that are not valid UTF-8 are replaced with U+FFFD, so a corrupt line is
//! rejected downstream like any other malformed request.

use crate::Result;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Splits an input stream into trimmed, non-blank request lines.
pub struct FrameReader<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: AsyncBufRead + Unpin> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    /// Read the next candidate request line.
    ///
    /// Returns `None` on EOF. A last line without a terminator is still
    /// returned.
    pub async fn next_frame(&mut self) -> Result<Option<String>> {
        loop {
            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf).await? == 0 {
                return Ok(None);
            }

            let line = String::from_utf8_lossy(&self.buf);
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }
}

/// Writes one JSON document per line to the output stream.
pub struct OutputWriter<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin> OutputWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write `message` as compact JSON followed by `\n`, then flush.
    pub async fn write_message(&mut self, message: &Value) -> Result<()> {
        let mut line = message.to_string();
        line.push('\n');
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
