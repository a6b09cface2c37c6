use futures_util::SinkExt;
use tokio::io::AsyncWrite;
use tokio_util::codec::FramedWrite;

use crate::codec::{FrameConfig, LineCodec};
use crate::error::{FrameError, Result};
use crate::message::Message;

/// Writes terminated lines to any `AsyncWrite` stream.
///
/// Each line is written and flushed under the configured write deadline.
pub struct LineWriter<W> {
    inner: FramedWrite<W, LineCodec>,
    config: FrameConfig,
}

impl<W: AsyncWrite + Unpin> LineWriter<W> {
    /// Create a new line writer with default configuration.
    pub fn new(inner: W) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new line writer with explicit configuration.
    pub fn with_config(inner: W, config: FrameConfig) -> Self {
        Self {
            inner: FramedWrite::new(inner, LineCodec),
            config,
        }
    }

    /// Serialize and send one message.
    ///
    /// A message that does not fit fails with
    /// [`FrameError::MessageTooLong`] before anything is written.
    pub async fn write_message(&mut self, message: &Message) -> Result<()> {
        let line = message.serialize()?;
        self.write_line(&line).await
    }

    /// Send one pre-serialized line. The terminator is appended.
    ///
    /// Lines longer than the configured payload limit fail with
    /// [`FrameError::MessageTooLong`].
    pub async fn write_line(&mut self, line: &str) -> Result<()> {
        let max = self.config.max_payload();
        if line.len() > max {
            return Err(FrameError::MessageTooLong {
                message: line.to_string(),
                truncated: line.len() - max,
            });
        }
        self.send(line.to_string()).await
    }

    async fn send(&mut self, line: String) -> Result<()> {
        match self.config.write_timeout {
            Some(limit) => tokio::time::timeout(limit, self.inner.send(line))
                .await
                .map_err(|_| FrameError::WriteTimeout(limit))?,
            None => self.inner.send(line).await,
        }
    }

    /// Flush pending output and shut down the write side of the stream.
    pub async fn shutdown(&mut self) -> Result<()> {
        self.inner.close().await
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &W {
        self.inner.get_ref()
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut W {
        self.inner.get_mut()
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }

    /// Current line writer configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
