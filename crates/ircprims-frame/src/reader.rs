use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::debug;

use crate::codec::FrameConfig;
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    Accumulating,
    CarriageReturn,
    Discarding { discarded: usize, after_cr: bool },
}

/// Reads terminated lines from any `AsyncRead` stream.
///
/// Yields exactly one line per message: empty lines and bare `\n` are
/// skipped, oversized lines are cut and the reader resynchronizes at the
/// next `\r\n`. All progress is kept in the reader, so a `read_line` future
/// dropped mid-line (e.g. by `select!`) loses nothing.
pub struct LineReader<R> {
    inner: BufReader<R>,
    buf: Vec<u8>,
    state: ReadState,
    config: FrameConfig,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    /// Create a new line reader with default configuration.
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new line reader with explicit configuration.
    pub fn with_config(inner: R, config: FrameConfig) -> Self {
        Self {
            inner: BufReader::new(inner),
            buf: Vec::with_capacity(INITIAL_BUFFER_CAPACITY),
            state: ReadState::Accumulating,
            config,
        }
    }

    /// Read the next line, without its terminator.
    ///
    /// Returns `Ok(None)` at a clean end of stream. After
    /// [`FrameError::MessageTooLong`] the reader is positioned at the next
    /// message; the other errors leave the stream unusable.
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        loop {
            let byte = self.next_byte().await?;

            match self.state {
                ReadState::Accumulating => match byte {
                    None if self.buf.is_empty() => return Ok(None),
                    None => return Err(self.fail(FrameError::TruncatedStream)),
                    Some(0) => return Err(self.fail(FrameError::EmbeddedNul)),
                    Some(b'\n') => {}
                    Some(b'\r') => self.state = ReadState::CarriageReturn,
                    Some(_) if self.buf.len() >= self.config.max_payload() => {
                        self.state = ReadState::Discarding {
                            discarded: 0,
                            after_cr: false,
                        };
                    }
                    Some(b) => self.buf.push(b),
                },
                ReadState::CarriageReturn => {
                    self.state = ReadState::Accumulating;
                    match byte {
                        None => return Err(self.fail(FrameError::TruncatedStream)),
                        Some(b'\n') if self.buf.is_empty() => {}
                        Some(b'\n') => return Ok(Some(self.take_line())),
                        Some(_) => return Err(self.fail(FrameError::BareCarriageReturn)),
                    }
                }
                ReadState::Discarding {
                    discarded,
                    after_cr,
                } => match byte {
                    // The stream ended mid-discard; the next call sees a
                    // clean end of stream.
                    None => return Err(self.too_long(discarded + 1)),
                    Some(b) => {
                        let discarded = discarded + 1;
                        if after_cr && b == b'\n' {
                            return Err(self.too_long(discarded));
                        }
                        self.state = ReadState::Discarding {
                            discarded,
                            after_cr: b == b'\r',
                        };
                    }
                },
            }
        }
    }

    async fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.inner.fill_buf().await?.first().copied();
        if byte.is_some() {
            self.inner.consume(1);
        }
        Ok(byte)
    }

    fn take_line(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        line
    }

    fn fail(&mut self, err: FrameError) -> FrameError {
        self.buf.clear();
        self.state = ReadState::Accumulating;
        err
    }

    fn too_long(&mut self, truncated: usize) -> FrameError {
        let keep = self.buf.len().saturating_sub(1);
        let message = String::from_utf8_lossy(&self.buf[..keep]).into_owned();
        debug!(truncated, "discarded oversized line");
        self.fail(FrameError::MessageTooLong { message, truncated })
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &R {
        self.inner.get_ref()
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut R {
        self.inner.get_mut()
    }

    /// Consume the reader and return the inner stream.
    ///
    /// Bytes already buffered but not yet framed are lost.
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }

    /// Current line reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
