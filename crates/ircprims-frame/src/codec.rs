use std::time::Duration;

use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;

use crate::error::FrameError;

/// Maximum message length on the wire, terminator included.
pub const MAX_LINE_LENGTH: usize = 512;

/// Line terminator.
pub const TERMINATOR: &str = "\r\n";

/// Default deadline for writing and flushing one line.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration shared by [`LineReader`](crate::LineReader) and
/// [`LineWriter`](crate::LineWriter).
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum line length in bytes, including the terminator. Default: 512.
    pub max_line_length: usize,
    /// Deadline for writing and flushing one line. `None` waits forever.
    pub write_timeout: Option<Duration>,
}

impl FrameConfig {
    /// Maximum payload length, excluding the terminator.
    pub fn max_payload(&self) -> usize {
        self.max_line_length.saturating_sub(TERMINATOR.len())
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_line_length: MAX_LINE_LENGTH,
            write_timeout: Some(DEFAULT_WRITE_TIMEOUT),
        }
    }
}

/// Encodes serialized lines, appending the terminator.
///
/// Length enforcement happens in [`Message::serialize`](crate::Message::serialize);
/// the codec only terminates.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineCodec;

impl Encoder<String> for LineCodec {
    type Error = FrameError;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> Result<(), FrameError> {
        dst.reserve(line.len() + TERMINATOR.len());
        dst.put_slice(line.as_bytes());
        dst.put_slice(TERMINATOR.as_bytes());
        Ok(())
    }
}
