use std::time::Duration;

/// Errors that can occur during line framing and message encoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The stream ended in the middle of a message.
    #[error("unexpected end of file in message stream")]
    TruncatedStream,

    /// A carriage return was not followed by a line feed.
    #[error("unexpected carriage return in message stream")]
    BareCarriageReturn,

    /// A NUL byte appeared in a message.
    #[error("unexpected null in message stream")]
    EmbeddedNul,

    /// A message exceeds the maximum line length.
    ///
    /// When reading, `message` is the truncated text and `truncated` the
    /// number of bytes discarded while resynchronizing. When serializing,
    /// `message` is the full candidate line and `truncated` the number of
    /// bytes over the limit.
    #[error("message too long ({truncated} bytes truncated): {message}")]
    MessageTooLong { message: String, truncated: usize },

    /// Writing a line did not complete before the write deadline.
    #[error("write timed out after {0:?}")]
    WriteTimeout(Duration),

    /// An I/O error occurred while reading or writing lines.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrameError {
    /// Whether the stream can no longer be used after this error.
    ///
    /// Only [`FrameError::MessageTooLong`] is recoverable: the reader has
    /// already resynchronized at the next terminator, and a writer simply
    /// skipped the message.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, FrameError::MessageTooLong { .. })
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
