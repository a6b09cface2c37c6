use std::time::Duration;

/// Errors that can occur in session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Transport-level error.
    #[error("transport error: {0}")]
    Transport(#[from] ircprims_transport::TransportError),

    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] ircprims_frame::FrameError),

    /// The server rejected registration.
    #[error("registration failed: {0}")]
    RegistrationFailed(String),

    /// Registration did not complete in time.
    #[error("registration timed out after {0:?}")]
    Timeout(Duration),

    /// The server closed the connection.
    #[error("server disconnected")]
    Disconnected,
}

impl SessionError {
    /// Whether the session is unusable after this error.
    ///
    /// Oversized messages are reported but do not end the session.
    pub fn is_fatal(&self) -> bool {
        match self {
            SessionError::Frame(err) => err.is_fatal(),
            _ => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
