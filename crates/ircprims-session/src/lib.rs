//! IRC client sessions over any async byte stream.
//!
//! This is the "just works" layer. Connect to a server, register, then
//! exchange structured messages through queues while reading, writing and
//! error reporting run concurrently. Keep-alive probes and `PONG` replies
//! are handled for you.

pub mod config;
pub mod connector;
pub mod error;
pub mod registration;
pub mod session;
mod tasks;

pub use config::{SessionConfig, DEFAULT_PING_INTERVAL, DEFAULT_QUEUE_CAPACITY};
pub use connector::{connect, open_stream};
pub use error::{Result, SessionError};
pub use registration::{registration_messages, RegistrationState};
pub use session::{Session, SessionParts};
