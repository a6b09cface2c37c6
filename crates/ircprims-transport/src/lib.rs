//! Byte-stream transport for IRC clients.
//!
//! Provides a unified stream over the two ways a client reaches a server:
//! - Plain TCP
//! - TLS over TCP (rustls, optionally trust-on-first-use)
//!
//! This is the lowest layer of ircprims. Everything else builds on top of
//! the [`IrcStream`] type provided here.

pub mod addr;
pub mod error;
pub mod stream;
pub mod tcp;
pub mod tls;

pub use addr::{ServerAddr, DEFAULT_PORT};
pub use error::{Result, TransportError};
pub use stream::IrcStream;
pub use tcp::{connect, connect_tls, DEFAULT_CONNECT_TIMEOUT};
pub use tls::TlsConfig;
