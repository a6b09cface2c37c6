//! IRC client protocol engine.
//!
//! ircprims turns a TCP or TLS byte stream into a registered IRC session:
//! strict `CR LF` framing with resynchronization, a message codec, and
//! concurrent read and write loops with keep-alive and error reporting.
//!
//! # Crate Structure
//!
//! - [`transport`]: TCP and TLS connection establishment
//! - [`frame`]: Message codec, command table and line framing
//! - [`session`]: Registration, concurrent I/O loops and keep-alive
//!
//! ```no_run
//! use ircprims::frame::Message;
//! use ircprims::session::{Session, SessionConfig};
//!
//! # async fn demo() -> ircprims::session::Result<()> {
//! let config = SessionConfig::new("rustacean", "Ferris");
//! let mut session = Session::connect("irc.libera.chat:6667", &config).await?;
//! session.send(Message::new("JOIN", ["#rust"])).await?;
//! while let Some(message) = session.recv().await {
//!     println!("{}", message.raw.unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

/// Re-export transport types.
pub mod transport {
    pub use ircprims_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use ircprims_frame::*;
}

/// Re-export session types.
pub mod session {
    pub use ircprims_session::*;
}
