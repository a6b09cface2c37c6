//! IRC message codec and `CR LF` line framing.
//!
//! This is the protocol layer of ircprims:
//! - [`Message`] converts between wire lines and structured messages
//! - [`LineReader`] recovers one line per message from an untrusted byte
//!   stream, enforcing the 512-byte limit and resynchronizing after
//!   oversized input
//! - [`LineWriter`] terminates and flushes lines under a write deadline
//!
//! The [`command`] module holds the RFC 2812 verb and numeric table.

pub mod codec;
pub mod command;
pub mod error;
pub mod message;
pub mod reader;
pub mod writer;

pub use codec::{FrameConfig, LineCodec, DEFAULT_WRITE_TIMEOUT, MAX_LINE_LENGTH, TERMINATOR};
pub use command::{command_name, is_registration_failure};
pub use error::{FrameError, Result};
pub use message::Message;
pub use reader::LineReader;
pub use writer::LineWriter;
