use std::fmt;
use std::time::Duration;

use ircprims_frame::{FrameConfig, DEFAULT_WRITE_TIMEOUT, MAX_LINE_LENGTH};
use ircprims_transport::{TlsConfig, DEFAULT_CONNECT_TIMEOUT};

/// Default capacity of the inbound, outbound and error queues.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Default idle time after which the session probes the server.
pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_secs(120);

/// Configuration for one session.
#[derive(Clone)]
pub struct SessionConfig {
    /// Nickname to register.
    pub nick: String,
    /// Real name sent with `USER`.
    pub full_name: String,
    /// Connection password sent with `PASS`. Redacted in debug output.
    pub password: Option<String>,
    /// Negotiate TLS when set.
    pub tls: Option<TlsConfig>,
    /// Bound on TCP connect plus TLS handshake.
    pub connect_timeout: Duration,
    /// Deadline for writing and flushing one line.
    pub write_timeout: Option<Duration>,
    /// Capacity of each session queue.
    pub queue_capacity: usize,
    /// Send `PING <server>` after this much inbound silence. `None` disables.
    pub ping_interval: Option<Duration>,
    /// Answer server `PING`s once registered.
    pub auto_pong: bool,
    /// Give up on registration after this long. `None` waits indefinitely.
    pub registration_timeout: Option<Duration>,
}

impl SessionConfig {
    /// Configuration with defaults for everything but the identity.
    pub fn new(nick: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            full_name: full_name.into(),
            password: None,
            tls: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            write_timeout: Some(DEFAULT_WRITE_TIMEOUT),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            ping_interval: Some(DEFAULT_PING_INTERVAL),
            auto_pong: true,
            registration_timeout: None,
        }
    }

    pub(crate) fn frame_config(&self) -> FrameConfig {
        FrameConfig {
            max_line_length: MAX_LINE_LENGTH,
            write_timeout: self.write_timeout,
        }
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("SessionConfig");
        dbg.field("nick", &self.nick)
            .field("full_name", &self.full_name);
        if let Some(password) = &self.password {
            dbg.field(
                "password",
                &format_args!("<redacted:{} bytes>", password.len()),
            );
        } else {
            dbg.field("password", &Option::<String>::None);
        }
        dbg.field("tls", &self.tls)
            .field("connect_timeout", &self.connect_timeout)
            .field("write_timeout", &self.write_timeout)
            .field("queue_capacity", &self.queue_capacity)
            .field("ping_interval", &self.ping_interval)
            .field("auto_pong", &self.auto_pong)
            .field("registration_timeout", &self.registration_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::new("e", "Ed");
        assert_eq!(config.nick, "e");
        assert_eq!(config.full_name, "Ed");
        assert!(config.password.is_none());
        assert!(config.tls.is_none());
        assert_eq!(config.write_timeout, Some(Duration::from_secs(60)));
        assert_eq!(config.ping_interval, Some(Duration::from_secs(120)));
        assert!(config.auto_pong);
        assert!(config.registration_timeout.is_none());
        assert_eq!(config.frame_config().max_line_length, 512);
    }

    #[test]
    fn debug_redacts_password() {
        let config = SessionConfig {
            password: Some("hunter2".to_string()),
            ..SessionConfig::new("e", "Ed")
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted:7 bytes>"));
    }
}
