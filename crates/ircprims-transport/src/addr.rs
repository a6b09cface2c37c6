use std::fmt;

use crate::error::{Result, TransportError};

/// Port used when the server address does not name one.
pub const DEFAULT_PORT: u16 = 6667;

/// A `host[:port]` server address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddr {
    pub host: String,
    pub port: u16,
}

impl ServerAddr {
    /// Parse `host`, `host:port`, `[v6]` or `[v6]:port`.
    ///
    /// A bare IPv6 literal without brackets is taken as a host with the
    /// default port.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(invalid(input, "address is empty"));
        }

        if let Some(rest) = input.strip_prefix('[') {
            let (host, tail) = rest
                .split_once(']')
                .ok_or_else(|| invalid(input, "unterminated '[' in IPv6 address"))?;
            let port = match tail {
                "" => DEFAULT_PORT,
                _ => {
                    let port = tail
                        .strip_prefix(':')
                        .ok_or_else(|| invalid(input, "expected ':' after ']'"))?;
                    parse_port(input, port)?
                }
            };
            return Self::new(input, host, port);
        }

        match input.split_once(':') {
            Some((host, port)) if !port.contains(':') => {
                let port = parse_port(input, port)?;
                Self::new(input, host, port)
            }
            // More than one ':' without brackets: an IPv6 literal.
            Some(_) => Self::new(input, input, DEFAULT_PORT),
            None => Self::new(input, input, DEFAULT_PORT),
        }
    }

    fn new(input: &str, host: &str, port: u16) -> Result<Self> {
        if host.is_empty() {
            return Err(invalid(input, "host is empty"));
        }
        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for ServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

fn parse_port(input: &str, port: &str) -> Result<u16> {
    port.parse::<u16>()
        .map_err(|_| invalid(input, &format!("invalid port '{port}'")))
}

fn invalid(addr: &str, reason: &str) -> TransportError {
    TransportError::InvalidAddress {
        addr: addr.to_string(),
        reason: reason.to_string(),
    }
}
