use std::time::Duration;

use clap::{Args, Subcommand};

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod connect;
pub mod parse;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse one protocol line and print the structured message.
    Parse(ParseArgs),
    /// Connect to a server, register and relay messages.
    Connect(ConnectArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub async fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Parse(args) => parse::run(args, format),
        Command::Connect(args) => connect::run(args, format).await,
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Protocol line, e.g. ":nick!user@host PRIVMSG #chan :hello".
    pub line: String,
}

#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// Server address (host[:port], default port 6667).
    pub server: String,
    /// Nickname to register.
    #[arg(long, env = "IRCPRIMS_NICK", default_value = "ircprims")]
    pub nick: String,
    /// Real name sent at registration.
    #[arg(long, env = "IRCPRIMS_NAME", default_value = "ircprims")]
    pub name: String,
    /// Connection password.
    #[arg(long, env = "IRCPRIMS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    /// Connect with TLS.
    #[arg(long)]
    pub tls: bool,
    /// Accept any server certificate (trust-on-first-use).
    #[arg(long, requires = "tls")]
    pub trust: bool,
    /// Channel to join once registered.
    #[arg(long, value_name = "CHANNEL")]
    pub join: Option<String>,
    /// Connection attempts after the first failure, with doubling backoff from 2s.
    #[arg(long, default_value_t = 3)]
    pub retries: u32,
    /// Connect timeout (e.g. 30s, 500ms).
    #[arg(long, default_value = "30s")]
    pub timeout: String,
    /// Idle time before probing the server with PING (0 disables).
    #[arg(long, default_value = "120s")]
    pub ping_interval: String,
    /// Send QUIT and disconnect when stdin reaches end of file.
    #[arg(long)]
    pub quit_on_eof: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Parse `150ms`, `5s` or a bare number of seconds.
pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, millis) = if let Some(num) = input.strip_suffix("ms") {
        (num, true)
    } else if let Some(num) = input.strip_suffix('s') {
        (num, false)
    } else {
        (input, false)
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration: {input}")))?;

    if millis {
        Ok(Duration::from_millis(value))
    } else {
        Ok(Duration::from_secs(value))
    }
}
