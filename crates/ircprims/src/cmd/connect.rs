use std::time::Duration;

use ircprims_frame::{command, FrameError, Message};
use ircprims_session::{Session, SessionConfig, SessionError, SessionParts};
use ircprims_transport::TlsConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::cmd::{parse_duration, ConnectArgs};
use crate::exit::{io_error, session_error, CliResult, SUCCESS};
use crate::output::{print_message, OutputFormat};

const INITIAL_BACKOFF: Duration = Duration::from_secs(2);

pub async fn run(args: ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    let config = session_config(&args)?;
    let session = connect_with_retries(&args.server, &config, args.retries).await?;
    info!(server = %session.server(), nick = %config.nick, "connected");

    let SessionParts {
        mut inbound,
        outbound,
        mut errors,
        ..
    } = session.into_parts();

    if let Some(channel) = &args.join {
        enqueue(&outbound, Message::new(command::JOIN, [channel.as_str()])).await;
    }

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut outbound = Some(outbound);
    let mut errors_open = true;
    let mut fatal: Option<SessionError> = None;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            message = inbound.recv() => match message {
                Some(message) => print_message(&message, format),
                None => break,
            },

            err = errors.recv(), if errors_open => match err {
                Some(err) => note_error(err, &mut fatal),
                None => errors_open = false,
            },

            line = stdin.next_line(), if stdin_open && outbound.is_some() => match line {
                Ok(Some(line)) => {
                    if let Some(sink) = &outbound {
                        send_line(sink, &line).await;
                    }
                }
                Ok(None) => {
                    stdin_open = false;
                    if args.quit_on_eof {
                        debug!("stdin closed, quitting");
                        quit(&mut outbound).await;
                    }
                }
                Err(err) => return Err(io_error("stdin read failed", err)),
            },

            _ = &mut ctrl_c, if outbound.is_some() => {
                info!("interrupted, quitting");
                quit(&mut outbound).await;
            }
        }
    }

    // The error queue closes once both loops have stopped.
    while errors_open {
        match errors.recv().await {
            Some(err) => note_error(err, &mut fatal),
            None => errors_open = false,
        }
    }

    let quitting = outbound.is_none();
    match fatal {
        Some(err) if !quitting => Err(session_error("session ended", err)),
        _ => Ok(SUCCESS),
    }
}

fn session_config(args: &ConnectArgs) -> CliResult<SessionConfig> {
    let ping_interval = parse_duration(&args.ping_interval)?;
    Ok(SessionConfig {
        password: args.password.clone(),
        tls: args.tls.then(|| TlsConfig {
            accept_invalid_certs: args.trust,
        }),
        connect_timeout: parse_duration(&args.timeout)?,
        ping_interval: (!ping_interval.is_zero()).then_some(ping_interval),
        ..SessionConfig::new(args.nick.clone(), args.name.clone())
    })
}

async fn connect_with_retries(
    addr: &str,
    config: &SessionConfig,
    retries: u32,
) -> CliResult<Session> {
    let mut backoff = INITIAL_BACKOFF;
    let mut attempt = 0u32;

    loop {
        match Session::connect(addr, config).await {
            Ok(session) => return Ok(session),
            Err(err) if attempt < retries && is_retryable(&err) => {
                attempt += 1;
                warn!(error = %err, attempt, ?backoff, "connection failed, retrying");
                tokio::time::sleep(backoff).await;
                backoff = backoff.saturating_mul(2);
            }
            Err(err) => return Err(session_error("connect failed", err)),
        }
    }
}

/// Registration rejections are final; everything else may be transient.
fn is_retryable(err: &SessionError) -> bool {
    match err {
        SessionError::Transport(ircprims_transport::TransportError::InvalidAddress { .. })
        | SessionError::Transport(ircprims_transport::TransportError::InvalidServerName(_)) => {
            false
        }
        SessionError::RegistrationFailed(reason) => reason == "unexpected end of stream",
        _ => true,
    }
}

fn note_error(err: SessionError, fatal: &mut Option<SessionError>) {
    match &err {
        SessionError::Frame(FrameError::MessageTooLong { truncated, .. }) => {
            warn!("Truncated {truncated} bytes from message");
        }
        SessionError::Disconnected => info!("server closed the connection"),
        other if other.is_fatal() => error!(error = %other, "session failed"),
        other => warn!(error = %other, "session error"),
    }
    if err.is_fatal() && fatal.is_none() {
        *fatal = Some(err);
    }
}

async fn send_line(outbound: &mpsc::Sender<Message>, line: &str) {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() {
        return;
    }

    let message = Message::parse(line);
    if message.serialize().is_ok() {
        enqueue(outbound, message).await;
        return;
    }

    // Too long as typed: rebuild from fields so the payload can be split.
    let synthesized = Message {
        raw: None,
        ..message
    };
    match synthesized.split_to_fit() {
        Ok(pieces) => {
            debug!(pieces = pieces.len(), "split oversized line");
            for piece in pieces {
                enqueue(outbound, piece).await;
            }
        }
        Err(err) => warn!(error = %err, "line dropped"),
    }
}

async fn enqueue(outbound: &mpsc::Sender<Message>, message: Message) {
    if outbound.send(message).await.is_err() {
        debug!("session closed, message dropped");
    }
}

async fn quit(outbound: &mut Option<mpsc::Sender<Message>>) {
    if let Some(sink) = outbound.take() {
        enqueue(&sink, Message::new(command::QUIT, Vec::<String>::new())).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_line_splits_oversized_input() {
        let (tx, mut rx) = mpsc::channel(8);
        let payload = "x".repeat(700);
        send_line(&tx, &format!("PRIVMSG #c :{payload}")).await;
        drop(tx);

        let mut joined = String::new();
        let mut count = 0;
        while let Some(message) = rx.recv().await {
            assert!(message.serialize().is_ok());
            joined.push_str(message.last_argument().unwrap_or_default());
            count += 1;
        }
        assert_eq!(count, 2);
        assert_eq!(joined, payload);
    }

    #[tokio::test]
    async fn send_line_keeps_short_lines_verbatim() {
        let (tx, mut rx) = mpsc::channel(8);
        send_line(&tx, "JOIN   #rust\r").await;
        send_line(&tx, "   ").await;
        drop(tx);

        let message = rx.recv().await.unwrap();
        assert_eq!(message.serialize().unwrap(), "JOIN   #rust");
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn registration_rejections_are_not_retried() {
        assert!(!is_retryable(&SessionError::RegistrationFailed(
            "Nickname is already in use".to_string()
        )));
        assert!(is_retryable(&SessionError::RegistrationFailed(
            "unexpected end of stream".to_string()
        )));
        assert!(is_retryable(&SessionError::Disconnected));
    }

    #[test]
    fn fatal_error_is_kept_once() {
        let mut fatal = None;
        note_error(
            SessionError::Frame(FrameError::MessageTooLong {
                message: String::new(),
                truncated: 4,
            }),
            &mut fatal,
        );
        assert!(fatal.is_none());

        note_error(SessionError::Disconnected, &mut fatal);
        note_error(SessionError::Frame(FrameError::EmbeddedNul), &mut fatal);
        assert!(matches!(fatal, Some(SessionError::Disconnected)));
    }
}
