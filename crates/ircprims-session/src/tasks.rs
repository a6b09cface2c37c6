//! The three tasks behind a session.
//!
//! The read loop owns the read half and the inbound queue, the write loop
//! owns the write half and the outbound queue, and the error multiplexer
//! merges their error queues. They share nothing but a [`CancellationToken`]
//! that either loop fires when the connection is done.

use std::time::Duration;

use ircprims_frame::{command, FrameError, LineReader, LineWriter, Message, DEFAULT_WRITE_TIMEOUT};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::config::DEFAULT_PING_INTERVAL;
use crate::error::SessionError;

/// `PING` target when the welcome reply named no server.
const PROBE_TOKEN: &str = "keepalive";

/// Liveness settings for the read loop.
#[derive(Debug, Clone, Copy)]
pub(crate) struct KeepAlive {
    pub ping_interval: Option<Duration>,
    pub auto_pong: bool,
}

pub(crate) async fn read_loop<R: AsyncRead + Unpin>(
    mut reader: LineReader<R>,
    inbound: mpsc::Sender<Message>,
    errors: mpsc::Sender<SessionError>,
    outbound: mpsc::WeakSender<Message>,
    keepalive: KeepAlive,
    close: CancellationToken,
) {
    // Origin of the welcome reply; `Some` once registered.
    let mut server: Option<String> = None;
    let period = keepalive.ping_interval.unwrap_or(DEFAULT_PING_INTERVAL);
    let idle = tokio::time::sleep(period);
    tokio::pin!(idle);

    loop {
        let probing = server.is_some() && keepalive.ping_interval.is_some();

        tokio::select! {
            biased;

            () = close.cancelled() => {
                debug!("read loop: connection closed, stopping");
                break;
            }

            () = &mut idle, if probing => {
                let target = match server.as_deref() {
                    Some(name) if !name.is_empty() => name.to_string(),
                    _ => PROBE_TOKEN.to_string(),
                };
                debug!(server = %target, "read loop: idle, probing server");
                enqueue(&outbound, Message::new(command::PING, [target]));
                idle.as_mut().reset(Instant::now() + period);
            }

            result = reader.read_line() => {
                let line = match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        debug!("read loop: end of stream");
                        report(&errors, SessionError::Disconnected).await;
                        break;
                    }
                    Err(FrameError::MessageTooLong { message, truncated }) => {
                        warn!(truncated, "read loop: inbound message too long");
                        let line = message.clone();
                        report(&errors, FrameError::MessageTooLong { message, truncated }.into()).await;
                        line
                    }
                    Err(err) => {
                        warn!(error = %err, "read loop: read failed");
                        report(&errors, err.into()).await;
                        break;
                    }
                };

                trace!(%line, "received");
                let message = Message::parse(&line);
                idle.as_mut().reset(Instant::now() + period);

                if server.is_none() && message.command == command::RPL_WELCOME {
                    server = Some(message.origin.clone().unwrap_or_default());
                } else if server.is_some() && keepalive.auto_pong && message.command == command::PING {
                    enqueue(&outbound, Message::new(command::PONG, message.arguments.iter().cloned()));
                }

                if !deliver(&inbound, message, &close).await {
                    debug!("read loop: inbound queue dropped, stopping");
                    break;
                }
            }
        }
    }

    close.cancel();
}

pub(crate) async fn write_loop<W: AsyncWrite + Unpin>(
    mut writer: LineWriter<W>,
    mut outbound: mpsc::Receiver<Message>,
    errors: mpsc::Sender<SessionError>,
    close: CancellationToken,
) {
    let mut failed = false;

    loop {
        let message = tokio::select! {
            biased;

            () = close.cancelled() => {
                debug!("write loop: connection closed, stopping");
                break;
            }

            message = outbound.recv() => match message {
                Some(message) => message,
                None => {
                    debug!("write loop: outbound sink closed, stopping");
                    break;
                }
            },
        };

        let result = tokio::select! {
            biased;

            () = close.cancelled() => {
                debug!("write loop: connection closed mid-write, stopping");
                break;
            }

            result = writer.write_message(&message) => result,
        };

        match result {
            Ok(()) => trace!(command = %message.command, "sent"),
            Err(FrameError::MessageTooLong { message, truncated }) => {
                warn!(truncated, "write loop: outbound message too long, skipped");
                report(
                    &errors,
                    FrameError::MessageTooLong { message, truncated }.into(),
                )
                .await;
            }
            Err(err) => {
                warn!(error = %err, "write loop: write failed");
                report(&errors, err.into()).await;
                failed = true;
                break;
            }
        }
    }

    close.cancel();
    drop(errors);

    // A failed stream is dropped without flushing; it would only stall again.
    let shutdown = async move {
        if failed {
            return;
        }
        let limit = writer.config().write_timeout.unwrap_or(DEFAULT_WRITE_TIMEOUT);
        match tokio::time::timeout(limit, writer.shutdown()).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => debug!(error = %err, "write loop: shutdown failed"),
            Err(_) => debug!(?limit, "write loop: shutdown timed out"),
        }
    };

    // Producers must never block on a dead session, so the queue drains
    // while the stream shuts down.
    let drain = async {
        while outbound.recv().await.is_some() {}
        trace!("write loop: outbound queue drained");
    };

    tokio::join!(shutdown, drain);
}

pub(crate) async fn mux_errors(
    mut read_errors: mpsc::Receiver<SessionError>,
    mut write_errors: mpsc::Receiver<SessionError>,
    errors: mpsc::Sender<SessionError>,
) {
    let mut read_open = true;
    let mut write_open = true;

    while read_open || write_open {
        let err = tokio::select! {
            err = read_errors.recv(), if read_open => match err {
                Some(err) => err,
                None => {
                    read_open = false;
                    continue;
                }
            },
            err = write_errors.recv(), if write_open => match err {
                Some(err) => err,
                None => {
                    write_open = false;
                    continue;
                }
            },
        };

        if errors.send(err).await.is_err() {
            trace!("error queue dropped, discarding");
        }
    }

    debug!("error multiplexer: both sources closed");
}

async fn report(errors: &mpsc::Sender<SessionError>, err: SessionError) {
    // The multiplexer outlives both loops, so this only fails during teardown.
    let _ = errors.send(err).await;
}

async fn deliver(
    inbound: &mpsc::Sender<Message>,
    message: Message,
    close: &CancellationToken,
) -> bool {
    tokio::select! {
        biased;

        () = close.cancelled() => false,
        sent = inbound.send(message) => sent.is_ok(),
    }
}

fn enqueue(outbound: &mpsc::WeakSender<Message>, message: Message) {
    let Some(outbound) = outbound.upgrade() else {
        return;
    };
    if let Err(err) = outbound.try_send(message) {
        debug!(error = %err, "keep-alive message dropped");
    }
}
