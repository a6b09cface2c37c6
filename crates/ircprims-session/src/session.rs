use ircprims_frame::{command, LineReader, LineWriter, Message};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::registration::register;
use crate::tasks::{mux_errors, read_loop, write_loop, KeepAlive};

/// A registered connection to one server.
///
/// Reading, writing and error reporting run as independent tasks; the
/// session hands out their queues. Dropping every outbound sender (see
/// [`Session::close`]) shuts the connection down, and the inbound and error
/// queues close once the connection is gone.
#[derive(Debug)]
pub struct Session {
    server: String,
    inbound: mpsc::Receiver<Message>,
    outbound: mpsc::Sender<Message>,
    errors: mpsc::Receiver<SessionError>,
}

/// The queues of a session, for callers that `select!` over them.
#[derive(Debug)]
pub struct SessionParts {
    /// Server name from the welcome reply.
    pub server: String,
    /// Messages from the server, in stream order.
    pub inbound: mpsc::Receiver<Message>,
    /// Messages to the server, written in submission order.
    pub outbound: mpsc::Sender<Message>,
    /// Read and write errors, fatal and non-fatal.
    pub errors: mpsc::Receiver<SessionError>,
}

impl Session {
    /// Connect to `addr` (`host[:port]`) and register.
    ///
    /// Uses TLS when `config.tls` is set.
    pub async fn connect(addr: &str, config: &SessionConfig) -> Result<Self> {
        crate::connector::connect(addr, config).await
    }

    /// Start a session over an established byte stream and register.
    pub async fn from_stream<S>(stream: S, config: &SessionConfig) -> Result<Self>
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (reader, writer) = tokio::io::split(stream);
        Self::from_halves(reader, writer, config).await
    }

    /// Start a session over separate read and write halves and register.
    ///
    /// The read loop, write loop and error multiplexer are spawned before
    /// registration starts, so this must run inside a tokio runtime.
    pub async fn from_halves<R, W>(reader: R, writer: W, config: &SessionConfig) -> Result<Self>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let capacity = config.queue_capacity.max(1);
        let (inbound_tx, mut inbound) = mpsc::channel(capacity);
        let (outbound, outbound_rx) = mpsc::channel(capacity);
        let (read_errors_tx, read_errors) = mpsc::channel(capacity);
        let (write_errors_tx, write_errors) = mpsc::channel(capacity);
        let (errors_tx, errors) = mpsc::channel(capacity);
        let close = CancellationToken::new();
        let frame_config = config.frame_config();

        tokio::spawn(read_loop(
            LineReader::with_config(reader, frame_config.clone()),
            inbound_tx,
            read_errors_tx,
            outbound.downgrade(),
            KeepAlive {
                ping_interval: config.ping_interval,
                auto_pong: config.auto_pong,
            },
            close.clone(),
        ));
        tokio::spawn(write_loop(
            LineWriter::with_config(writer, frame_config),
            outbound_rx,
            write_errors_tx,
            close,
        ));
        tokio::spawn(mux_errors(read_errors, write_errors, errors_tx));
        debug!(nick = %config.nick, "session tasks started");

        let server = register(&mut inbound, &outbound, config).await?;
        info!(%server, nick = %config.nick, "registered");

        Ok(Self {
            server,
            inbound,
            outbound,
            errors,
        })
    }

    /// Server name from the welcome reply.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Next message from the server; `None` once the connection is gone.
    pub async fn recv(&mut self) -> Option<Message> {
        self.inbound.recv().await
    }

    /// Queue a message for the server.
    ///
    /// Waits while the outbound queue is full. Once the connection has
    /// failed, messages are accepted and discarded.
    pub async fn send(&self, message: Message) -> Result<()> {
        self.outbound
            .send(message)
            .await
            .map_err(|_| SessionError::Disconnected)
    }

    /// A handle for sending from other tasks.
    ///
    /// The connection stays open while any handle is alive.
    pub fn sender(&self) -> mpsc::Sender<Message> {
        self.outbound.clone()
    }

    /// Next read or write error; `None` once both loops have stopped.
    pub async fn next_error(&mut self) -> Option<SessionError> {
        self.errors.recv().await
    }

    /// Split the session into its queues.
    pub fn into_parts(self) -> SessionParts {
        SessionParts {
            server: self.server,
            inbound: self.inbound,
            outbound: self.outbound,
            errors: self.errors,
        }
    }

    /// Drop the outbound sink, signalling an intentional disconnect.
    ///
    /// Queued messages are still written before the connection shuts down.
    /// Returns the inbound and error queues so the caller can drain them.
    pub fn close(self) -> (mpsc::Receiver<Message>, mpsc::Receiver<SessionError>) {
        debug!(server = %self.server, "closing session");
        (self.inbound, self.errors)
    }

    /// Send `QUIT` and close.
    pub async fn quit(
        self,
        reason: Option<&str>,
    ) -> Result<(mpsc::Receiver<Message>, mpsc::Receiver<SessionError>)> {
        let message = Message::new(command::QUIT, reason);
        self.send(message).await?;
        Ok(self.close())
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use std::time::Duration;

    use ircprims_frame::{FrameError, DEFAULT_WRITE_TIMEOUT};
    use tokio::io::{AsyncWriteExt, DuplexStream, ReadHalf, WriteHalf};

    use super::*;

    type ServerLines = LineReader<ReadHalf<DuplexStream>>;

    fn test_config() -> SessionConfig {
        SessionConfig {
            ping_interval: None,
            ..SessionConfig::new("e", "Ed")
        }
    }

    fn fake_server(stream: DuplexStream) -> (ServerLines, WriteHalf<DuplexStream>) {
        let (reader, writer) = tokio::io::split(stream);
        (LineReader::new(reader), writer)
    }

    async fn next_line(lines: &mut ServerLines) -> String {
        lines.read_line().await.unwrap().unwrap()
    }

    /// Reads NICK/USER and sends the welcome reply.
    async fn accept_registration(lines: &mut ServerLines, out: &mut WriteHalf<DuplexStream>) {
        assert_eq!(next_line(lines).await, "NICK :e");
        assert_eq!(next_line(lines).await, "USER e 0 * :Ed");
        out.write_all(b":irc.test 001 e :Welcome to the test network\r\n")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn registers_and_delivers_messages() {
        let (client, server) = tokio::io::duplex(4096);
        let handle = tokio::spawn(async move {
            let (mut lines, mut out) = fake_server(server);
            accept_registration(&mut lines, &mut out).await;
            out.write_all(b":n!u@h PRIVMSG e :hello there\r\n")
                .await
                .unwrap();
            assert_eq!(next_line(&mut lines).await, "JOIN :#rust");
            (lines, out)
        });

        let mut session = Session::from_stream(client, &test_config()).await.unwrap();
        assert_eq!(session.server(), "irc.test");

        let msg = session.recv().await.unwrap();
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.origin.as_deref(), Some("n"));
        assert_eq!(msg.last_argument(), Some("hello there"));

        session.send(Message::new("JOIN", ["#rust"])).await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn password_is_sent_before_nick() {
        let (client, server) = tokio::io::duplex(4096);
        let handle = tokio::spawn(async move {
            let (mut lines, mut out) = fake_server(server);
            assert_eq!(next_line(&mut lines).await, "PASS :sekrit");
            accept_registration(&mut lines, &mut out).await;
            (lines, out)
        });

        let config = SessionConfig {
            password: Some("sekrit".to_string()),
            ..test_config()
        };
        let session = Session::from_stream(client, &config).await.unwrap();
        assert_eq!(session.server(), "irc.test");
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn ping_during_registration_is_answered() {
        let (client, server) = tokio::io::duplex(4096);
        let handle = tokio::spawn(async move {
            let (mut lines, mut out) = fake_server(server);
            assert_eq!(next_line(&mut lines).await, "NICK :e");
            assert_eq!(next_line(&mut lines).await, "USER e 0 * :Ed");
            out.write_all(b"PING :abc123\r\n").await.unwrap();
            assert_eq!(next_line(&mut lines).await, "PONG :abc123");
            out.write_all(b":irc.test 001 e :Welcome\r\n").await.unwrap();
            (lines, out)
        });

        let session = Session::from_stream(client, &test_config()).await.unwrap();
        assert_eq!(session.server(), "irc.test");
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn nickname_in_use_fails_registration() {
        let (client, server) = tokio::io::duplex(4096);
        let handle = tokio::spawn(async move {
            let (mut lines, mut out) = fake_server(server);
            assert_eq!(next_line(&mut lines).await, "NICK :e");
            assert_eq!(next_line(&mut lines).await, "USER e 0 * :Ed");
            out.write_all(b":irc.test 433 * e :Nickname is already in use\r\n")
                .await
                .unwrap();
            (lines, out)
        });

        let err = Session::from_stream(client, &test_config())
            .await
            .unwrap_err();
        match err {
            SessionError::RegistrationFailed(reason) => {
                assert_eq!(reason, "Nickname is already in use")
            }
            other => panic!("unexpected error: {other}"),
        }
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn end_of_stream_fails_registration() {
        let (client, server) = tokio::io::duplex(4096);
        let handle = tokio::spawn(async move {
            let (mut lines, _out) = fake_server(server);
            assert_eq!(next_line(&mut lines).await, "NICK :e");
            assert_eq!(next_line(&mut lines).await, "USER e 0 * :Ed");
        });

        let err = Session::from_stream(client, &test_config())
            .await
            .unwrap_err();
        assert!(
            matches!(err, SessionError::RegistrationFailed(ref reason) if reason == "unexpected end of stream")
        );
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn oversized_inbound_message_is_reported_and_delivered() {
        let (client, server) = tokio::io::duplex(4096);
        let handle = tokio::spawn(async move {
            let (mut lines, mut out) = fake_server(server);
            accept_registration(&mut lines, &mut out).await;
            let mut long = b":n PRIVMSG e :".to_vec();
            long.extend_from_slice(&[b'a'; 600]);
            long.extend_from_slice(b"\r\n:n PRIVMSG e :after\r\n");
            out.write_all(&long).await.unwrap();
            (lines, out)
        });

        let mut session = Session::from_stream(client, &test_config()).await.unwrap();

        let truncated = session.recv().await.unwrap();
        assert_eq!(truncated.command, "PRIVMSG");
        assert_eq!(truncated.raw.as_deref().map(str::len), Some(509));

        let after = session.recv().await.unwrap();
        assert_eq!(after.last_argument(), Some("after"));

        let err = session.next_error().await.unwrap();
        assert!(!err.is_fatal());
        assert!(matches!(
            err,
            SessionError::Frame(FrameError::MessageTooLong { .. })
        ));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn oversized_outbound_message_is_skipped() {
        let (client, server) = tokio::io::duplex(4096);
        let handle = tokio::spawn(async move {
            let (mut lines, mut out) = fake_server(server);
            accept_registration(&mut lines, &mut out).await;
            assert_eq!(next_line(&mut lines).await, "PRIVMSG #c :ok");
            (lines, out)
        });

        let mut session = Session::from_stream(client, &test_config()).await.unwrap();
        session
            .send(Message::new("PRIVMSG", ["#c".to_string(), "a".repeat(600)]))
            .await
            .unwrap();
        session
            .send(Message::new("PRIVMSG", ["#c", "ok"]))
            .await
            .unwrap();

        let err = session.next_error().await.unwrap();
        assert!(matches!(
            err,
            SessionError::Frame(FrameError::MessageTooLong { truncated: 102, .. })
        ));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn server_disconnect_closes_queues() {
        let (client, server) = tokio::io::duplex(4096);
        let handle = tokio::spawn(async move {
            let (mut lines, mut out) = fake_server(server);
            accept_registration(&mut lines, &mut out).await;
            out.write_all(b":irc.test NOTICE e :bye\r\n").await.unwrap();
        });

        let mut session = Session::from_stream(client, &test_config()).await.unwrap();
        handle.await.unwrap();

        assert_eq!(session.recv().await.unwrap().command, "NOTICE");
        assert!(session.recv().await.is_none());
        assert!(matches!(
            session.next_error().await,
            Some(SessionError::Disconnected)
        ));
        assert!(session.next_error().await.is_none());
    }

    #[tokio::test]
    async fn quit_writes_and_closes_connection() {
        let (client, server) = tokio::io::duplex(4096);
        let handle = tokio::spawn(async move {
            let (mut lines, mut out) = fake_server(server);
            accept_registration(&mut lines, &mut out).await;
            assert_eq!(next_line(&mut lines).await, "QUIT :gone fishing");
            assert!(lines.read_line().await.unwrap().is_none());
        });

        let session = Session::from_stream(client, &test_config()).await.unwrap();
        let (mut inbound, _errors) = session.quit(Some("gone fishing")).await.unwrap();
        handle.await.unwrap();
        assert!(inbound.recv().await.is_none());
    }

    /// Accepts a fixed number of writes, then fails every write.
    struct FailingWriter {
        remaining: usize,
    }

    impl AsyncWrite for FailingWriter {
        fn poll_write(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            if self.remaining == 0 {
                return Poll::Ready(Err(io::Error::from(io::ErrorKind::BrokenPipe)));
            }
            self.remaining -= 1;
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn write_failure_tears_down_without_blocking_senders() {
        let (client, mut server) = tokio::io::duplex(4096);
        server
            .write_all(b":irc.test 001 e :Welcome\r\n")
            .await
            .unwrap();

        let config = SessionConfig {
            queue_capacity: 2,
            ..test_config()
        };
        let mut session = Session::from_halves(client, FailingWriter { remaining: 2 }, &config)
            .await
            .unwrap();

        session
            .send(Message::new("PRIVMSG", ["#c", "lost"]))
            .await
            .unwrap();

        let err = session.next_error().await.unwrap();
        assert!(err.is_fatal());
        assert!(matches!(err, SessionError::Frame(FrameError::Io(_))));
        assert!(session.recv().await.is_none());

        for _ in 0..20 {
            tokio::time::timeout(
                Duration::from_secs(5),
                session.send(Message::new("PRIVMSG", ["#c", "discarded"])),
            )
            .await
            .expect("send must not block on a dead session")
            .unwrap();
        }
        drop(server);
    }

    /// Accepts a fixed number of writes, then never completes another.
    struct StalledWriter {
        remaining: usize,
    }

    impl AsyncWrite for StalledWriter {
        fn poll_write(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            if self.remaining == 0 {
                return Poll::Pending;
            }
            self.remaining -= 1;
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    /// A session whose peer stops reading right after registration.
    async fn stalled_session(queue_capacity: usize) -> (Session, DuplexStream) {
        let (client, mut server) = tokio::io::duplex(4096);
        server
            .write_all(b":irc.test 001 e :Welcome\r\n")
            .await
            .unwrap();

        let config = SessionConfig {
            queue_capacity,
            ..test_config()
        };
        let session = Session::from_halves(client, StalledWriter { remaining: 2 }, &config)
            .await
            .unwrap();
        (session, server)
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_peer_times_out_and_closes_session() {
        let (mut session, _server) = stalled_session(4).await;
        session
            .send(Message::new("PRIVMSG", ["#c", "stuck"]))
            .await
            .unwrap();

        let err = session.next_error().await.unwrap();
        assert!(err.is_fatal());
        assert!(matches!(
            err,
            SessionError::Frame(FrameError::WriteTimeout(limit)) if limit == DEFAULT_WRITE_TIMEOUT
        ));
        assert!(session.recv().await.is_none());
        assert!(session.next_error().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_peer_does_not_block_later_sends() {
        let (mut session, _server) = stalled_session(1).await;
        session
            .send(Message::new("PRIVMSG", ["#c", "stuck"]))
            .await
            .unwrap();
        session
            .send(Message::new("PRIVMSG", ["#c", "queued"]))
            .await
            .unwrap();

        let err = session.next_error().await.unwrap();
        assert!(matches!(
            err,
            SessionError::Frame(FrameError::WriteTimeout(_))
        ));

        let started = tokio::time::Instant::now();
        for _ in 0..10 {
            session
                .send(Message::new("PRIVMSG", ["#c", "discarded"]))
                .await
                .unwrap();
        }
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn idle_session_probes_server() {
        let (client, server) = tokio::io::duplex(4096);
        let handle = tokio::spawn(async move {
            let (mut lines, mut out) = fake_server(server);
            accept_registration(&mut lines, &mut out).await;
            assert_eq!(next_line(&mut lines).await, "PING :irc.test");
            (lines, out)
        });

        let config = SessionConfig {
            ping_interval: Some(Duration::from_secs(30)),
            ..test_config()
        };
        let _session = Session::from_stream(client, &config).await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn idle_probe_without_server_name_uses_token() {
        let (client, server) = tokio::io::duplex(4096);
        let handle = tokio::spawn(async move {
            let (mut lines, mut out) = fake_server(server);
            assert_eq!(next_line(&mut lines).await, "NICK :e");
            assert_eq!(next_line(&mut lines).await, "USER e 0 * :Ed");
            out.write_all(b"001 e :Welcome\r\n").await.unwrap();
            assert_eq!(next_line(&mut lines).await, "PING :keepalive");
            (lines, out)
        });

        let config = SessionConfig {
            ping_interval: Some(Duration::from_secs(30)),
            ..test_config()
        };
        let session = Session::from_stream(client, &config).await.unwrap();
        assert_eq!(session.server(), "");
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn server_ping_is_answered_and_delivered() {
        let (client, server) = tokio::io::duplex(4096);
        let handle = tokio::spawn(async move {
            let (mut lines, mut out) = fake_server(server);
            accept_registration(&mut lines, &mut out).await;
            out.write_all(b"PING :tok\r\n").await.unwrap();
            assert_eq!(next_line(&mut lines).await, "PONG :tok");
            (lines, out)
        });

        let mut session = Session::from_stream(client, &test_config()).await.unwrap();
        let ping = session.recv().await.unwrap();
        assert_eq!(ping.command, "PING");
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn auto_pong_can_be_disabled() {
        let (client, server) = tokio::io::duplex(4096);
        let handle = tokio::spawn(async move {
            let (mut lines, mut out) = fake_server(server);
            accept_registration(&mut lines, &mut out).await;
            out.write_all(b"PING :tok\r\n").await.unwrap();
            assert_eq!(next_line(&mut lines).await, "PONG :manual");
            (lines, out)
        });

        let config = SessionConfig {
            auto_pong: false,
            ..test_config()
        };
        let mut session = Session::from_stream(client, &config).await.unwrap();
        assert_eq!(session.recv().await.unwrap().command, "PING");
        session
            .send(Message::new("PONG", ["manual"]))
            .await
            .unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn into_parts_exposes_queues() {
        let (client, server) = tokio::io::duplex(4096);
        let handle = tokio::spawn(async move {
            let (mut lines, mut out) = fake_server(server);
            accept_registration(&mut lines, &mut out).await;
            assert_eq!(next_line(&mut lines).await, "NAMES :#c");
            (lines, out)
        });

        let session = Session::from_stream(client, &test_config()).await.unwrap();
        let parts = session.into_parts();
        assert_eq!(parts.server, "irc.test");
        parts
            .outbound
            .send(Message::new("NAMES", ["#c"]))
            .await
            .unwrap();
        handle.await.unwrap();
    }
}
