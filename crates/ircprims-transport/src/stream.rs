use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;

/// A connected server stream. Implements `AsyncRead + AsyncWrite`.
///
/// This is the fundamental I/O type returned by transport operations.
/// It wraps either a plain TCP stream or a TLS session over TCP.
pub struct IrcStream {
    inner: IrcStreamInner,
}

enum IrcStreamInner {
    Tcp(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl IrcStream {
    pub(crate) fn from_tcp(stream: TcpStream) -> Self {
        Self {
            inner: IrcStreamInner::Tcp(stream),
        }
    }

    pub(crate) fn from_tls(stream: TlsStream<TcpStream>) -> Self {
        Self {
            inner: IrcStreamInner::Tls(Box::new(stream)),
        }
    }

    /// Whether the stream is encrypted.
    pub fn is_tls(&self) -> bool {
        matches!(self.inner, IrcStreamInner::Tls(_))
    }

    /// Address of the connected server.
    pub fn peer_addr(&self) -> io::Result<SocketAddr> {
        match &self.inner {
            IrcStreamInner::Tcp(stream) => stream.peer_addr(),
            IrcStreamInner::Tls(stream) => stream.get_ref().0.peer_addr(),
        }
    }
}

impl AsyncRead for IrcStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match &mut self.get_mut().inner {
            IrcStreamInner::Tcp(stream) => Pin::new(stream).poll_read(cx, buf),
            IrcStreamInner::Tls(stream) => Pin::new(stream.as_mut()).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for IrcStream {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match &mut self.get_mut().inner {
            IrcStreamInner::Tcp(stream) => Pin::new(stream).poll_write(cx, buf),
            IrcStreamInner::Tls(stream) => Pin::new(stream.as_mut()).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut self.get_mut().inner {
            IrcStreamInner::Tcp(stream) => Pin::new(stream).poll_flush(cx),
            IrcStreamInner::Tls(stream) => Pin::new(stream.as_mut()).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut self.get_mut().inner {
            IrcStreamInner::Tcp(stream) => Pin::new(stream).poll_shutdown(cx),
            IrcStreamInner::Tls(stream) => Pin::new(stream.as_mut()).poll_shutdown(cx),
        }
    }
}

impl std::fmt::Debug for IrcStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            IrcStreamInner::Tcp(_) => f.debug_struct("IrcStream").field("type", &"tcp").finish(),
            IrcStreamInner::Tls(_) => f.debug_struct("IrcStream").field("type", &"tls").finish(),
        }
    }
}
