use std::time::Duration;

use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::{debug, info};

use crate::addr::ServerAddr;
use crate::error::{Result, TransportError};
use crate::stream::IrcStream;
use crate::tls::TlsConfig;

/// Default bound on TCP connect plus TLS handshake.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connect to a server over plain TCP.
pub async fn connect(addr: &str, timeout: Duration) -> Result<IrcStream> {
    let addr = ServerAddr::parse(addr)?;
    let stream = tcp_connect(&addr, timeout).await?;
    info!(%addr, "connected");
    Ok(IrcStream::from_tcp(stream))
}

/// Connect to a server and negotiate TLS.
pub async fn connect_tls(addr: &str, config: &TlsConfig, timeout: Duration) -> Result<IrcStream> {
    let addr = ServerAddr::parse(addr)?;
    let server_name = ServerName::try_from(addr.host.clone())
        .map_err(|_| TransportError::InvalidServerName(addr.host.clone()))?;
    let connector = TlsConnector::from(config.client_config()?);

    let handshake = async {
        let stream = tcp_connect(&addr, timeout).await?;
        debug!(%addr, insecure = config.accept_invalid_certs, "starting TLS handshake");
        connector
            .connect(server_name, stream)
            .await
            .map_err(|source| TransportError::Handshake {
                addr: addr.to_string(),
                source,
            })
    };
    let stream = tokio::time::timeout(timeout, handshake)
        .await
        .map_err(|_| TransportError::Timeout(timeout))??;

    info!(%addr, "connected with TLS");
    Ok(IrcStream::from_tls(stream))
}

async fn tcp_connect(addr: &ServerAddr, timeout: Duration) -> Result<TcpStream> {
    let stream = tokio::time::timeout(timeout, TcpStream::connect((addr.host.as_str(), addr.port)))
        .await
        .map_err(|_| TransportError::Timeout(timeout))?
        .map_err(|source| TransportError::Connect {
            addr: addr.to_string(),
            source,
        })?;
    stream.set_nodelay(true)?;
    Ok(stream)
}
