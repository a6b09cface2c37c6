use ircprims_transport::IrcStream;
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::Result;
use crate::session::Session;

/// Connect to `addr` (`host[:port]`) and register.
pub async fn connect(addr: &str, config: &SessionConfig) -> Result<Session> {
    let stream = open_stream(addr, config).await?;
    debug!(%addr, tls = stream.is_tls(), "starting session");
    Session::from_stream(stream, config).await
}

/// Establish the byte stream for a session without registering.
pub async fn open_stream(addr: &str, config: &SessionConfig) -> Result<IrcStream> {
    let stream = match &config.tls {
        Some(tls) => ircprims_transport::connect_tls(addr, tls, config.connect_timeout).await?,
        None => ircprims_transport::connect(addr, config.connect_timeout).await?,
    };
    Ok(stream)
}
