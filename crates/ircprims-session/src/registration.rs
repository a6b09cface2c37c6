use ircprims_frame::{command, is_registration_failure, Message};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};

/// Progress of the `PASS`/`NICK`/`USER` exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationState {
    /// Nothing sent yet.
    Connecting,
    /// Credentials sent; waiting for the welcome reply.
    AwaitingWelcome,
    /// Registered with `server`, the origin of the welcome reply.
    Ready { server: String },
    /// The server rejected registration.
    Failed { reason: String },
}

impl RegistrationState {
    /// Feed one inbound message.
    ///
    /// Returns the next state and, for a `PING`, the `PONG` to send back.
    /// Messages are only interpreted while awaiting the welcome reply.
    pub fn advance(self, message: &Message) -> (RegistrationState, Option<Message>) {
        if self != RegistrationState::AwaitingWelcome {
            return (self, None);
        }

        match message.command.as_str() {
            cmd if is_registration_failure(cmd) => {
                let reason = message
                    .last_argument()
                    .map(str::to_string)
                    .or_else(|| message.command_name().map(str::to_string))
                    .unwrap_or_else(|| message.command.clone());
                (RegistrationState::Failed { reason }, None)
            }
            command::RPL_WELCOME => {
                let server = message.origin.clone().unwrap_or_default();
                (RegistrationState::Ready { server }, None)
            }
            command::PING => {
                let pong = Message::new(command::PONG, message.arguments.iter().cloned());
                (self, Some(pong))
            }
            _ => (self, None),
        }
    }

    /// Whether registration has concluded either way.
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            RegistrationState::Ready { .. } | RegistrationState::Failed { .. }
        )
    }
}

/// The messages that open registration, in send order.
pub fn registration_messages(config: &SessionConfig) -> Vec<Message> {
    let mut messages = Vec::with_capacity(3);
    if let Some(password) = config.password.as_deref().filter(|p| !p.is_empty()) {
        messages.push(Message::new(command::PASS, [password]));
    }
    messages.push(Message::new(command::NICK, [config.nick.as_str()]));
    messages.push(Message::new(
        command::USER,
        [config.nick.as_str(), "0", "*", config.full_name.as_str()],
    ));
    messages
}

/// Run the registration exchange over the session queues.
///
/// Messages consumed here are not delivered to the caller. Returns the
/// server name from the welcome reply.
pub(crate) async fn register(
    inbound: &mut mpsc::Receiver<Message>,
    outbound: &mpsc::Sender<Message>,
    config: &SessionConfig,
) -> Result<String> {
    match config.registration_timeout {
        Some(limit) => tokio::time::timeout(limit, exchange(inbound, outbound, config))
            .await
            .map_err(|_| SessionError::Timeout(limit))?,
        None => exchange(inbound, outbound, config).await,
    }
}

async fn exchange(
    inbound: &mut mpsc::Receiver<Message>,
    outbound: &mpsc::Sender<Message>,
    config: &SessionConfig,
) -> Result<String> {
    for message in registration_messages(config) {
        outbound
            .send(message)
            .await
            .map_err(|_| SessionError::Disconnected)?;
    }
    let mut state = RegistrationState::AwaitingWelcome;
    debug!(nick = %config.nick, "registration sent");

    while !state.is_finished() {
        let Some(message) = inbound.recv().await else {
            break;
        };
        let (next, reply) = state.advance(&message);
        if let Some(reply) = reply {
            outbound
                .send(reply)
                .await
                .map_err(|_| SessionError::Disconnected)?;
        }
        state = next;
    }

    match state {
        RegistrationState::Ready { server } => Ok(server),
        RegistrationState::Failed { reason } => {
            warn!(nick = %config.nick, %reason, "registration rejected");
            Err(SessionError::RegistrationFailed(reason))
        }
        RegistrationState::Connecting | RegistrationState::AwaitingWelcome => Err(
            SessionError::RegistrationFailed("unexpected end of stream".to_string()),
        ),
    }
}
