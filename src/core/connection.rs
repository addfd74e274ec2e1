use std::time::Duration;

use crate::core::events::{CloseReason, Command, CommandReceiver, Event, EventSender};
use crate::core::transport::{Channel, Frame, Sleeper, Transport};
use crate::models::message::{decode_frame, encode_frame};

/// Keeps one realtime channel to the backend alive for as long as anyone
/// listens for its events.
///
/// Every termination, clean or not, is reported as [`Event::Closed`] and
/// followed by a fixed delay and a fresh connection attempt. There is no retry
/// limit and the delay never grows.
///
/// Each open connection gets a session id (its attempt number). Commands are
/// only written to the connection whose session they carry, so nothing queued
/// for an earlier connection leaks onto a later one.
pub struct ConnectionManager<T: Transport, S: Sleeper> {
    url: String,
    reconnect_delay: Duration,
    transport: T,
    sleeper: S,
    events: EventSender,
    commands: CommandReceiver,
    commands_open: bool,
}

enum PumpExit {
    Closed(CloseReason),
    Shutdown,
}

impl<T: Transport, S: Sleeper> ConnectionManager<T, S> {
    pub fn new(
        url: impl Into<String>,
        reconnect_delay: Duration,
        transport: T,
        sleeper: S,
        events: EventSender,
        commands: CommandReceiver,
    ) -> Self {
        Self {
            url: url.into(),
            reconnect_delay,
            transport,
            sleeper,
            events,
            commands,
            commands_open: true,
        }
    }

    /// Runs the connect / pump / reconnect loop until the event receiver is
    /// dropped.
    pub async fn run(mut self) {
        let mut attempt: u64 = 0;

        loop {
            attempt += 1;
            if !self.emit(Event::Connecting { attempt }) {
                break;
            }

            let reason = match self.transport.connect(&self.url).await {
                Ok(channel) => {
                    tracing::info!(url = %self.url, attempt, "connected");
                    if !self.emit(Event::Opened { session: attempt }) {
                        break;
                    }
                    match self.pump(channel, attempt).await {
                        PumpExit::Closed(reason) => reason,
                        PumpExit::Shutdown => break,
                    }
                }
                Err(e) => {
                    tracing::debug!(url = %self.url, attempt, error = %e, "connect failed");
                    CloseReason::ConnectFailed(e.to_string())
                }
            };

            if !self.emit(Event::Closed { reason }) {
                break;
            }

            self.sleeper.sleep(self.reconnect_delay).await;
        }

        tracing::debug!("event receiver dropped, connection manager stopped");
    }

    async fn pump(&mut self, mut channel: T::Channel, session: u64) -> PumpExit {
        loop {
            tokio::select! {
                frame = channel.recv() => match frame {
                    Some(Ok(Frame::Text(text))) => {
                        if !self.dispatch(text.as_bytes()) {
                            return PumpExit::Shutdown;
                        }
                    }
                    Some(Ok(Frame::Binary(bytes))) => {
                        if !self.dispatch(&bytes) {
                            return PumpExit::Shutdown;
                        }
                    }
                    Some(Err(e)) => {
                        tracing::warn!(url = %self.url, error = %e, "transport error, closing channel");
                        channel.close().await;
                        return PumpExit::Closed(CloseReason::Error(e.to_string()));
                    }
                    None => {
                        tracing::info!(url = %self.url, "channel closed by peer");
                        return PumpExit::Closed(CloseReason::Remote);
                    }
                },
                command = self.commands.recv(), if self.commands_open => match command {
                    Some(command) if command.session != session => {
                        tracing::debug!(
                            ?command,
                            session,
                            "dropping command issued for an earlier connection"
                        );
                    }
                    Some(Command { message, .. }) => {
                        let text = match encode_frame(&message) {
                            Ok(text) => text,
                            Err(e) => {
                                tracing::error!(error = %e, "failed to encode command");
                                continue;
                            }
                        };
                        if let Err(e) = channel.send(text).await {
                            tracing::warn!(url = %self.url, error = %e, "send failed, closing channel");
                            channel.close().await;
                            return PumpExit::Closed(CloseReason::Error(e.to_string()));
                        }
                        tracing::debug!(?message, "command sent");
                    }
                    None => self.commands_open = false,
                },
            }
        }
    }

    /// Decodes one frame and forwards it. Returns false once nobody listens.
    fn dispatch(&self, bytes: &[u8]) -> bool {
        match decode_frame(bytes) {
            Ok(message) => self.emit(Event::Message(message)),
            Err(e) => {
                tracing::debug!(error = %e, len = bytes.len(), "dropping malformed frame");
                self.emit(Event::MalformedFrame { error: e.to_string() })
            }
        }
    }

    fn emit(&self, event: Event) -> bool {
        self.events.send(event).is_ok()
    }
}
