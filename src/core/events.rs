use tokio::sync::mpsc;

use crate::models::message::{ClientMessage, ServerMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// The handshake never completed.
    ConnectFailed(String),
    /// The transport failed while open; the channel was force-closed.
    Error(String),
    /// The peer closed the channel.
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // Connection lifecycle
    Connecting { attempt: u64 },
    /// `session` identifies this connection until the matching `Closed`.
    Opened { session: u64 },
    Closed { reason: CloseReason },

    // Inbound frames
    Message(ServerMessage),
    MalformedFrame { error: String },
}

/// An outbound message bound to the connection it was issued for. The
/// manager drops it if that connection is gone by the time it is dequeued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub session: u64,
    pub message: ClientMessage,
}

pub type EventSender = mpsc::UnboundedSender<Event>;
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

pub type CommandSender = mpsc::UnboundedSender<Command>;
pub type CommandReceiver = mpsc::UnboundedReceiver<Command>;

pub fn create_event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

pub fn create_command_channel() -> (CommandSender, CommandReceiver) {
    mpsc::unbounded_channel()
}
