use chrono::{DateTime, Local};
use smallvec::SmallVec;

use crate::core::events::Event;
use crate::models::message::{ProgressMessage, ServerMessage};
use crate::models::status::{ConnectionState, ScanStatus};

/// Upper bound on retained size samples; the history is halved past it.
const MAX_HISTORY: usize = 4096;

/// Everything the client knows about the remote scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncState {
    pub connection: ConnectionState,
    pub status: ScanStatus,
    pub item_count: u64,
    pub total_size: u64,
    pub connect_attempts: u64,
    pub has_connected: bool,
    /// Session of the open connection, if any.
    pub session: Option<u64>,
    pub dropped_frames: usize,
    pub last_update: Option<DateTime<Local>>,
    /// `total_size` samples of the current scan, oldest first.
    pub history: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Acknowledge completion to the backend.
    SendCommand,
}

#[derive(Debug)]
pub struct Transition {
    pub state: SyncState,
    pub effects: SmallVec<[Effect; 1]>,
}

/// Applies one event to the state.
///
/// Status only moves to `Scanning` on an unfinished progress message and to
/// `Done` on a finished one, each time only if not already there. Metrics are
/// refreshed by every progress message. A closed connection drops the status
/// back to `Unknown` but keeps the last metrics.
pub fn reduce(mut state: SyncState, event: &Event) -> Transition {
    let mut effects = SmallVec::new();

    match event {
        Event::Connecting { attempt } => {
            state.connection = ConnectionState::Connecting;
            state.connect_attempts = *attempt;
        }
        Event::Opened { session } => {
            state.connection = ConnectionState::Open;
            state.has_connected = true;
            state.session = Some(*session);
        }
        Event::Closed { .. } => {
            state.connection = ConnectionState::Closed;
            state.session = None;
            state.status = ScanStatus::Unknown;
        }
        Event::Message(ServerMessage::Progress(progress)) => {
            if apply_progress(&mut state, progress) {
                effects.push(Effect::SendCommand);
            }
        }
        Event::Message(ServerMessage::Unrecognized) => {}
        Event::MalformedFrame { .. } => {
            state.dropped_frames += 1;
        }
    }

    Transition { state, effects }
}

/// Returns true when the message moved the scan into `Done`.
fn apply_progress(state: &mut SyncState, progress: &ProgressMessage) -> bool {
    let mut completed = false;

    if !progress.done && state.status != ScanStatus::Scanning {
        state.status = ScanStatus::Scanning;
    }
    if progress.done && state.status != ScanStatus::Done {
        state.status = ScanStatus::Done;
        completed = true;
    }

    state.item_count = progress.item_count;
    state.total_size = progress.total_size;
    state.last_update = Some(Local::now());
    record_sample(&mut state.history, progress.total_size);

    completed
}

fn record_sample(history: &mut Vec<u64>, total_size: u64) {
    // A shrinking total means the backend started over.
    if history.last().is_some_and(|&last| total_size < last) {
        history.clear();
    }
    if history.len() >= MAX_HISTORY {
        let mut index = 0;
        history.retain(|_| {
            index += 1;
            index % 2 == 1
        });
    }
    history.push(total_size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::CloseReason;

    fn progress(done: bool, item_count: u64, total_size: u64) -> Event {
        Event::Message(ServerMessage::Progress(ProgressMessage {
            done,
            item_count,
            total_size,
        }))
    }

    fn apply(state: SyncState, events: &[Event]) -> SyncState {
        events.iter().fold(state, |state, event| reduce(state, event).state)
    }

    #[test]
    fn starts_unknown() {
        let state = SyncState::default();
        assert_eq!(state.status, ScanStatus::Unknown);
        assert_eq!(state.connection, ConnectionState::Connecting);
        assert_eq!(state.item_count, 0);
    }

    #[test]
    fn scanning_is_idempotent_but_metrics_update() {
        let state = apply(
            SyncState::default(),
            &[Event::Opened { session: 1 }, progress(false, 1, 100)],
        );
        assert_eq!(state.status, ScanStatus::Scanning);

        let transition = reduce(state, &progress(false, 5, 900));
        assert_eq!(transition.state.status, ScanStatus::Scanning);
        assert_eq!(transition.state.item_count, 5);
        assert_eq!(transition.state.total_size, 900);
        assert!(transition.effects.is_empty());
    }

    #[test]
    fn done_directly_from_unknown() {
        let transition = reduce(SyncState::default(), &progress(true, 3, 30));
        assert_eq!(transition.state.status, ScanStatus::Done);
        assert_eq!(transition.state.item_count, 3);
        assert_eq!(transition.effects.as_slice(), &[Effect::SendCommand]);
    }

    #[test]
    fn acknowledges_completion_once() {
        let state = apply(SyncState::default(), &[progress(false, 1, 1), progress(true, 2, 2)]);
        let transition = reduce(state, &progress(true, 2, 2));
        assert_eq!(transition.state.status, ScanStatus::Done);
        assert!(transition.effects.is_empty());
    }

    #[test]
    fn close_resets_status_and_keeps_metrics() {
        let state = apply(
            SyncState::default(),
            &[
                Event::Connecting { attempt: 1 },
                Event::Opened { session: 1 },
                progress(false, 10, 2048),
                Event::Closed { reason: CloseReason::Remote },
            ],
        );
        assert_eq!(state.connection, ConnectionState::Closed);
        assert_eq!(state.status, ScanStatus::Unknown);
        assert_eq!(state.item_count, 10);
        assert_eq!(state.total_size, 2048);
        assert!(state.has_connected);
        assert_eq!(state.session, None);
    }

    #[test]
    fn session_follows_the_open_connection() {
        let state = apply(
            SyncState::default(),
            &[
                Event::Opened { session: 1 },
                Event::Closed { reason: CloseReason::Remote },
                Event::Connecting { attempt: 2 },
                Event::Opened { session: 2 },
            ],
        );
        assert_eq!(state.session, Some(2));
    }

    #[test]
    fn unrecognized_messages_change_nothing() {
        let state = apply(
            SyncState::default(),
            &[Event::Opened { session: 1 }, progress(false, 1, 1)],
        );
        let before = state.clone();
        let transition = reduce(state, &Event::Message(ServerMessage::Unrecognized));
        assert_eq!(transition.state, before);
    }

    #[test]
    fn malformed_frames_are_counted() {
        let state = apply(
            SyncState::default(),
            &[
                Event::MalformedFrame { error: "eof".into() },
                Event::MalformedFrame { error: "eof".into() },
            ],
        );
        assert_eq!(state.dropped_frames, 2);
        assert_eq!(state.status, ScanStatus::Unknown);
    }

    #[test]
    fn connect_attempts_follow_events() {
        let state = apply(
            SyncState::default(),
            &[Event::Connecting { attempt: 1 }, Event::Connecting { attempt: 2 }],
        );
        assert_eq!(state.connect_attempts, 2);
        assert!(!state.has_connected);
    }

    #[test]
    fn history_resets_when_total_shrinks() {
        let state = apply(
            SyncState::default(),
            &[progress(false, 1, 100), progress(false, 2, 200), progress(false, 1, 50)],
        );
        assert_eq!(state.history, vec![50]);
    }

    #[test]
    fn history_is_bounded() {
        let mut history = Vec::new();
        for size in 0..(MAX_HISTORY as u64 * 3) {
            record_sample(&mut history, size);
        }
        assert!(history.len() <= MAX_HISTORY);
        assert_eq!(history.last(), Some(&(MAX_HISTORY as u64 * 3 - 1)));
    }
}
