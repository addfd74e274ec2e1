use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

use crate::ui::app_state::{AppState, ViewMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    Export,
}

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> InputAction {
    if key.kind == KeyEventKind::Release {
        return InputAction::None;
    }

    // Handle Ctrl+C globally
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return InputAction::Quit;
    }

    state.message = None;

    match state.view_mode {
        ViewMode::Live => handle_live_mode(key, state),
        ViewMode::Help => handle_help_mode(key, state),
    }
}

fn handle_live_mode(key: KeyEvent, state: &mut AppState) -> InputAction {
    match key.code {
        KeyCode::Char('q') => {
            state.should_quit = true;
            InputAction::Quit
        }
        KeyCode::Char('?') => {
            state.toggle_help();
            InputAction::None
        }
        KeyCode::Char('x') => InputAction::Export,
        _ => InputAction::None,
    }
}

fn handle_help_mode(key: KeyEvent, state: &mut AppState) -> InputAction {
    match key.code {
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            state.toggle_help();
            InputAction::None
        }
        _ => InputAction::None,
    }
}

pub fn poll_event(timeout: Duration) -> anyhow::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Feeds terminal events from `poll` into `tx` until the receiving side goes
/// away or polling fails.
///
/// Runs on a blocking thread; it has to notice a dropped receiver even when
/// no key is ever pressed again, or runtime shutdown waits on it.
pub fn forward_input<F>(mut poll: F, tx: UnboundedSender<Event>)
where
    F: FnMut() -> anyhow::Result<Option<Event>>,
{
    loop {
        match poll() {
            Ok(Some(event)) => {
                if tx.send(event).is_err() {
                    break;
                }
            }
            Ok(None) if tx.is_closed() => break,
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(error = %e, "terminal input failed");
                break;
            }
        }
    }
}
