use crate::config::settings::Settings;
use crate::core::summary::{build_summary, SummarySlice};
use crate::core::sync::SyncState;
use crate::models::size::format_size;
use crate::models::status::{ConnectionState, ScanStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Headline {
    /// Connected, nothing known about the scan yet.
    Blank,
    /// First connection attempt still pending.
    Connecting,
    Offline,
    Scanning,
    Done,
}

impl Headline {
    pub fn label(self) -> &'static str {
        match self {
            Headline::Blank => "",
            Headline::Connecting => "Connecting...",
            Headline::Offline => "Offline",
            Headline::Scanning => "Scanning...",
            Headline::Done => "Done",
        }
    }
}

/// Read-only projection of [`SyncState`] for rendering. Rebuilt every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub connection: ConnectionState,
    pub status: ScanStatus,
    pub headline: Headline,
    pub show_progress: bool,
    pub show_summary: bool,
    pub item_count: u64,
    pub total_size: u64,
    pub size_label: String,
    pub summary: Vec<SummarySlice>,
    pub connect_attempts: u64,
    pub dropped_frames: usize,
    pub last_update: Option<String>,
    pub endpoint: String,
}

impl ViewModel {
    pub fn derive(state: &SyncState, settings: &Settings) -> Self {
        let headline = match (state.connection, state.status) {
            (ConnectionState::Open, ScanStatus::Scanning) => Headline::Scanning,
            (ConnectionState::Open, ScanStatus::Done) => Headline::Done,
            (ConnectionState::Open, ScanStatus::Unknown) => Headline::Blank,
            (ConnectionState::Connecting, _) if !state.has_connected && state.connect_attempts <= 1 => {
                Headline::Connecting
            }
            _ => Headline::Offline,
        };

        let show_summary = state.status == ScanStatus::Done;
        let summary = if show_summary {
            build_summary(&state.history, settings.summary_phases, settings.merge_threshold)
        } else {
            Vec::new()
        };

        Self {
            connection: state.connection,
            status: state.status,
            headline,
            show_progress: state.status == ScanStatus::Scanning,
            show_summary,
            item_count: state.item_count,
            total_size: state.total_size,
            size_label: format_size(state.total_size),
            summary,
            connect_attempts: state.connect_attempts,
            dropped_frames: state.dropped_frames,
            last_update: state.last_update.map(|t| t.format("%H:%M:%S").to_string()),
            endpoint: settings.endpoint_url(),
        }
    }
}
