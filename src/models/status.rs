use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConnectionState {
    #[default]
    Connecting,
    Open,
    Closed,
}

/// Scan lifecycle as seen by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScanStatus {
    #[default]
    Unknown,
    Scanning,
    Done,
}
