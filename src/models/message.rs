use serde::{Deserialize, Serialize};

/// Snapshot of the backend scan at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProgressMessage {
    pub done: bool,
    pub item_count: u64,
    pub total_size: u64,
}

/// Frames sent by the backend, tagged by `MsgType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "MsgType", rename_all = "lowercase")]
pub enum ServerMessage {
    Progress(ProgressMessage),
    #[serde(other)]
    Unrecognized,
}

/// Frames sent back to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "MsgType", rename_all = "lowercase")]
pub enum ClientMessage {
    /// Acknowledges a completed scan.
    Command,
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn decode_frame(bytes: &[u8]) -> Result<ServerMessage, FrameError> {
    Ok(serde_json::from_slice(bytes)?)
}

pub fn encode_frame(message: &ClientMessage) -> Result<String, FrameError> {
    Ok(serde_json::to_string(message)?)
}
