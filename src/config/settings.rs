use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub path: String,
    /// Full endpoint URL; takes precedence over host, port and path.
    pub url: Option<String>,
    pub reconnect_delay_ms: u64,
    pub send_completion_ack: bool,
    pub tick_rate_ms: u64,
    pub summary_phases: usize,
    pub merge_threshold: f64,
    pub export_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: 8888,
            path: String::from("/ws"),
            url: None,
            reconnect_delay_ms: 1000,
            send_completion_ack: true,
            tick_rate_ms: 250,
            summary_phases: 5,
            merge_threshold: 0.02,
            export_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    pub fn endpoint_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };
        format!("ws://{}:{}{}", self.host, self.port, path)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }
}
