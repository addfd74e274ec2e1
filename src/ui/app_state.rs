#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Live,
    Help,
}

/// Terminal-side state that is not part of the scan itself.
#[derive(Debug)]
pub struct AppState {
    pub view_mode: ViewMode,
    pub should_quit: bool,
    /// One-off notice shown in the status bar until the next key press.
    pub message: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            view_mode: ViewMode::Live,
            should_quit: false,
            message: None,
        }
    }

    pub fn toggle_help(&mut self) {
        self.view_mode = if self.view_mode == ViewMode::Help {
            ViewMode::Live
        } else {
            ViewMode::Help
        };
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
