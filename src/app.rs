use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::Event as TermEvent;
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::settings::Settings;
use crate::core::connection::ConnectionManager;
use crate::core::events::{self, Command, CommandSender, Event, EventReceiver};
use crate::core::sync::{self, Effect, SyncState};
use crate::core::transport::{TokioSleeper, WsTransport};
use crate::export::json::{export_report, CompletionReport};
use crate::models::message::ClientMessage;
use crate::models::status::ScanStatus;
use crate::ui::app_state::AppState;
use crate::ui::input::{self, InputAction};
use crate::ui::renderer;
use crate::ui::view_model::{Headline, ViewModel};

pub struct App {
    settings: Settings,
    sync: SyncState,
    ui: AppState,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            sync: SyncState::default(),
            ui: AppState::new(),
        }
    }

    pub fn sync_state(&self) -> &SyncState {
        &self.sync
    }

    pub fn view(&self) -> ViewModel {
        ViewModel::derive(&self.sync, &self.settings)
    }

    /// Folds one connection event into the state and carries out whatever the
    /// transition asks for.
    pub fn apply(&mut self, event: &Event, commands: &CommandSender) {
        let transition = sync::reduce(std::mem::take(&mut self.sync), event);
        self.sync = transition.state;

        for effect in transition.effects {
            match effect {
                Effect::SendCommand if self.settings.send_completion_ack => {
                    let Some(session) = self.sync.session else {
                        tracing::debug!("no open connection, completion ack dropped");
                        continue;
                    };
                    let command = Command {
                        session,
                        message: ClientMessage::Command,
                    };
                    if commands.send(command).is_err() {
                        tracing::debug!("connection manager gone, completion ack dropped");
                    }
                }
                Effect::SendCommand => {}
            }
        }
    }

    fn spawn_connection(&self) -> (EventReceiver, CommandSender, JoinHandle<()>) {
        let (event_tx, event_rx) = events::create_event_channel();
        let (command_tx, command_rx) = events::create_command_channel();
        let manager = ConnectionManager::new(
            self.settings.endpoint_url(),
            self.settings.reconnect_delay(),
            WsTransport,
            TokioSleeper,
            event_tx,
            command_rx,
        );
        tracing::info!(url = %self.settings.endpoint_url(), "starting connection manager");
        (event_rx, command_tx, tokio::spawn(manager.run()))
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Initialize terminal
        terminal::enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let (event_rx, commands, connection) = self.spawn_connection();

        let result = self.event_loop(&mut terminal, event_rx, &commands).await;
        connection.abort();

        // Restore terminal
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
        mut event_rx: EventReceiver,
        commands: &CommandSender,
    ) -> anyhow::Result<()> {
        // Terminal input is blocking, so it gets its own thread feeding a channel.
        let (input_tx, mut input_rx) = mpsc::unbounded_channel::<TermEvent>();
        let _input_thread = tokio::task::spawn_blocking(move || {
            input::forward_input(|| input::poll_event(Duration::from_millis(50)), input_tx)
        });

        let mut tick_interval = tokio::time::interval(self.settings.tick_rate());

        loop {
            let view = self.view();
            terminal.draw(|frame| {
                renderer::render(frame, &view, &self.ui, &self.settings);
            })?;

            tokio::select! {
                input_event = input_rx.recv() => {
                    match input_event {
                        Some(TermEvent::Key(key)) => {
                            match input::handle_key_event(key, &mut self.ui) {
                                InputAction::Quit => return Ok(()),
                                InputAction::Export => self.handle_export(&view),
                                InputAction::None => {}
                            }
                        }
                        // Resize and friends: the next iteration redraws
                        Some(_) => {}
                        None => return Ok(()),
                    }
                }
                sync_event = event_rx.recv() => {
                    match sync_event {
                        Some(event) => self.apply(&event, commands),
                        None => anyhow::bail!("connection manager stopped unexpectedly"),
                    }
                }
                _ = tick_interval.tick() => {}
            }

            if self.ui.should_quit {
                return Ok(());
            }
        }
    }

    fn handle_export(&mut self, view: &ViewModel) {
        if view.status != ScanStatus::Done {
            self.ui.set_message("Nothing to export until the scan is done");
            return;
        }
        let path = self.settings.export_dir.join(format!(
            "disklens_watch_report_{}.json",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        ));
        match export_report(&CompletionReport::from_view(view), &path) {
            Ok(()) => {
                tracing::info!("Exported to: {}", path.display());
                self.ui.set_message(format!("Exported to: {}", path.display()));
            }
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                self.ui.set_message(format!("Export failed: {}", e));
            }
        }
    }

    /// Line-oriented mode without a terminal UI.
    ///
    /// With `export_path` set, returns as soon as the scan completes and the
    /// report is written; otherwise runs until Ctrl+C.
    pub async fn run_headless(&mut self, export_path: Option<PathBuf>) -> anyhow::Result<()> {
        let (mut event_rx, commands, connection) = self.spawn_connection();
        let result = self.headless_loop(&mut event_rx, &commands, export_path.as_deref()).await;
        connection.abort();
        result
    }

    async fn headless_loop(
        &mut self,
        event_rx: &mut EventReceiver,
        commands: &CommandSender,
        export_path: Option<&Path>,
    ) -> anyhow::Result<()> {
        let mut last_headline = None;

        loop {
            let event = tokio::select! {
                event = event_rx.recv() => match event {
                    Some(event) => event,
                    None => anyhow::bail!("connection manager stopped unexpectedly"),
                },
                _ = tokio::signal::ctrl_c() => return Ok(()),
            };

            self.apply(&event, commands);
            let view = self.view();

            let is_message = matches!(event, Event::Message(_));
            if is_message || last_headline != Some(view.headline) {
                println!("{}", headless_line(&view));
                last_headline = Some(view.headline);
            }

            if let (Some(path), ScanStatus::Done) = (export_path, view.status) {
                export_report(&CompletionReport::from_view(&view), path)?;
                println!("Exported to: {}", path.display());
                return Ok(());
            }
        }
    }
}

fn headless_line(view: &ViewModel) -> String {
    let headline = match view.headline {
        Headline::Blank => "Connected",
        other => other.label(),
    };
    format!(
        "[{}] items: {} size: {}",
        headline, view.item_count, view.size_label
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::{create_command_channel, CloseReason};
    use crate::models::message::{ProgressMessage, ServerMessage};

    fn progress(done: bool, item_count: u64, total_size: u64) -> Event {
        Event::Message(ServerMessage::Progress(ProgressMessage {
            done,
            item_count,
            total_size,
        }))
    }

    #[test]
    fn completion_queues_ack() {
        let mut app = App::new(Settings::default());
        let (tx, mut rx) = create_command_channel();

        app.apply(&Event::Opened { session: 1 }, &tx);
        app.apply(&progress(false, 10, 2048), &tx);
        assert!(rx.try_recv().is_err());

        app.apply(&progress(true, 12, 4096), &tx);
        assert_eq!(
            rx.try_recv().ok(),
            Some(Command {
                session: 1,
                message: ClientMessage::Command,
            })
        );

        app.apply(&progress(true, 12, 4096), &tx);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn ack_is_bound_to_the_current_connection() {
        let mut app = App::new(Settings::default());
        let (tx, mut rx) = create_command_channel();

        app.apply(&Event::Opened { session: 1 }, &tx);
        app.apply(&Event::Closed { reason: CloseReason::Remote }, &tx);
        app.apply(&Event::Connecting { attempt: 2 }, &tx);
        app.apply(&Event::Opened { session: 2 }, &tx);
        app.apply(&progress(true, 3, 300), &tx);

        assert_eq!(rx.try_recv().ok().map(|c| c.session), Some(2));
    }

    #[test]
    fn no_ack_without_an_open_connection() {
        let mut app = App::new(Settings::default());
        let (tx, mut rx) = create_command_channel();
        app.apply(&progress(true, 1, 1), &tx);
        assert_eq!(app.sync_state().status, ScanStatus::Done);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn ack_can_be_disabled() {
        let settings = Settings {
            send_completion_ack: false,
            ..Settings::default()
        };
        let mut app = App::new(settings);
        let (tx, mut rx) = create_command_channel();
        app.apply(&progress(true, 1, 1), &tx);
        assert_eq!(app.sync_state().status, ScanStatus::Done);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn headless_lines() {
        let mut app = App::new(Settings::default());
        let (tx, _rx) = create_command_channel();

        app.apply(&Event::Opened { session: 1 }, &tx);
        assert_eq!(headless_line(&app.view()), "[Connected] items: 0 size: 0 B");

        app.apply(&progress(false, 10, 2048), &tx);
        assert_eq!(headless_line(&app.view()), "[Scanning...] items: 10 size: 2.0 KiB");

        app.apply(&Event::Closed { reason: CloseReason::Remote }, &tx);
        assert_eq!(headless_line(&app.view()), "[Offline] items: 10 size: 2.0 KiB");
    }

    #[test]
    fn export_requires_done() {
        let mut app = App::new(Settings::default());
        let view = app.view();
        app.handle_export(&view);
        assert_eq!(
            app.ui.message.as_deref(),
            Some("Nothing to export until the scan is done")
        );
    }
}
