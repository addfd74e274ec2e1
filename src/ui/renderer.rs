use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::config::settings::Settings;
use crate::ui::app_state::{AppState, ViewMode};
use crate::ui::view_model::{Headline, ViewModel};
use crate::ui::widgets::help_panel::HelpPanel;
use crate::ui::widgets::progress_panel::ProgressPanel;
use crate::ui::widgets::ring_chart::RingChart;
use crate::ui::widgets::status_bar::StatusBar;
use crate::ui::widgets::title_bar::TitleBar;

pub fn render(frame: &mut Frame, view: &ViewModel, state: &AppState, settings: &Settings) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(5),    // main content
            Constraint::Length(1), // status bar
            Constraint::Length(1), // key hints
        ])
        .split(area);

    frame.render_widget(TitleBar::new(view.headline, &view.endpoint), chunks[0]);

    if view.show_progress {
        frame.render_widget(
            ProgressPanel {
                item_count: view.item_count,
                size_label: &view.size_label,
            },
            centered_lines(60, 6, chunks[1]),
        );
    } else if view.show_summary {
        let block = Block::default()
            .title(" Summary ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);
        frame.render_widget(RingChart::new(&view.summary, view.total_size), inner);
    } else {
        render_idle(frame, chunks[1], view);
    }

    frame.render_widget(
        StatusBar {
            item_count: view.item_count,
            size_label: &view.size_label,
            connect_attempts: view.connect_attempts,
            dropped_frames: view.dropped_frames,
            last_update: view.last_update.as_deref(),
            message: state.message.as_deref(),
        },
        chunks[2],
    );

    let mut hints = vec![
        Span::styled(" ?", Style::default().fg(Color::Yellow)),
        Span::styled(": Help  ", Style::default().fg(Color::DarkGray)),
    ];
    if view.show_summary {
        hints.push(Span::styled("x", Style::default().fg(Color::Yellow)));
        hints.push(Span::styled(": Export  ", Style::default().fg(Color::DarkGray)));
    }
    hints.push(Span::styled("q", Style::default().fg(Color::Yellow)));
    hints.push(Span::styled(": Quit", Style::default().fg(Color::DarkGray)));
    frame.render_widget(Paragraph::new(Line::from(hints)), chunks[3]);

    if state.view_mode == ViewMode::Help {
        frame.render_widget(
            HelpPanel {
                endpoint: &view.endpoint,
                reconnect_delay_ms: settings.reconnect_delay_ms,
            },
            centered_rect(60, 50, area),
        );
    }
}

fn render_idle(frame: &mut Frame, area: Rect, view: &ViewModel) {
    let (text, color) = match view.headline {
        Headline::Offline => ("Backend unreachable, retrying...", Color::Red),
        Headline::Connecting => ("Connecting to backend...", Color::Yellow),
        _ => ("Waiting for scan progress...", Color::DarkGray),
    };
    let hint = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::ITALIC),
    )))
    .centered();
    frame.render_widget(hint, centered_lines(80, 1, area));
}

/// Centered rectangle with a fixed number of rows.
fn centered_lines(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let width = (area.width as u32 * percent_x.min(100) as u32 / 100) as u16;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Helper to create a centered rectangle within a given area
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
