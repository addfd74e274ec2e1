use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

use super::format_number;

pub struct StatusBar<'a> {
    pub item_count: u64,
    pub size_label: &'a str,
    pub connect_attempts: u64,
    pub dropped_frames: usize,
    pub last_update: Option<&'a str>,
    pub message: Option<&'a str>,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 10 {
            return;
        }

        // If there is a temporary message, show it
        if let Some(msg) = self.message {
            let line = Line::from(Span::styled(
                format!(" {}", msg),
                Style::default().fg(Color::Green),
            ));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let mut spans = Vec::new();

        if self.dropped_frames > 0 {
            spans.push(Span::styled(
                format!(" ! {} malformed frames dropped ", self.dropped_frames),
                Style::default().fg(Color::Red),
            ));
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }

        // Last known metrics survive disconnects
        spans.push(Span::styled(
            format!(
                " Items: {} | Size: {}",
                format_number(self.item_count),
                self.size_label
            ),
            Style::default().fg(Color::White),
        ));

        let mut right = format!("Attempts: {} ", self.connect_attempts);
        if let Some(updated) = self.last_update {
            right = format!("Updated: {} | {}", updated, right);
        }
        let left_len: usize = spans.iter().map(|s| s.width()).sum();
        let padding = (area.width as usize).saturating_sub(left_len + right.len());
        spans.push(Span::raw(format!("{:pad$}", "", pad = padding)));
        spans.push(Span::styled(right, Style::default().fg(Color::DarkGray)));

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
