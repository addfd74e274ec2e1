use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::ui::view_model::Headline;

pub struct TitleBar<'a> {
    headline: Headline,
    endpoint: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(headline: Headline, endpoint: &'a str) -> Self {
        Self { headline, endpoint }
    }
}

impl Widget for TitleBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let headline_color = match self.headline {
            Headline::Offline => Color::Red,
            Headline::Connecting => Color::Yellow,
            _ => Color::Green,
        };

        let mut spans = vec![
            Span::styled(
                " DiskLens Watch ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("(", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.headline.label(),
                Style::default()
                    .fg(headline_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(")", Style::default().fg(Color::DarkGray)),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        ];

        let used: usize = spans.iter().map(|s| s.width()).sum();
        let avail = (area.width as usize).saturating_sub(used + 2);
        spans.push(Span::styled(
            truncate_middle(self.endpoint, avail),
            Style::default().fg(Color::White),
        ));

        let title = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        title.render(area, buf);
    }
}

/// Shortens `text` to `max_width` columns, keeping both ends.
pub fn truncate_middle(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width < 6 {
        return "...".to_string();
    }
    let keep = max_width - 3; // for "..."
    let tail_len = keep / 2;
    let head_len = keep - tail_len;

    let mut w = 0;
    let head_end = text
        .char_indices()
        .find(|&(_, c)| {
            w += c.width().unwrap_or(0);
            w > head_len
        })
        .map(|(i, _)| i)
        .unwrap_or(text.len());

    w = 0;
    let tail_start = text
        .char_indices()
        .rev()
        .find(|&(_, c)| {
            w += c.width().unwrap_or(0);
            w > tail_len
        })
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);

    format!("{}...{}", &text[..head_end], &text[tail_start..])
}

#[cfg(test)]
mod tests {
    use super::truncate_middle;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_middle("ws://localhost:8888/ws", 40), "ws://localhost:8888/ws");
    }

    #[test]
    fn long_text_keeps_both_ends() {
        let out = truncate_middle("ws://a-very-long-hostname.example:8888/ws", 16);
        assert_eq!(out, "ws://a-...888/ws");
    }

    #[test]
    fn tiny_width_collapses() {
        assert_eq!(truncate_middle("ws://localhost:8888/ws", 4), "...");
    }
}
