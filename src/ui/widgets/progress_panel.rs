use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use super::format_number;

/// Live counters shown while the backend is scanning.
pub struct ProgressPanel<'a> {
    pub item_count: u64,
    pub size_label: &'a str,
}

impl Widget for ProgressPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Progress ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 2 || inner.width < 16 {
            return;
        }

        let value_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        let lines = [
            Line::from(vec![
                Span::styled("Total items: ", Style::default().fg(Color::White)),
                Span::styled(format_number(self.item_count), value_style),
            ]),
            Line::from(vec![
                Span::styled("Size: ", Style::default().fg(Color::White)),
                Span::styled(self.size_label, value_style),
            ]),
        ];

        // Centered both ways
        let top = inner.y + inner.height.saturating_sub(lines.len() as u16) / 2;
        for (i, line) in lines.iter().enumerate() {
            let x = inner.x + inner.width.saturating_sub(line.width() as u16) / 2;
            buf.set_line(x, top + i as u16, line, inner.width);
        }
    }
}
