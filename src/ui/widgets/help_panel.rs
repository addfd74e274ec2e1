use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

pub struct HelpPanel<'a> {
    pub endpoint: &'a str,
    pub reconnect_delay_ms: u64,
}

impl Widget for HelpPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let section = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        let help_text = vec![
            Line::from(Span::styled(
                " DiskLens Watch - Keyboard Shortcuts ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled("  Actions", section)),
            help_line("    x           ", "Export completion report"),
            help_line("    ?           ", "Toggle this help"),
            help_line("    q / Ctrl+C  ", "Quit"),
            Line::from(""),
            Line::from(Span::styled("  Connection", section)),
            Line::from(vec![
                Span::styled("    Endpoint    ", Style::default().fg(Color::Green)),
                Span::raw(self.endpoint.to_string()),
            ]),
            Line::from(vec![
                Span::styled("    Retry every ", Style::default().fg(Color::Green)),
                Span::raw(format!("{} ms, forever", self.reconnect_delay_ms)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  Press ? or Esc to close",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .style(Style::default().bg(Color::Black))
            .wrap(Wrap { trim: false });
        help.render(area, buf);
    }
}

fn help_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(key, Style::default().fg(Color::Green)),
        Span::raw(desc),
    ])
}
