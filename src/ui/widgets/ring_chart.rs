use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::core::summary::SummarySlice;
use crate::models::size::format_size;

const COLORS: &[Color] = &[
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Red,
    Color::Magenta,
    Color::Cyan,
    Color::LightBlue,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightRed,
];

const LEGEND_WIDTH: u16 = 30;

/// Doughnut chart of a labeled series, with the total in the middle and a
/// legend on the right. Falls back to horizontal bars in small areas.
pub struct RingChart<'a> {
    items: &'a [SummarySlice],
    total_size: u64,
}

impl<'a> RingChart<'a> {
    pub fn new(items: &'a [SummarySlice], total_size: u64) -> Self {
        Self { items, total_size }
    }

    /// Cumulative end of each slice as a fraction of a full turn.
    fn boundaries(&self) -> Vec<f64> {
        let sum: u64 = self.items.iter().map(|i| i.size).sum();
        if sum == 0 {
            return Vec::new();
        }
        let mut acc = 0u64;
        self.items
            .iter()
            .map(|item| {
                acc += item.size;
                acc as f64 / sum as f64
            })
            .collect()
    }
}

impl Widget for RingChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 2 || area.height < 2 {
            return;
        }

        let boundaries = self.boundaries();
        if boundaries.is_empty() {
            let msg = "No data";
            let x = area.x + area.width.saturating_sub(msg.len() as u16) / 2;
            let y = area.y + area.height / 2;
            buf.set_string(x, y, msg, Style::default().fg(Color::DarkGray));
            return;
        }

        if area.width < 20 || area.height < 10 {
            render_bars(&self, area, buf);
            return;
        }

        let show_legend = area.width > LEGEND_WIDTH + 12;
        let chart_width = if show_legend {
            area.width - LEGEND_WIDTH
        } else {
            area.width
        };
        let chart_area = Rect::new(area.x, area.y, chart_width, area.height);

        // Each cell holds two vertical "pixels" via half blocks, which roughly
        // evens out the 1:2 cell aspect ratio.
        let ring = Ring {
            cx: chart_area.width as f64 / 2.0,
            cy: chart_area.height as f64,
            outer_r: (chart_area.width as f64 / 2.0 * 0.9).min(chart_area.height as f64 * 0.85),
            boundaries: &boundaries,
        };

        for row in 0..chart_area.height {
            for col in 0..chart_area.width {
                let top = ring.color_at(col as f64, row as f64 * 2.0);
                let bottom = ring.color_at(col as f64, row as f64 * 2.0 + 1.0);

                let Some(cell) = buf.cell_mut((chart_area.x + col, chart_area.y + row)) else {
                    continue;
                };
                match (top, bottom) {
                    (Some(t), Some(b)) if t == b => {
                        cell.set_char('\u{2588}');
                        cell.set_fg(t);
                    }
                    (Some(t), Some(b)) => {
                        cell.set_char('\u{2580}');
                        cell.set_fg(t);
                        cell.set_bg(b);
                    }
                    (Some(t), None) => {
                        cell.set_char('\u{2580}');
                        cell.set_fg(t);
                    }
                    (None, Some(b)) => {
                        cell.set_char('\u{2584}');
                        cell.set_fg(b);
                    }
                    (None, None) => {}
                }
            }
        }

        let center = format_size(self.total_size);
        buf.set_string(
            chart_area.x + chart_area.width.saturating_sub(center.len() as u16) / 2,
            chart_area.y + chart_area.height / 2,
            &center,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        );

        if show_legend {
            render_legend(
                self.items,
                Rect::new(
                    chart_area.x + chart_area.width + 1,
                    area.y,
                    LEGEND_WIDTH - 1,
                    area.height,
                ),
                buf,
            );
        }
    }
}

struct Ring<'a> {
    cx: f64,
    cy: f64,
    outer_r: f64,
    boundaries: &'a [f64],
}

impl Ring<'_> {
    fn color_at(&self, px: f64, py: f64) -> Option<Color> {
        let dx = px - self.cx;
        let dy = py - self.cy;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist < self.outer_r * 0.5 || dist > self.outer_r {
            return None;
        }

        // Clockwise from 12 o'clock, as a fraction of a turn
        let turn = (dy.atan2(dx) + FRAC_PI_2).rem_euclid(TAU) / TAU;
        let index = self
            .boundaries
            .iter()
            .position(|&end| turn < end)
            .unwrap_or(self.boundaries.len() - 1);
        Some(COLORS[index % COLORS.len()])
    }
}

fn render_legend(items: &[SummarySlice], area: Rect, buf: &mut Buffer) {
    for (i, item) in items.iter().take(area.height as usize).enumerate() {
        let y = area.y + i as u16;
        buf.set_string(area.x, y, "\u{2588}\u{2588}", Style::default().fg(COLORS[i % COLORS.len()]));

        let detail = format!("{} {:4.1}%", format_size(item.size), item.percentage);
        let name_max = (area.width as usize).saturating_sub(detail.len() + 4);
        // Labels are ASCII
        let label = if item.label.len() > name_max {
            format!("{}~", &item.label[..name_max.saturating_sub(1)])
        } else {
            item.label.to_string()
        };

        buf.set_string(area.x + 3, y, &label, Style::default().fg(Color::Gray));
        let detail_x = area.x + area.width.saturating_sub(detail.len() as u16);
        if detail_x > area.x + 3 + label.len() as u16 {
            buf.set_string(detail_x, y, &detail, Style::default().fg(Color::DarkGray));
        }
    }
}

fn render_bars(chart: &RingChart, area: Rect, buf: &mut Buffer) {
    let sum: u64 = chart.items.iter().map(|i| i.size).sum();

    let title = format_size(chart.total_size);
    buf.set_string(
        area.x + area.width.saturating_sub(title.len() as u16) / 2,
        area.y,
        &title,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    );

    let bar_width = area.width.saturating_sub(2) as usize;
    let rows = area.height.saturating_sub(1) as usize;

    for (i, item) in chart.items.iter().take(rows).enumerate() {
        let y = area.y + 1 + i as u16;
        let filled = ((item.size as f64 / sum as f64) * bar_width as f64).round() as usize;
        let filled = filled.max(1);

        buf.set_string(
            area.x + 1,
            y,
            "\u{2588}".repeat(filled),
            Style::default().fg(COLORS[i % COLORS.len()]),
        );

        let pct = format!(" {:4.1}%", item.percentage);
        let pct_x = area.x + 1 + filled as u16;
        if pct_x + pct.len() as u16 <= area.x + area.width {
            buf.set_string(pct_x, y, &pct, Style::default().fg(Color::DarkGray));
        }
    }
}

#[cfg(test)]
mod tests {
    use compact_str::CompactString;

    use super::*;

    fn slice(label: &str, size: u64, percentage: f64) -> SummarySlice {
        SummarySlice {
            label: CompactString::new(label),
            size,
            percentage,
            is_merged: false,
            merged_count: 0,
        }
    }

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn empty_series_says_no_data() {
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        RingChart::new(&[], 0).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("No data"));
    }

    #[test]
    fn large_area_draws_ring_total_and_legend() {
        let items = [slice("Phase 1/2", 1024, 25.0), slice("Phase 2/2", 3072, 75.0)];
        let area = Rect::new(0, 0, 70, 16);
        let mut buf = Buffer::empty(area);
        RingChart::new(&items, 4096).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("4.0 KiB"));
        assert!(text.contains("Phase 1/2"));
        assert!(text.contains("75.0%"));
        assert!(text.contains('\u{2588}'));
    }

    #[test]
    fn small_area_falls_back_to_bars() {
        let items = [slice("Phase 1/2", 1024, 50.0), slice("Phase 2/2", 1024, 50.0)];
        let area = Rect::new(0, 0, 18, 4);
        let mut buf = Buffer::empty(area);
        RingChart::new(&items, 2048).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("2.0 KiB"));
        assert!(text.contains("50.0%"));
        assert!(!text.contains("Phase"));
    }

    #[test]
    fn boundaries_are_cumulative() {
        let items = [slice("a", 1, 25.0), slice("b", 3, 75.0)];
        let chart = RingChart::new(&items, 4);
        assert_eq!(chart.boundaries(), vec![0.25, 1.0]);
    }
}
