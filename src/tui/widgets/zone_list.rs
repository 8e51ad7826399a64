use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block as Frame, Borders, Paragraph, Widget};

use crate::tui::animation::slide_offset;
use crate::util::format_seconds;
use crate::workout::{Block, Zone};

/// Display color of a zone.
pub fn zone_color(zone: &Zone) -> Color {
    match zone {
        Zone::Recovery => Color::Blue,
        Zone::Endurance => Color::Green,
        Zone::Tempo => Color::Yellow,
        Zone::Threshold => Color::LightRed,
        Zone::Sprint => Color::Red,
        Zone::Unknown(_) => Color::Gray,
    }
}

/// The plan's blocks, one row each, sliding in from the right.
pub struct ZoneListWidget<'a> {
    blocks: &'a [Block],
    current: Option<usize>,
    finished: bool,
    /// Visible fraction per row, from the staggered slide.
    visibility: Vec<f64>,
}

impl<'a> ZoneListWidget<'a> {
    pub fn new(blocks: &'a [Block], current: Option<usize>, finished: bool) -> Self {
        Self {
            blocks,
            current,
            finished,
            visibility: vec![1.0; blocks.len()],
        }
    }

    pub fn with_visibility(mut self, visibility: Vec<f64>) -> Self {
        self.visibility = visibility;
        self
    }

    fn row_line(&self, index: usize, block: &Block) -> Line<'static> {
        let done = self.finished || self.current.is_some_and(|c| index < c);
        let is_current = !self.finished && self.current == Some(index);

        let marker = if is_current { "▶ " } else { "  " };
        let base = if done {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(zone_color(&block.intensity))
        };
        let style = if is_current {
            base.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            base
        };

        Line::from(vec![
            Span::styled(marker, style),
            Span::styled(format!("{:>5}  ", format_seconds(block.duration_secs)), style),
            Span::styled(block.intensity.to_string(), style),
        ])
    }
}

impl Widget for ZoneListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame = Frame::default().title(" Zones ").borders(Borders::ALL);
        let inner = frame.inner(area);
        frame.render(area, buf);

        // Keep the current block in view on long plans.
        let height = inner.height as usize;
        let first = match self.current {
            Some(c) if height > 0 && c >= height => c + 1 - height,
            _ => 0,
        };

        for (row, (index, block)) in self
            .blocks
            .iter()
            .enumerate()
            .skip(first)
            .take(height)
            .enumerate()
        {
            let visible = self.visibility.get(index).copied().unwrap_or(1.0);
            let offset = slide_offset(inner.width, visible);
            if offset >= inner.width {
                continue;
            }
            let rect = Rect {
                x: inner.x + offset,
                y: inner.y + row as u16,
                width: inner.width - offset,
                height: 1,
            };
            Paragraph::new(self.row_line(index, block)).render(rect, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks() -> Vec<Block> {
        vec![
            Block { duration_secs: 60, intensity: Zone::Recovery },
            Block { duration_secs: 30, intensity: Zone::Sprint },
        ]
    }

    fn rendered(widget: ZoneListWidget<'_>, area: Rect) -> String {
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn renders_every_block() {
        let blocks = blocks();
        let text = rendered(ZoneListWidget::new(&blocks, Some(0), false), Rect::new(0, 0, 30, 6));
        assert!(text.contains("01:00"));
        assert!(text.contains("Z1 recovery"));
        assert!(text.contains("Z5 sprint"));
        assert!(text.contains("▶"));
    }

    #[test]
    fn hidden_rows_are_not_drawn() {
        let blocks = blocks();
        let widget = ZoneListWidget::new(&blocks, None, false).with_visibility(vec![0.0, 0.0]);
        let text = rendered(widget, Rect::new(0, 0, 30, 6));
        assert!(!text.contains("recovery"));
    }

    #[test]
    fn colors_per_zone() {
        assert_eq!(zone_color(&Zone::Sprint), Color::Red);
        assert_eq!(zone_color(&Zone::Unknown("x".into())), Color::Gray);
    }
}
