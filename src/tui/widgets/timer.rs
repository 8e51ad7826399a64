use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, LineGauge, Paragraph, Widget};

use crate::util::format_seconds;

/// Countdown for the current block.
pub struct TimerWidget {
    remaining_secs: u32,
    /// (index, total) of the block being ridden.
    block: Option<(usize, usize)>,
    /// Length of the current block, for the progress bar.
    duration_secs: Option<u32>,
    /// Optional status line override (e.g., "Press Enter to start").
    label: Option<String>,
    paused: bool,
}

impl TimerWidget {
    pub fn new(remaining_secs: u32) -> Self {
        Self {
            remaining_secs,
            block: None,
            duration_secs: None,
            label: None,
            paused: false,
        }
    }

    pub fn with_block(mut self, index: usize, total: usize) -> Self {
        self.block = Some((index, total));
        self
    }

    pub fn with_duration(mut self, duration_secs: u32) -> Self {
        self.duration_secs = Some(duration_secs);
        self
    }

    /// Fraction of the current block already ridden.
    pub fn progress(&self) -> Option<f64> {
        match self.duration_secs {
            Some(0) | None => None,
            Some(total) => {
                let done = total.saturating_sub(self.remaining_secs);
                Some(f64::from(done) / f64::from(total))
            }
        }
    }

    pub fn with_label(mut self, label: String) -> Self {
        self.label = Some(label);
        self
    }

    pub fn paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }
}

impl Widget for TimerWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Last ten seconds of a block flash yellow as a heads-up.
        let color = if self.paused {
            Color::DarkGray
        } else if self.remaining_secs <= 10 && self.block.is_some() {
            Color::Yellow
        } else {
            Color::White
        };

        let mut lines = vec![Line::from(Span::styled(
            format_seconds(self.remaining_secs),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))];

        let status = match (&self.label, self.block) {
            (Some(label), _) => Some(label.clone()),
            (None, Some((index, total))) if self.paused => {
                Some(format!("Block {}/{} (paused)", index + 1, total))
            }
            (None, Some((index, total))) => Some(format!("Block {}/{}", index + 1, total)),
            (None, None) => None,
        };
        if let Some(status) = status {
            lines.push(Line::from(Span::styled(
                status,
                Style::default().fg(Color::DarkGray),
            )));
        }

        let outer = Block::default().title(" Timer ").borders(Borders::ALL);
        let inner = outer.inner(area);
        outer.render(area, buf);

        let rows = Layout::vertical([Constraint::Length(2), Constraint::Length(1)]).split(inner);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(rows[0], buf);

        if let Some(ratio) = self.progress() {
            let ratio = ratio.clamp(0.0, 1.0);
            LineGauge::default()
                .filled_style(Style::default().fg(color))
                .unfilled_style(Style::default().fg(Color::DarkGray))
                .ratio(ratio)
                .label(format!("{:.0}%", ratio * 100.0))
                .render(rows[1], buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(widget: TimerWidget) -> String {
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn progress_through_block() {
        assert_eq!(TimerWidget::new(30).with_duration(120).progress(), Some(0.75));
        assert_eq!(TimerWidget::new(120).with_duration(120).progress(), Some(0.0));
        assert_eq!(TimerWidget::new(0).with_duration(120).progress(), Some(1.0));
    }

    #[test]
    fn no_progress_without_duration() {
        assert_eq!(TimerWidget::new(30).progress(), None);
        assert_eq!(TimerWidget::new(0).with_duration(0).progress(), None);
    }

    #[test]
    fn shows_time_block_and_gauge() {
        let text = rendered(TimerWidget::new(90).with_block(1, 3).with_duration(120));
        assert!(text.contains("01:30"));
        assert!(text.contains("Block 2/3"));
        assert!(text.contains("25%"));
    }

    #[test]
    fn paused_status() {
        let text = rendered(TimerWidget::new(5).with_block(0, 2).paused(true));
        assert!(text.contains("Block 1/2 (paused)"));
    }
}
