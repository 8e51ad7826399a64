use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, LineGauge, Widget};

/// How close the rider is to the goal pace, as a filled line.
pub struct PaceGaugeWidget {
    current: f64,
    goal: f64,
}

impl PaceGaugeWidget {
    pub fn new(current: f64, goal: f64) -> Self {
        Self { current, goal }
    }

    /// Current speed as a fraction of goal, clamped to 0..=1.
    /// No goal (unknown zone) reads as empty.
    pub fn ratio(&self) -> f64 {
        if self.goal <= 0.0 || !self.current.is_finite() {
            return 0.0;
        }
        (self.current / self.goal).clamp(0.0, 1.0)
    }

    fn color(&self) -> Color {
        let ratio = self.ratio();
        if ratio >= 0.95 {
            Color::Green
        } else if ratio >= 0.8 {
            Color::Yellow
        } else {
            Color::Red
        }
    }
}

impl Widget for PaceGaugeWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = if self.goal > 0.0 {
            format!("{:.0}% of goal", self.ratio() * 100.0)
        } else {
            "no target".to_string()
        };

        LineGauge::default()
            .block(Block::default().title(" Pace ").borders(Borders::ALL))
            .filled_style(Style::default().fg(self.color()))
            .ratio(self.ratio())
            .label(label)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_clamps() {
        assert_eq!(PaceGaugeWidget::new(8.0, 16.0).ratio(), 0.5);
        assert_eq!(PaceGaugeWidget::new(30.0, 16.0).ratio(), 1.0);
        assert_eq!(PaceGaugeWidget::new(10.0, 0.0).ratio(), 0.0);
    }

    #[test]
    fn color_bands() {
        assert_eq!(PaceGaugeWidget::new(16.0, 16.0).color(), Color::Green);
        assert_eq!(PaceGaugeWidget::new(14.0, 16.0).color(), Color::Yellow);
        assert_eq!(PaceGaugeWidget::new(5.0, 16.0).color(), Color::Red);
    }
}
