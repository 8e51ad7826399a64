use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

/// Titled card with one big value, e.g. "Goal Speed / 16.0 mph".
pub struct SpeedCardWidget<'a> {
    title: &'a str,
    label: String,
    color: Color,
}

impl<'a> SpeedCardWidget<'a> {
    pub fn new(title: &'a str, label: String) -> Self {
        Self {
            title,
            label,
            color: Color::White,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Widget for SpeedCardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(Span::styled(
            self.label,
            Style::default().fg(self.color).add_modifier(Modifier::BOLD),
        ));

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(format!(" {} ", self.title))
                    .borders(Borders::ALL),
            )
            .render(area, buf);
    }
}
