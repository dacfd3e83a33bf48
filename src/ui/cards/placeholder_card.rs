use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::ui::style::pulse;

/// Skeleton card drawn until the first snapshot arrives.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderCard {
    pub frame: u64,
}

impl Widget for PlaceholderCard {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = pulse(self.frame);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from("◯"),
            Line::from("▆▆▆▆▆▆▆▆"),
            Line::from("loading…"),
        ];
        Paragraph::new(lines)
            .style(style)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
