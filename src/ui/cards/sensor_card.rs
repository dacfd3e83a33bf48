use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::ui::style::{ALERT_COLOR, NORMAL_COLOR, SENSOR_HEADER_COLOR};

pub const SENSOR_CARD_HEIGHT: u16 = 6;

/// Read-only moisture sensor indicator.
#[derive(Debug, Clone, Copy)]
pub struct SensorCard {
    pub index: usize,
    pub alert: bool,
}

impl SensorCard {
    pub fn new(index: usize, alert: bool) -> Self {
        Self { index, alert }
    }

    /// Full title, or the short form when the card is too narrow for it.
    fn title(&self, width: u16) -> String {
        let full = format!(" Moisture sensor {} ", self.index);
        if full.chars().count() + 2 <= width as usize {
            full
        } else {
            format!(" Moisture {} ", self.index)
        }
    }
}

impl Widget for SensorCard {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (color, icon, label) = if self.alert {
            (ALERT_COLOR, "▲", "Detected")
        } else {
            (NORMAL_COLOR, "●", "Normal")
        };

        let block = Block::default()
            .title(
                Line::from(self.title(area.width))
                    .bg(SENSOR_HEADER_COLOR)
                    .fg(Color::White),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Gray));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        Paragraph::new(icon)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        Paragraph::new(label)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}
