use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::ui::style::border_style;

/// Stands in for the cards a row section has no room for.
#[derive(Debug, Clone, Copy)]
pub struct OverflowCard {
    pub hidden: usize,
    /// Selected valve when it is one of the hidden cards.
    pub selected: Option<usize>,
}

impl OverflowCard {
    pub fn new(hidden: usize) -> Self {
        Self { hidden, selected: None }
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    pub fn label(&self) -> String {
        format!("+{} more", self.hidden)
    }
}

impl Widget for OverflowCard {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = Line::from(self.label()).bold();

        if area.height < 3 {
            Paragraph::new(label)
                .style(Style::default().fg(Color::Gray))
                .render(area, buf);
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style(self.selected.is_some(), Color::DarkGray));

        let mut lines = vec![Line::from(""), label];
        if let Some(index) = self.selected {
            lines.push(Line::from(format!("▶ Valve {}", index)).fg(Color::White));
        }

        Paragraph::new(lines)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}
