// src/ui/cards/valve_card.rs
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::ui::style::{border_style, CLOSED_COLOR, OPEN_COLOR};

pub const VALVE_CARD_HEIGHT: u16 = 7;

const FLOW_FRAMES: [&str; 3] = ["≈  ≈  ≈", " ≈  ≈  ", "  ≈  ≈ "];

/// Toggle card for one valve. Appearance depends only on `open` and selection.
#[derive(Debug, Clone, Copy)]
pub struct ValveCard {
    pub index: usize,
    pub open: bool,
    pub selected: bool,
    pub frame: u64,
}

impl ValveCard {
    pub fn new(index: usize, open: bool) -> Self {
        Self { index, open, selected: false, frame: 0 }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn frame(mut self, frame: u64) -> Self {
        self.frame = frame;
        self
    }

    fn visuals(&self) -> (Color, &'static str, &'static str) {
        if self.open {
            (OPEN_COLOR, "OPEN", "[ ────── ● ]")
        } else {
            (CLOSED_COLOR, "CLOSED", "[ ● ────── ]")
        }
    }
}

impl Widget for ValveCard {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (status_color, status_text, switch_visual) = self.visuals();

        let mut block = Block::default()
            .title(format!(" Valve {} ", self.index))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style(self.selected, status_color));
        if self.open {
            block = block.style(Style::default().bg(Color::Rgb(21, 61, 32)));
        }

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),  // Switch visual
                Constraint::Length(1),  // Status text
                Constraint::Length(1),  // Flow
                Constraint::Min(0),
            ])
            .split(inner);

        Paragraph::new(switch_visual)
            .style(Style::default().fg(status_color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        Paragraph::new(status_text)
            .style(Style::default().fg(status_color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        if self.open {
            let flow = FLOW_FRAMES[((self.frame / 2) % FLOW_FRAMES.len() as u64) as usize];
            Paragraph::new(flow)
                .style(Style::default().fg(Color::LightBlue))
                .alignment(Alignment::Center)
                .render(chunks[2], buf);
        }
    }
}
