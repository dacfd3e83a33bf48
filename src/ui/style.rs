use ratatui::style::{Color, Style, Stylize};

pub const TITLE_COLOR: Color = Color::Green;
pub const OPEN_COLOR: Color = Color::Green;
pub const CLOSED_COLOR: Color = Color::DarkGray;
pub const ALERT_COLOR: Color = Color::Red;
pub const NORMAL_COLOR: Color = Color::Green;
pub const SENSOR_HEADER_COLOR: Color = Color::Indexed(61);

pub fn border_style(is_selected: bool, accent: Color) -> Style {
    if is_selected {
        Style::default().fg(Color::White).bold()
    } else {
        Style::default().fg(accent)
    }
}

/// Two-phase pulse for placeholder content.
pub fn pulse(frame: u64) -> Style {
    if (frame / 4) % 2 == 0 {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Gray)
    }
}
