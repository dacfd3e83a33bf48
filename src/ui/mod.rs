pub mod cards;
pub mod grid;
pub mod style;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::dashboard::Dashboard;
use crate::device::format_uptime;
use cards::{
    OverflowCard, PlaceholderCard, SensorCard, ValveCard, CARD_WIDTH, MIN_CARD_WIDTH,
    PLACEHOLDER_COUNT, SENSOR_CARD_HEIGHT, VALVE_CARD_HEIGHT,
};
use grid::{card_grid, CardGrid};
use style::{ALERT_COLOR, TITLE_COLOR};

const KEY_HELP: &str = "←/→ select · Enter/Space toggle · 0-9 valve · click a valve · q quit";

impl Widget for &mut Dashboard {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Fill(1),
                Constraint::Fill(1),
                Constraint::Length(4),
            ])
            .split(area);

        render_header(self, main_layout[0], buf);
        render_sensors(self, main_layout[1], buf);
        render_valves(self, main_layout[2], buf);
        render_footer(self, main_layout[3], buf);
    }
}

fn section_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn render_header(dashboard: &Dashboard, area: Rect, buf: &mut Buffer) {
    let state = dashboard.state();

    let details = match &state.status {
        Some(status) => {
            let mut spans = vec![
                Span::raw("Device "),
                Span::styled(status.identifier.clone(), Style::default().bold()),
                Span::raw(format!(" · Uptime {}", format_uptime(status.uptime_seconds))),
                alert_span(status.alert_count()),
            ];
            if let Some(updated) = state.last_updated {
                spans.push(Span::raw(format!(" · Updated {}", updated.format("%H:%M:%S"))));
            }
            Line::from(spans)
        }
        None => Line::from(vec![
            Span::raw("Device "),
            Span::styled(dashboard.device_id().to_string(), Style::default().bold()),
            Span::styled(" · waiting for device…", Style::default().fg(Color::DarkGray)),
        ]),
    };

    let title = Line::from(vec![
        Span::raw("Automated Smart "),
        Span::styled("Gardening System", Style::default().add_modifier(Modifier::BOLD)),
    ]);

    Paragraph::new(vec![title, details])
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(TITLE_COLOR)),
        )
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn alert_span(alerts: usize) -> Span<'static> {
    match alerts {
        0 => Span::raw(" · no alerts"),
        1 => Span::styled(" · 1 alert", Style::default().fg(ALERT_COLOR)),
        n => Span::styled(format!(" · {} alerts", n), Style::default().fg(ALERT_COLOR)),
    }
}

fn cards_for(area: Rect, count: usize, card_height: u16) -> CardGrid {
    card_grid(area, count, MIN_CARD_WIDTH, CARD_WIDTH, card_height)
}

fn render_sensors(dashboard: &Dashboard, area: Rect, buf: &mut Buffer) {
    let block = section_block("Moisture Sensors");
    let inner = block.inner(area);
    block.render(area, buf);

    match &dashboard.state().status {
        None => render_placeholders(dashboard.frame(), inner, SENSOR_CARD_HEIGHT, buf),
        Some(status) => {
            let alerts = &status.moisture_alerts;
            let grid = cards_for(inner, alerts.len(), SENSOR_CARD_HEIGHT);
            for (index, (slot, alert)) in grid.slots.iter().zip(alerts).enumerate() {
                SensorCard::new(index, *alert).render(*slot, buf);
            }
            if let Some(slot) = grid.overflow {
                OverflowCard::new(grid.hidden).render(slot, buf);
            }
        }
    }
}

/// Records each drawn valve card so mouse clicks can be mapped back to it.
/// Valves past the overflow marker stay reachable from the keyboard only.
fn render_valves(dashboard: &mut Dashboard, area: Rect, buf: &mut Buffer) {
    let block = section_block("Valves");
    let inner = block.inner(area);
    block.render(area, buf);

    if dashboard.is_loading() {
        dashboard.valve_areas.clear();
        render_placeholders(dashboard.frame(), inner, VALVE_CARD_HEIGHT, buf);
        return;
    }

    let state = dashboard.state();
    let grid = cards_for(inner, state.overrides.len(), VALVE_CARD_HEIGHT);
    for (index, (slot, open)) in grid.slots.iter().zip(&state.overrides).enumerate() {
        ValveCard::new(index, *open)
            .selected(index == state.selected_valve)
            .frame(dashboard.frame())
            .render(*slot, buf);
    }
    if let Some(slot) = grid.overflow {
        let hidden_selection =
            (state.selected_valve >= grid.slots.len()).then_some(state.selected_valve);
        OverflowCard::new(grid.hidden)
            .selected(hidden_selection)
            .render(slot, buf);
    }
    dashboard.valve_areas = grid.slots;
}

fn render_placeholders(frame: u64, area: Rect, card_height: u16, buf: &mut Buffer) {
    for slot in cards_for(area, PLACEHOLDER_COUNT, card_height).slots {
        PlaceholderCard { frame }.render(slot, buf);
    }
}

fn render_footer(dashboard: &Dashboard, area: Rect, buf: &mut Buffer) {
    let message = match &dashboard.state().status_message {
        Some(message) => Line::from(message.as_str()).fg(Color::Yellow),
        None => Line::from(""),
    };

    Paragraph::new(vec![Line::from(KEY_HELP).fg(Color::Gray), message])
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title_bottom(
                    Line::from(format!(" API docs: {} ", dashboard.docs_url())).right_aligned(),
                ),
        )
        .render(area, buf);
}

/// Flattens a buffer into newline-separated rows of cell symbols.
#[cfg(test)]
pub(crate) fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buf[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::DashboardIntent;
    use crate::device::DeviceStatus;

    fn render(dashboard: &mut Dashboard) -> String {
        render_at(dashboard, Rect::new(0, 0, 100, 40))
    }

    fn render_at(dashboard: &mut Dashboard, area: Rect) -> String {
        let mut buf = Buffer::empty(area);
        dashboard.render(area, &mut buf);
        buffer_text(&buf)
    }

    fn garden(valves: usize, sensors: usize) -> DeviceStatus {
        DeviceStatus {
            identifier: "SmartGarden-82FA".to_string(),
            valve_states: (0..valves).map(|i| i % 2 == 1).collect(),
            moisture_alerts: (0..sensors).map(|i| i == 0).collect(),
            uptime_seconds: 3_600,
        }
    }

    fn scenario_status() -> DeviceStatus {
        DeviceStatus {
            identifier: "SmartGarden-82FA".to_string(),
            valve_states: vec![false, true],
            moisture_alerts: vec![false, true],
            uptime_seconds: 120,
        }
    }

    #[test]
    fn test_placeholders_before_first_snapshot() {
        let mut dashboard = Dashboard::new("SmartGarden-82FA", "http://localhost/docs");
        let text = render(&mut dashboard);

        assert!(text.contains("waiting for device"));
        assert_eq!(text.matches("loading…").count(), PLACEHOLDER_COUNT * 2);
        assert!(!text.contains("Valve 0"));
        assert!(!text.contains("Moisture sensor 0"));
        assert!(dashboard.valve_areas.is_empty());
    }

    #[test]
    fn test_renders_scenario_cards() {
        let mut dashboard = Dashboard::new("SmartGarden-82FA", "http://localhost/docs");
        dashboard.apply_snapshot(scenario_status());
        let text = render(&mut dashboard);

        assert!(text.contains("Moisture sensor 0"));
        assert!(text.contains("Moisture sensor 1"));
        assert!(!text.contains("Moisture sensor 2"));
        assert_eq!(text.matches("Normal").count(), 1);
        assert_eq!(text.matches("Detected").count(), 1);

        assert!(text.contains("Valve 0"));
        assert!(text.contains("Valve 1"));
        assert!(!text.contains("Valve 2"));
        assert_eq!(text.matches("CLOSED").count(), 1);
        assert_eq!(text.matches("OPEN").count(), 1);

        assert!(text.contains("Uptime 2m 0s"));
        assert!(text.contains("· 1 alert ·"));
        assert!(!text.contains("loading…"));
        assert_eq!(dashboard.valve_areas.len(), 2);
    }

    #[test]
    fn test_click_area_maps_to_valve() {
        let mut dashboard = Dashboard::new("SmartGarden-82FA", "docs");
        dashboard.apply_snapshot(scenario_status());
        render(&mut dashboard);

        let second = dashboard.valve_areas[1];
        assert_eq!(dashboard.valve_at(second.x + 1, second.y + 1), Some(1));
    }

    #[test]
    fn test_toggle_reflected_in_render() {
        let mut dashboard = Dashboard::new("SmartGarden-82FA", "docs");
        dashboard.apply_snapshot(scenario_status());
        dashboard.dispatch(DashboardIntent::ToggleValve { index: 0 });

        let text = render(&mut dashboard);
        assert_eq!(text.matches("OPEN").count(), 2);
        assert!(!text.contains("CLOSED"));
    }

    #[test]
    fn test_footer_shows_status_message_and_docs() {
        let mut dashboard = Dashboard::new("SmartGarden-82FA", "http://localhost/docs");
        dashboard.apply_snapshot(scenario_status());
        dashboard.dispatch(DashboardIntent::PollFailed("timed out".to_string()));

        let text = render(&mut dashboard);
        assert!(text.contains("Status refresh failed: timed out"));
        assert!(text.contains("API docs: http://localhost/docs"));
    }

    #[test]
    fn test_standard_terminal_shows_every_card() {
        let mut dashboard = Dashboard::new("SmartGarden-82FA", "docs");
        dashboard.apply_snapshot(garden(5, 5));
        let text = render_at(&mut dashboard, Rect::new(0, 0, 80, 24));

        for i in 0..5 {
            assert_eq!(text.matches(&format!("Valve {} ", i)).count(), 1, "valve {}", i);
            let sensors = text.matches(&format!("Moisture sensor {} ", i)).count()
                + text.matches(&format!("Moisture {} ", i)).count();
            assert_eq!(sensors, 1, "sensor {}", i);
        }
        assert_eq!(text.matches("[ ").count(), 5);
        assert!(!text.contains("more"));
        assert!(text.contains("· 1 alert ·"));

        assert_eq!(dashboard.valve_areas.len(), 5);
        for (index, area) in dashboard.valve_areas.clone().into_iter().enumerate() {
            assert!(area.right() <= 80 && area.bottom() <= 24);
            assert_eq!(dashboard.valve_at(area.x + 1, area.y + 1), Some(index));
        }
    }

    #[test]
    fn test_overflowing_valves_get_a_marker() {
        let mut dashboard = Dashboard::new("SmartGarden-82FA", "docs");
        dashboard.apply_snapshot(garden(12, 2));
        dashboard.dispatch(DashboardIntent::ToggleValve { index: 9 });
        let text = render_at(&mut dashboard, Rect::new(0, 0, 80, 24));

        assert!(text.contains("Valve 3 "));
        assert!(!text.contains("Valve 4 "));
        assert!(text.contains("+8 more"));
        assert!(text.contains("▶ Valve 9"));
        assert_eq!(dashboard.valve_areas.len(), 4);

        // The marker takes the fifth slot of the valve row.
        let last = dashboard.valve_areas[3];
        assert_eq!(dashboard.valve_at(last.right() + 1, last.y + 1), None);
    }
}
