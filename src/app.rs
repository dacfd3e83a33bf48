use crate::client::DeviceClient;
use crate::command::dispatch_valve_command;
use crate::config::DashboardConfig;
use crate::dashboard::{Dashboard, DashboardEvent, DashboardIntent};
use crate::event::{AppEvent, Event, EventHandler};
use crate::poller::StatusPoller;
use crate::{log_debug, log_info};
use color_eyre::Result;
use ratatui::{
    DefaultTerminal,
    crossterm::event::{
        KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
};

/// Application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// View state; only this task ever mutates it.
    pub dashboard: Dashboard,
    /// Event handler.
    pub events: EventHandler,
    client: DeviceClient,
    poller: StatusPoller,
}

impl App {
    /// Constructs a new instance of [`App`] and starts polling.
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        Self::with_events(config, EventHandler::new())
    }

    fn with_events(config: &DashboardConfig, events: EventHandler) -> Result<Self> {
        let client = DeviceClient::new(config)?;
        let poller =
            StatusPoller::spawn(client.clone(), config.polling.interval(), events.sender());
        let dashboard = Dashboard::new(config.device.device_id.clone(), config.docs_url());

        Ok(Self {
            running: true,
            dashboard,
            events,
            client,
            poller,
        })
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut needs_redraw = true;

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| frame.render_widget(&mut self.dashboard, frame.area()))?;
                needs_redraw = false;
            }

            match self.events.next().await? {
                Event::Tick => needs_redraw = self.dashboard.tick(),
                Event::Crossterm(event) => match event {
                    crossterm::event::Event::Key(key_event)
                        if key_event.kind == KeyEventKind::Press =>
                    {
                        self.handle_key_events(key_event)?;
                    }
                    crossterm::event::Event::Mouse(mouse_event) => {
                        self.handle_mouse_event(mouse_event);
                    }
                    crossterm::event::Event::Resize(_, _) => needs_redraw = true,
                    _ => {}
                },
                Event::App(app_event) => {
                    self.handle_app_event(app_event);
                    needs_redraw = true;
                }
            }
        }

        self.poller.stop();
        log_info!("Dashboard stopped");
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) -> Result<()> {
        if let Some(app_event) = key_to_app_event(key_event) {
            self.events.send(app_event);
        }
        Ok(())
    }

    pub fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        if let MouseEventKind::Down(MouseButton::Left) = mouse_event.kind {
            if let Some(index) = self.dashboard.valve_at(mouse_event.column, mouse_event.row) {
                log_debug!(
                    "Click on valve {} at {},{}",
                    index,
                    mouse_event.column,
                    mouse_event.row
                );
                self.events.send(AppEvent::ToggleValve(index));
            }
        }
    }

    pub fn handle_app_event(&mut self, app_event: AppEvent) {
        let intent = match app_event {
            AppEvent::Quit => {
                self.quit();
                return;
            }
            AppEvent::StatusReceived(status) => {
                let events = self.dashboard.apply_snapshot(status);
                self.handle_dashboard_events(events);
                return;
            }
            AppEvent::StatusFailed(error) => DashboardIntent::PollFailed(error),
            AppEvent::CommandFailed { command, error } => {
                DashboardIntent::CommandFailed { command, error }
            }
            AppEvent::SelectNext => DashboardIntent::SelectNext,
            AppEvent::SelectPrevious => DashboardIntent::SelectPrevious,
            AppEvent::ToggleSelected => DashboardIntent::ToggleSelected,
            AppEvent::ToggleValve(index) => DashboardIntent::ToggleValve { index },
        };

        let events = self.dashboard.dispatch(intent);
        self.handle_dashboard_events(events);
    }

    fn handle_dashboard_events(&mut self, events: Vec<DashboardEvent>) {
        for event in events {
            match event {
                DashboardEvent::ValveCommandIssued(command) => {
                    // Detached: nothing awaits the handle.
                    dispatch_valve_command(self.client.clone(), command, self.events.sender());
                }
                DashboardEvent::OverridesReset { valves } => {
                    log_debug!("Valve overrides reset from snapshot ({} valves)", valves);
                }
                DashboardEvent::SelectionChanged { index } => {
                    log_debug!("Selected valve {}", index);
                }
            }
        }
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

/// Key bindings. Returns `None` for keys the dashboard ignores.
pub fn key_to_app_event(key_event: KeyEvent) -> Option<AppEvent> {
    match key_event.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(AppEvent::Quit),
        KeyCode::Char('c' | 'C') if key_event.modifiers == KeyModifiers::CONTROL => {
            Some(AppEvent::Quit)
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => Some(AppEvent::SelectPrevious),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => Some(AppEvent::SelectNext),
        KeyCode::Enter | KeyCode::Char(' ') => Some(AppEvent::ToggleSelected),
        KeyCode::Char(digit) => digit
            .to_digit(10)
            .map(|index| AppEvent::ToggleValve(index as usize)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::State,
        routing::{get, post},
        Json, Router,
    };
    use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::net::TcpListener;

    type Commands = Arc<Mutex<Vec<Value>>>;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(key_to_app_event(key(KeyCode::Char('q'))), Some(AppEvent::Quit));
        assert_eq!(key_to_app_event(key(KeyCode::Esc)), Some(AppEvent::Quit));
        assert_eq!(
            key_to_app_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(AppEvent::Quit)
        );
        assert_eq!(key_to_app_event(key(KeyCode::Char('c'))), None);

        for code in [KeyCode::Left, KeyCode::Char('h'), KeyCode::BackTab] {
            assert_eq!(key_to_app_event(key(code)), Some(AppEvent::SelectPrevious));
        }
        for code in [KeyCode::Right, KeyCode::Char('l'), KeyCode::Tab] {
            assert_eq!(key_to_app_event(key(code)), Some(AppEvent::SelectNext));
        }
        for code in [KeyCode::Enter, KeyCode::Char(' ')] {
            assert_eq!(key_to_app_event(key(code)), Some(AppEvent::ToggleSelected));
        }

        assert_eq!(key_to_app_event(key(KeyCode::Char('0'))), Some(AppEvent::ToggleValve(0)));
        assert_eq!(key_to_app_event(key(KeyCode::Char('7'))), Some(AppEvent::ToggleValve(7)));
        assert_eq!(key_to_app_event(key(KeyCode::Char('x'))), None);
        assert_eq!(key_to_app_event(key(KeyCode::Up)), None);
    }

    async fn start_garden(commands: Commands) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = Router::new()
            .route(
                "/sensor/:device_id/status",
                get(|| async {
                    Json(json!({
                        "mqtt_client_name": "SmartGarden-82FA",
                        "valve": [false, true],
                        "moisture": [false, true],
                        "uptime": 120
                    }))
                }),
            )
            .route(
                "/sensor/:device_id/valve",
                post(|State(commands): State<Commands>, Json(body): Json<Value>| async move {
                    commands.lock().unwrap().push(body);
                }),
            )
            .with_state(commands);

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        format!("http://{}", addr)
    }

    async fn app_for(commands: Commands) -> App {
        let mut config = DashboardConfig::default();
        config.device.base_url = start_garden(commands).await;
        config.polling.interval_ms = 60_000;
        config.polling.request_timeout_ms = Some(2_000);
        App::with_events(&config, EventHandler::without_terminal()).unwrap()
    }

    async fn next_app_event(app: &mut App) -> AppEvent {
        match tokio::time::timeout(Duration::from_secs(3), app.events.next()).await {
            Ok(Ok(Event::App(event))) => event,
            other => panic!("expected app event, got {:?}", other),
        }
    }

    async fn wait_for_commands(commands: &Commands, count: usize) -> Vec<Value> {
        for _ in 0..150 {
            if commands.lock().unwrap().len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        // Room for a stray duplicate to show up.
        tokio::time::sleep(Duration::from_millis(100)).await;
        commands.lock().unwrap().clone()
    }

    fn draw(app: &mut App) {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        Widget::render(&mut app.dashboard, area, &mut buf);
    }

    #[tokio::test]
    async fn test_click_on_valve_issues_single_command() {
        let commands = Commands::default();
        let mut app = app_for(commands.clone()).await;

        let snapshot = next_app_event(&mut app).await;
        assert!(matches!(snapshot, AppEvent::StatusReceived(_)));
        app.handle_app_event(snapshot);
        assert_eq!(app.dashboard.state().overrides, vec![false, true]);

        draw(&mut app);
        let card = app.dashboard.valve_areas[0];
        app.handle_mouse_event(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: card.x + 2,
            row: card.y + 2,
            modifiers: KeyModifiers::NONE,
        });

        let toggle = next_app_event(&mut app).await;
        assert_eq!(toggle, AppEvent::ToggleValve(0));
        app.handle_app_event(toggle);

        assert_eq!(app.dashboard.state().overrides, vec![true, true]);
        assert_eq!(
            wait_for_commands(&commands, 1).await,
            vec![json!({ "valve": 0, "status": true })]
        );
    }

    #[tokio::test]
    async fn test_keyboard_selection_toggles_valve() {
        let commands = Commands::default();
        let mut app = app_for(commands.clone()).await;

        let snapshot = next_app_event(&mut app).await;
        app.handle_app_event(snapshot);

        app.handle_key_events(key(KeyCode::Right)).unwrap();
        let select = next_app_event(&mut app).await;
        assert_eq!(select, AppEvent::SelectNext);
        app.handle_app_event(select);

        app.handle_key_events(key(KeyCode::Enter)).unwrap();
        let toggle = next_app_event(&mut app).await;
        assert_eq!(toggle, AppEvent::ToggleSelected);
        app.handle_app_event(toggle);

        assert_eq!(app.dashboard.state().overrides, vec![false, false]);
        assert_eq!(
            wait_for_commands(&commands, 1).await,
            vec![json!({ "valve": 1, "status": false })]
        );

        app.handle_key_events(key(KeyCode::Char('q'))).unwrap();
        let quit = next_app_event(&mut app).await;
        app.handle_app_event(quit);
        assert!(!app.running);
    }

    #[tokio::test]
    async fn test_click_outside_valves_is_ignored() {
        let commands = Commands::default();
        let mut app = app_for(commands.clone()).await;

        let snapshot = next_app_event(&mut app).await;
        app.handle_app_event(snapshot);
        draw(&mut app);

        app.handle_mouse_event(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 1,
            row: 1,
            modifiers: KeyModifiers::NONE,
        });

        let pending = tokio::time::timeout(Duration::from_millis(200), app.events.next()).await;
        assert!(pending.is_err());
        assert!(commands.lock().unwrap().is_empty());
    }
}
