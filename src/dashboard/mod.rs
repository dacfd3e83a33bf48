// src/dashboard/mod.rs
use chrono::Local;
use ratatui::layout::{Position, Rect};

use crate::device::DeviceStatus;

mod state;

pub use state::{DashboardEvent, DashboardIntent, DashboardState, DashboardStateMachine};

/// Top-level view: owns the view state and the card areas from the last draw.
#[derive(Debug)]
pub struct Dashboard {
    state: DashboardState,
    device_id: String,
    docs_url: String,
    /// Animation counter for placeholder and flowing-valve visuals.
    frame: u64,
    pub(crate) valve_areas: Vec<Rect>,
}

impl Dashboard {
    pub fn new(device_id: impl Into<String>, docs_url: impl Into<String>) -> Self {
        Self {
            state: DashboardState::default(),
            device_id: device_id.into(),
            docs_url: docs_url.into(),
            frame: 0,
            valve_areas: Vec::new(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn docs_url(&self) -> &str {
        &self.docs_url
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn dispatch(&mut self, intent: DashboardIntent) -> Vec<DashboardEvent> {
        let state = std::mem::take(&mut self.state);
        let (state, events) = DashboardStateMachine::transition(state, intent);
        self.state = state;
        events
    }

    pub fn apply_snapshot(&mut self, status: DeviceStatus) -> Vec<DashboardEvent> {
        self.dispatch(DashboardIntent::SnapshotReceived { status, at: Local::now() })
    }

    /// Advances the animation; returns whether anything on screen moves.
    pub fn tick(&mut self) -> bool {
        self.frame = self.frame.wrapping_add(1);
        self.state.loading || self.state.overrides.iter().any(|open| *open)
    }

    /// Valve card under a terminal cell, as laid out by the last render.
    pub fn valve_at(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.valve_areas
            .iter()
            .position(|area| area.contains(position))
    }
}
