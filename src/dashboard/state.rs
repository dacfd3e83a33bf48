// src/dashboard/state.rs
use chrono::{DateTime, Local};

use crate::device::{DeviceStatus, ValveCommand};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    /// Last snapshot that resolved, `None` until the first successful read.
    pub status: Option<DeviceStatus>,
    /// Valve intent shown on screen; diverges from `status` between polls.
    pub overrides: Vec<bool>,
    pub loading: bool,
    pub selected_valve: usize,
    pub last_updated: Option<DateTime<Local>>,
    pub status_message: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            status: None,
            overrides: Vec::new(),
            loading: true,
            selected_valve: 0,
            last_updated: None,
            status_message: None,
        }
    }
}

// ----------------------------------------------------------------------------
// INTENT - Messages that express what happened to the dashboard
// ----------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum DashboardIntent {
    SnapshotReceived { status: DeviceStatus, at: DateTime<Local> },
    PollFailed(String),
    ToggleValve { index: usize },
    ToggleSelected,
    SelectNext,
    SelectPrevious,
    CommandFailed { command: ValveCommand, error: String },
}

// ----------------------------------------------------------------------------
// EVENTS - Side effects the owner must carry out
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    OverridesReset { valves: usize },
    ValveCommandIssued(ValveCommand),
    SelectionChanged { index: usize },
}

// ----------------------------------------------------------------------------
// STATE MACHINE - Pure function: (State, Intent) -> (State, Vec<Event>)
// ----------------------------------------------------------------------------

pub struct DashboardStateMachine;

impl DashboardStateMachine {
    pub fn transition(
        state: DashboardState,
        intent: DashboardIntent,
    ) -> (DashboardState, Vec<DashboardEvent>) {
        use DashboardIntent::*;

        match intent {
            SnapshotReceived { status, at } => Self::handle_snapshot(state, status, at),
            PollFailed(error) => Self::handle_poll_failed(state, error),
            ToggleValve { index } => Self::handle_toggle(state, index),
            ToggleSelected => {
                let index = state.selected_valve;
                Self::handle_toggle(state, index)
            }
            SelectNext => Self::handle_select_next(state),
            SelectPrevious => Self::handle_select_previous(state),
            CommandFailed { command, error } => Self::handle_command_failed(state, command, error),
        }
    }

    /// Wholesale replacement: any toggle made since the last snapshot is dropped.
    fn handle_snapshot(
        mut state: DashboardState,
        status: DeviceStatus,
        at: DateTime<Local>,
    ) -> (DashboardState, Vec<DashboardEvent>) {
        state.overrides = status.valve_states.clone();
        state.status = Some(status);
        state.loading = false;
        state.last_updated = Some(at);
        state.status_message = None;

        let valves = state.overrides.len();
        if state.selected_valve >= valves {
            state.selected_valve = valves.saturating_sub(1);
        }

        (state, vec![DashboardEvent::OverridesReset { valves }])
    }

    fn handle_poll_failed(
        mut state: DashboardState,
        error: String,
    ) -> (DashboardState, Vec<DashboardEvent>) {
        state.status_message = Some(format!("⚠ Status refresh failed: {}", error));
        (state, vec![])
    }

    fn handle_toggle(
        mut state: DashboardState,
        index: usize,
    ) -> (DashboardState, Vec<DashboardEvent>) {
        let Some(current) = state.overrides.get(index).copied() else {
            return (state, vec![]);
        };

        let new_status = !current;
        state.overrides[index] = new_status;

        let mut events = Vec::with_capacity(2);
        if state.selected_valve != index {
            state.selected_valve = index;
            events.push(DashboardEvent::SelectionChanged { index });
        }
        events.push(DashboardEvent::ValveCommandIssued(ValveCommand {
            valve: index,
            status: new_status,
        }));

        (state, events)
    }

    fn handle_select_next(mut state: DashboardState) -> (DashboardState, Vec<DashboardEvent>) {
        let count = state.overrides.len();
        if count > 0 {
            state.selected_valve = (state.selected_valve + 1) % count;
            let index = state.selected_valve;
            (state, vec![DashboardEvent::SelectionChanged { index }])
        } else {
            (state, vec![])
        }
    }

    fn handle_select_previous(mut state: DashboardState) -> (DashboardState, Vec<DashboardEvent>) {
        let count = state.overrides.len();
        if count > 0 {
            state.selected_valve = if state.selected_valve == 0 {
                count - 1
            } else {
                state.selected_valve - 1
            };
            let index = state.selected_valve;
            (state, vec![DashboardEvent::SelectionChanged { index }])
        } else {
            (state, vec![])
        }
    }

    /// No rollback: the override stays until the next snapshot replaces it.
    fn handle_command_failed(
        mut state: DashboardState,
        command: ValveCommand,
        error: String,
    ) -> (DashboardState, Vec<DashboardEvent>) {
        state.status_message = Some(format!(
            "❌ Valve {} {} failed: {}",
            command.valve,
            command.action(),
            error
        ));
        (state, vec![])
    }
}
