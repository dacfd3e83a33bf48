//! Wire model of the irrigation controller.
//!
//! Index position inside `valve_states` and `moisture_alerts` is the only
//! identity a valve or sensor has.

use serde::{Deserialize, Serialize};

mod uptime;

pub use uptime::format_uptime;

/// One full read of the device, as returned by `GET /sensor/{id}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceStatus {
    #[serde(rename = "mqtt_client_name")]
    pub identifier: String,
    #[serde(rename = "valve")]
    pub valve_states: Vec<bool>,
    #[serde(rename = "moisture")]
    pub moisture_alerts: Vec<bool>,
    #[serde(rename = "uptime", deserialize_with = "uptime::deserialize_seconds")]
    pub uptime_seconds: u64,
}

impl DeviceStatus {
    pub fn alert_count(&self) -> usize {
        self.moisture_alerts.iter().filter(|alert| **alert).count()
    }
}

/// Body of `POST /sensor/{id}/valve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValveCommand {
    pub valve: usize,
    pub status: bool,
}

impl ValveCommand {
    pub fn action(&self) -> &'static str {
        if self.status { "open" } else { "close" }
    }
}
