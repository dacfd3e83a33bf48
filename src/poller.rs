//! Periodic status reads.
//!
//! Every tick spawns its own read, so a slow response never delays the next
//! tick. Reads that overlap are not cancelled and the one that resolves last
//! wins, since each result is simply forwarded to the event loop in
//! completion order.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::DeviceClient;
use crate::event::{AppEvent, Event, EventSender};
use crate::{log_debug, log_info, log_warn};

#[derive(Debug)]
pub struct StatusPoller {
    handle: JoinHandle<()>,
}

impl StatusPoller {
    /// Starts polling. The first read is issued immediately.
    pub fn spawn(client: DeviceClient, interval: Duration, sender: EventSender) -> Self {
        let handle = tokio::spawn(async move {
            log_info!(
                "Polling {} every {}ms",
                client.status_url(),
                interval.as_millis()
            );

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = sender.closed() => break,
                    _ = ticker.tick() => {
                        tokio::spawn(poll_once(client.clone(), sender.clone()));
                    }
                }
            }

            log_debug!("Status poller stopped");
        });

        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// One read; failures keep the previous snapshot on screen.
pub async fn poll_once(client: DeviceClient, sender: EventSender) {
    let event = match client.fetch_status().await {
        Ok(status) => {
            log_debug!(
                "Status from {}: valves={:?} moisture={:?} uptime={}s",
                status.identifier,
                status.valve_states,
                status.moisture_alerts,
                status.uptime_seconds
            );
            AppEvent::StatusReceived(status)
        }
        Err(e) => {
            log_warn!("Status refresh failed: {}", e);
            AppEvent::StatusFailed(e.to_string())
        }
    };

    let _ = sender.send(Event::App(event));
}
