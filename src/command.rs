use tokio::task::JoinHandle;

use crate::client::DeviceClient;
use crate::device::ValveCommand;
use crate::event::{AppEvent, Event, EventSender};
use crate::{log_error, log_info};

/// Fires a valve write as a detached task.
///
/// The local override has already been flipped by the caller and is never
/// rolled back. A failure is logged and reported to the event loop so it can
/// be shown, but the next successful poll is what reconciles the view.
pub fn dispatch_valve_command(
    client: DeviceClient,
    command: ValveCommand,
    sender: EventSender,
) -> JoinHandle<()> {
    log_info!("🚰 Sending valve {} {} command", command.valve, command.action());

    tokio::spawn(async move {
        match client.set_valve(command).await {
            Ok(()) => {
                log_info!("✓ Valve {} {} command accepted", command.valve, command.action());
            }
            Err(e) => {
                log_error!(
                    "Failed to {} valve {}: {}",
                    command.action(),
                    command.valve,
                    e
                );
                let _ = sender.send(Event::App(AppEvent::CommandFailed {
                    command,
                    error: e.to_string(),
                }));
            }
        }
    })
}
