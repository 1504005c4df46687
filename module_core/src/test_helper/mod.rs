use crate::{Event, EventBus, EventKind, EventKindType};
use tokio::time::timeout;

/// Sends a quit signal to a running module and waits for it to stop gracefully.
///
/// This function publishes a [`QuitEvent`](EventKind::QuitEvent) through the given [`EventBus`],
/// signaling the target module to terminate. It then waits for the module's task
/// to complete within a fixed timeout of 100ms.
///
/// # Panics
/// This function panics if:
/// - The module does not stop within the timeout.
/// - The task returns an error (`Err(())`).
pub async fn stop_module(
    event_bus: &EventBus,
    handle: &mut tokio::task::JoinHandle<Result<(), ()>>,
) {
    event_bus.publish(&Event {
        kind: EventKind::QuitEvent,
    });
    let _ = timeout(std::time::Duration::from_millis(100), handle)
        .await
        .expect("Module doesn't handle quit event in timeout")
        .unwrap();
}

/// Waits asynchronously for a specific type of [`Event`] to be received on a
/// [`tokio::sync::broadcast::Receiver`] within a given duration.
///
/// The total waiting time is divided into small polling steps (each one-tenth of
/// the total duration). Events of other types are skipped.
///
/// # Panics
///
/// This function panics if no matching event is received within the specified
/// `duration`.
pub async fn wait_for_event(
    rx: &mut tokio::sync::broadcast::Receiver<Event>,
    duration: std::time::Duration,
    exp_event: EventKindType,
) -> Event {
    let deadline = tokio::time::Instant::now() + duration;
    let step_duration = duration / 10;
    while tokio::time::Instant::now() < deadline {
        if let Ok(Ok(event)) = timeout(step_duration, rx.recv()).await
            && event.event_type() == exp_event
        {
            return event;
        }
    }
    panic!("Failed to receive event of type {:?}", exp_event);
}
