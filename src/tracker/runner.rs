use crate::reminder::{Firing, Notifier};
use crate::tracker::AttendanceTracker;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Background loop: periodic refreshes plus reminder firings.
/// Runs until the timer channel closes.
pub async fn run(
    tracker: Arc<AttendanceTracker>,
    mut fired: mpsc::UnboundedReceiver<Firing>,
    notifier: Arc<dyn Notifier>,
    refresh_interval: Duration,
) {
    let mut ticker = tokio::time::interval(refresh_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = tracker.refresh().await {
                    tracing::warn!("Periodic refresh failed: {}", e);
                }
            }
            firing = fired.recv() => {
                let Some(firing) = firing else {
                    tracing::warn!("Timer channel closed, stopping background loop");
                    break;
                };
                dispatch(&tracker, notifier.as_ref(), firing).await;
            }
        }
    }
}

pub async fn dispatch(tracker: &AttendanceTracker, notifier: &dyn Notifier, firing: Firing) {
    tracing::debug!("{} fired", firing.kind.name());

    let Some(notification) = tracker.handle_fire(firing).await else {
        return;
    };

    if let Err(e) = notifier.notify(notification).await {
        tracing::error!("Failed to deliver {:?}: {:?}", notification, e);
    }
}
