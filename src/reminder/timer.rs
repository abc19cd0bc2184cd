use crate::reminder::{Firing, ReminderKind};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Named timers. Scheduling a name that is already armed replaces it.
#[async_trait]
pub trait TimerService: Send + Sync {
    async fn schedule_once(&self, kind: ReminderKind, at: DateTime<Utc>);
    async fn schedule_periodic(&self, kind: ReminderKind, first: DateTime<Utc>, period: Duration);
    async fn cancel(&self, kind: ReminderKind);
    async fn cancel_all(&self);
    async fn is_armed(&self, kind: ReminderKind) -> bool;
    /// False once the arming behind `firing` was cancelled or replaced, even
    /// if the firing was already queued.
    async fn is_current(&self, firing: Firing) -> bool;
}

struct ArmedTask {
    generation: u64,
    handle: JoinHandle<()>,
}

/// One tokio task per armed timer. Firings are delivered on the channel
/// returned by [`TokioTimerService::new`].
pub struct TokioTimerService {
    timers: Mutex<HashMap<ReminderKind, ArmedTask>>,
    next_generation: AtomicU64,
    fired: mpsc::UnboundedSender<Firing>,
}

impl TokioTimerService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Firing>) {
        let (fired, receiver) = mpsc::unbounded_channel();
        let service = Self {
            timers: Mutex::new(HashMap::new()),
            next_generation: AtomicU64::new(1),
            fired,
        };
        (service, receiver)
    }

    fn next_firing(&self, kind: ReminderKind) -> Firing {
        Firing {
            kind,
            generation: self.next_generation.fetch_add(1, Ordering::Relaxed),
        }
    }

    async fn install(&self, firing: Firing, handle: JoinHandle<()>) {
        let mut timers = self.timers.lock().await;
        let task = ArmedTask {
            generation: firing.generation,
            handle,
        };
        if let Some(previous) = timers.insert(firing.kind, task) {
            previous.handle.abort();
        }
    }
}

fn delay_until(at: DateTime<Utc>) -> std::time::Duration {
    at.signed_duration_since(Utc::now())
        .to_std()
        .unwrap_or(std::time::Duration::ZERO)
}

#[async_trait]
impl TimerService for TokioTimerService {
    async fn schedule_once(&self, kind: ReminderKind, at: DateTime<Utc>) {
        let delay = delay_until(at);
        let firing = self.next_firing(kind);
        let fired = self.fired.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = fired.send(firing);
        });

        tracing::info!("Armed {} for {}", kind.name(), at);
        self.install(firing, handle).await;
    }

    async fn schedule_periodic(&self, kind: ReminderKind, first: DateTime<Utc>, period: Duration) {
        let delay = delay_until(first);
        let period = period
            .to_std()
            .ok()
            .filter(|p| !p.is_zero())
            .unwrap_or(std::time::Duration::from_secs(60));
        let firing = self.next_firing(kind);
        let fired = self.fired.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + delay, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if fired.send(firing).is_err() {
                    break;
                }
            }
        });

        tracing::info!("Armed {} from {} every {:?}", kind.name(), first, period);
        self.install(firing, handle).await;
    }

    async fn cancel(&self, kind: ReminderKind) {
        if let Some(task) = self.timers.lock().await.remove(&kind) {
            task.handle.abort();
            tracing::info!("Cancelled {}", kind.name());
        }
    }

    async fn cancel_all(&self) {
        let mut timers = self.timers.lock().await;
        for (_, task) in timers.drain() {
            task.handle.abort();
        }
    }

    async fn is_armed(&self, kind: ReminderKind) -> bool {
        self.timers
            .lock()
            .await
            .get(&kind)
            .is_some_and(|task| !task.handle.is_finished())
    }

    async fn is_current(&self, firing: Firing) -> bool {
        self.timers
            .lock()
            .await
            .get(&firing.kind)
            .is_some_and(|task| task.generation == firing.generation)
    }
}
