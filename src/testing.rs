use crate::hrms::client::AttendanceFeed;
use crate::hrms::error::{FeedError, Result};
use crate::hrms::models::AttendanceEvent;
use crate::reminder::{Firing, Notification, Notifier, ReminderKind, TimerService};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::{Mutex, Semaphore};

/// Hands out queued responses; an empty queue answers with no events.
pub struct FakeFeed {
    responses: Mutex<VecDeque<Result<Vec<AttendanceEvent>>>>,
    calls: AtomicUsize,
    gate: Semaphore,
}

impl FakeFeed {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            gate: Semaphore::new(Semaphore::MAX_PERMITS),
        }
    }

    /// Every fetch waits until [`FakeFeed::open`] is called.
    pub fn gated() -> Self {
        Self {
            gate: Semaphore::new(0),
            ..Self::new()
        }
    }

    pub fn open(&self) {
        self.gate.add_permits(1);
    }

    pub async fn push_events(&self, events: Vec<AttendanceEvent>) {
        self.responses.lock().await.push_back(Ok(events));
    }

    pub async fn push_failure(&self, status: u16) {
        self.responses.lock().await.push_back(Err(FeedError::Status(status)));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AttendanceFeed for FakeFeed {
    async fn fetch_events(&self) -> Result<Vec<AttendanceEvent>> {
        let _permit = self.gate.acquire().await.unwrap();
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmedTimer {
    pub first: DateTime<Utc>,
    pub period: Option<Duration>,
}

/// Records what was armed without running anything.
#[derive(Default)]
pub struct FakeTimerService {
    armed: Mutex<HashMap<ReminderKind, (u64, ArmedTimer)>>,
    schedule_calls: Mutex<Vec<ReminderKind>>,
    generations: AtomicU64,
}

impl FakeTimerService {
    pub async fn armed(&self, kind: ReminderKind) -> Option<ArmedTimer> {
        self.armed.lock().await.get(&kind).map(|(_, timer)| timer.clone())
    }

    /// What the currently armed `kind` timer would deliver when it fires.
    pub async fn firing(&self, kind: ReminderKind) -> Option<Firing> {
        self.armed
            .lock()
            .await
            .get(&kind)
            .map(|(generation, _)| Firing {
                kind,
                generation: *generation,
            })
    }

    pub async fn schedule_calls(&self, kind: ReminderKind) -> usize {
        self.schedule_calls
            .lock()
            .await
            .iter()
            .filter(|k| **k == kind)
            .count()
    }

    async fn arm(&self, kind: ReminderKind, timer: ArmedTimer) {
        let generation = self.generations.fetch_add(1, Ordering::SeqCst);
        self.schedule_calls.lock().await.push(kind);
        self.armed.lock().await.insert(kind, (generation, timer));
    }
}

#[async_trait]
impl TimerService for FakeTimerService {
    async fn schedule_once(&self, kind: ReminderKind, at: DateTime<Utc>) {
        self.arm(kind, ArmedTimer { first: at, period: None }).await;
    }

    async fn schedule_periodic(&self, kind: ReminderKind, first: DateTime<Utc>, period: Duration) {
        let timer = ArmedTimer {
            first,
            period: Some(period),
        };
        self.arm(kind, timer).await;
    }

    async fn cancel(&self, kind: ReminderKind) {
        self.armed.lock().await.remove(&kind);
    }

    async fn cancel_all(&self) {
        self.armed.lock().await.clear();
    }

    async fn is_armed(&self, kind: ReminderKind) -> bool {
        self.armed.lock().await.contains_key(&kind)
    }

    async fn is_current(&self, firing: Firing) -> bool {
        self.armed
            .lock()
            .await
            .get(&firing.kind)
            .is_some_and(|(generation, _)| *generation == firing.generation)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Notification>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: Notification) -> anyhow::Result<()> {
        self.sent.lock().await.push(notification);
        Ok(())
    }
}
