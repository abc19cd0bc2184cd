pub mod runner;

use crate::attendance::{AttendanceSession, SessionSummary, SummaryReply, derive_session};
use crate::hrms::client::AttendanceFeed;
use crate::hrms::error::FeedError;
use crate::hrms::models::UserProfile;
use crate::reminder::{Firing, Notification, ReminderScheduler};
use crate::utils::time::local_date;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct TrackerState {
    session: AttendanceSession,
    last_refresh_date: Option<NaiveDate>,
}

/// Owns today's session. Every rebuild happens under the state lock, so
/// readers never see a half-built session.
pub struct AttendanceTracker {
    feed: Arc<dyn AttendanceFeed>,
    scheduler: ReminderScheduler,
    profile: Option<UserProfile>,
    state: Mutex<TrackerState>,
    successful_refreshes: AtomicU64,
}

impl AttendanceTracker {
    pub fn new(
        feed: Arc<dyn AttendanceFeed>,
        scheduler: ReminderScheduler,
        profile: Option<UserProfile>,
    ) -> Self {
        Self {
            feed,
            scheduler,
            profile,
            state: Mutex::new(TrackerState::default()),
            successful_refreshes: AtomicU64::new(0),
        }
    }

    pub fn user_profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Process start: all reminders cleared, break reminder re-armed, nothing remembered.
    pub async fn startup(&self, now: DateTime<Utc>) {
        let mut state = self.state.lock().await;
        self.scheduler.on_startup(now).await;
        *state = TrackerState::default();
    }

    pub async fn refresh(&self) -> Result<SessionSummary, FeedError> {
        self.refresh_at(Utc::now()).await
    }

    /// Fetch, derive and reschedule. On failure the previous session stays.
    ///
    /// A caller that had to wait for another refresh to finish gets that
    /// refresh's result instead of fetching again.
    pub async fn refresh_at(&self, now: DateTime<Utc>) -> Result<SessionSummary, FeedError> {
        let seen = self.successful_refreshes.load(Ordering::Acquire);
        let mut state = self.state.lock().await;
        self.refresh_locked(&mut state, seen, now).await
    }

    async fn refresh_locked(
        &self,
        state: &mut TrackerState,
        seen: u64,
        now: DateTime<Utc>,
    ) -> Result<SessionSummary, FeedError> {
        let today = local_date(now);

        if self.successful_refreshes.load(Ordering::Acquire) != seen
            && state.last_refresh_date == Some(today)
        {
            tracing::debug!("Reusing refresh that completed while waiting");
            return Ok(SessionSummary::build(&state.session, today, now));
        }

        if state.last_refresh_date != Some(today) {
            tracing::info!("New day {} → resetting session and reminders", today);
            state.session = AttendanceSession::default();
            self.scheduler.on_day_rollover(now).await;
            state.last_refresh_date = Some(today);
        }

        let events = match self.feed.fetch_events().await {
            Ok(events) => events,
            Err(e) if e.is_malformed() => {
                tracing::warn!("HRMS feed unreadable, keeping previous session: {}", e);
                return Err(e);
            }
            Err(e) => {
                tracing::warn!("HRMS fetch failed: {}", e);
                return Err(e);
            }
        };

        state.session = derive_session(&events, today);
        self.scheduler.after_successful_fetch(&state.session, now).await;
        self.successful_refreshes.fetch_add(1, Ordering::Release);

        tracing::debug!(
            "Session rebuilt: start={:?} end={:?} breaks={}",
            state.session.work_start,
            state.session.work_end,
            state.session.breaks.len()
        );

        Ok(SessionSummary::build(&state.session, today, now))
    }

    pub async fn current_summary(&self) -> SummaryReply {
        self.current_summary_at(Utc::now()).await
    }

    /// Fresh summary, or the "unable to fetch" answer with whatever the failed
    /// refresh left behind.
    pub async fn current_summary_at(&self, now: DateTime<Utc>) -> SummaryReply {
        let seen = self.successful_refreshes.load(Ordering::Acquire);
        let mut state = self.state.lock().await;

        match self.refresh_locked(&mut state, seen, now).await {
            Ok(summary) => SummaryReply::Fresh(summary),
            Err(_) => {
                let stale = state.session.is_started().then(|| {
                    let date = state.last_refresh_date.unwrap_or_else(|| local_date(now));
                    SessionSummary::build(&state.session, date, now)
                });
                SummaryReply::Unavailable { stale }
            }
        }
    }

    pub async fn handle_fire(&self, firing: Firing) -> Option<Notification> {
        let state = self.state.lock().await;
        self.scheduler.on_fire(firing, &state.session).await
    }
}
