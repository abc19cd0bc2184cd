use crate::attendance::{AttendanceSession, expected_checkout};
use crate::reminder::{Firing, Notification, ReminderKind, TimerService};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

pub const BREAK_REMINDER_PERIOD_MINUTES: i64 = 120;
pub const CHECKOUT_LEAD_MINUTES: i64 = 15;
pub const OVERTIME_PERIOD_MINUTES: i64 = 15;

/// Break, pre-checkout and overtime reminders on top of a [`TimerService`].
pub struct ReminderScheduler {
    timers: Arc<dyn TimerService>,
}

impl ReminderScheduler {
    pub fn new(timers: Arc<dyn TimerService>) -> Self {
        Self { timers }
    }

    pub async fn on_startup(&self, now: DateTime<Utc>) {
        tracing::info!("Startup: clearing reminders");
        self.reset(now).await;
    }

    pub async fn on_day_rollover(&self, now: DateTime<Utc>) {
        tracing::info!("New day: clearing reminders");
        self.reset(now).await;
    }

    async fn reset(&self, now: DateTime<Utc>) {
        let period = Duration::minutes(BREAK_REMINDER_PERIOD_MINUTES);
        self.timers.cancel_all().await;
        self.timers
            .schedule_periodic(ReminderKind::Break, now + period, period)
            .await;
    }

    /// Arms the pre-checkout reminder and, if needed, the overtime reminder.
    pub async fn after_successful_fetch(&self, session: &AttendanceSession, now: DateTime<Utc>) {
        let Some(expected) = expected_checkout(session, now) else {
            return;
        };

        let reminder_at = expected - Duration::minutes(CHECKOUT_LEAD_MINUTES);
        if reminder_at > now {
            self.timers.schedule_once(ReminderKind::Checkout, reminder_at).await;
        }

        self.arm_overtime_if_needed(session, now).await;
    }

    /// Returns whether a new overtime timer was armed. Never arms twice.
    pub async fn arm_overtime_if_needed(&self, session: &AttendanceSession, now: DateTime<Utc>) -> bool {
        if session.work_end.is_some() {
            return false;
        }
        let Some(expected) = expected_checkout(session, now) else {
            return false;
        };
        if self.timers.is_armed(ReminderKind::Overtime).await {
            return false;
        }

        let first = expected.max(now);
        self.timers
            .schedule_periodic(
                ReminderKind::Overtime,
                first,
                Duration::minutes(OVERTIME_PERIOD_MINUTES),
            )
            .await;
        true
    }

    /// What to tell the user when a timer fires. Firings from a timer that
    /// was cancelled or replaced since are dropped. A firing overtime timer
    /// disarms itself once the day has a check-out.
    pub async fn on_fire(&self, firing: Firing, session: &AttendanceSession) -> Option<Notification> {
        if !self.timers.is_current(firing).await {
            tracing::debug!("Dropping stale {} firing", firing.kind.name());
            return None;
        }

        match firing.kind {
            ReminderKind::Break => Some(Notification::TakeBreak),
            ReminderKind::Checkout => Some(Notification::CheckoutSoon),
            ReminderKind::Overtime => {
                if session.work_end.is_none() {
                    Some(Notification::Overtime)
                } else {
                    self.timers.cancel(ReminderKind::Overtime).await;
                    None
                }
            }
        }
    }
}
