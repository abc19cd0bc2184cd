use crate::attendance::progress::Progress;
use crate::attendance::session::{AttendanceSession, expected_checkout};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakSummary {
    /// 1-based position in the day
    pub index: usize,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub duration_minutes: i64,
}

/// What the presentation side gets: typed instants, no re-parsing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub work_start: Option<DateTime<Utc>>,
    pub work_end: Option<DateTime<Utc>>,
    pub breaks: Vec<BreakSummary>,
    pub expected_checkout: Option<DateTime<Utc>>,
    pub progress: Option<Progress>,
}

impl SessionSummary {
    pub fn build(session: &AttendanceSession, date: NaiveDate, now: DateTime<Utc>) -> Self {
        let breaks = session
            .breaks
            .iter()
            .enumerate()
            .map(|(i, b)| BreakSummary {
                index: i + 1,
                start: b.start,
                end: b.end,
                duration_minutes: b.duration_at(now).num_minutes(),
            })
            .collect();

        Self {
            date,
            generated_at: now,
            work_start: session.work_start,
            work_end: session.work_end,
            breaks,
            expected_checkout: expected_checkout(session, now),
            progress: Progress::compute(session, now),
        }
    }

    pub fn is_started(&self) -> bool {
        self.work_start.is_some()
    }

    pub fn is_working(&self) -> bool {
        self.work_start.is_some() && self.work_end.is_none()
    }

    pub fn total_break_minutes(&self) -> i64 {
        self.breaks.iter().map(|b| b.duration_minutes).sum()
    }
}

/// Answer to a "current summary" request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryReply {
    Fresh(SessionSummary),
    /// The fetch failed. Carries the retained session when there is one.
    Unavailable { stale: Option<SessionSummary> },
}
