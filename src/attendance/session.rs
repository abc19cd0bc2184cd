use crate::hrms::models::{AttendanceEvent, EventKind};
use crate::utils::time::local_date;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

/// Mandated work time per day, 8.5 hours. Policy, not configuration.
pub const WORK_MINUTES: i64 = 510;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakInterval {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl BreakInterval {
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Frozen once closed; grows with `now` while the break is ongoing.
    pub fn duration_at(&self, now: DateTime<Utc>) -> Duration {
        self.end.unwrap_or(now).signed_duration_since(self.start)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceSession {
    pub work_start: Option<DateTime<Utc>>,
    pub work_end: Option<DateTime<Utc>>,
    pub breaks: Vec<BreakInterval>,
}

impl AttendanceSession {
    pub fn is_started(&self) -> bool {
        self.work_start.is_some()
    }

    pub fn total_break_at(&self, now: DateTime<Utc>) -> Duration {
        self.breaks
            .iter()
            .fold(Duration::zero(), |total, b| total + b.duration_at(now))
    }
}

/// Builds today's session from the raw feed.
///
/// Events are taken in the order given; they are expected to be chronological.
/// Breaks that cross midnight are lost because the day filter runs first.
pub fn derive_session(events: &[AttendanceEvent], today: NaiveDate) -> AttendanceSession {
    let mut session = AttendanceSession::default();

    for event in events.iter().filter(|e| local_date(e.timestamp) == today) {
        match event.kind {
            EventKind::CheckedIn => {
                if session.work_start.is_none() {
                    session.work_start = Some(event.timestamp);
                }
            }
            EventKind::CheckedOut => {
                session.work_end = Some(event.timestamp);
            }
            EventKind::BreakedIn => {
                session.breaks.push(BreakInterval {
                    start: event.timestamp,
                    end: None,
                });
            }
            EventKind::BreakedOut => {
                match session.breaks.iter_mut().find(|b| b.is_open()) {
                    Some(open) => open.end = Some(event.timestamp),
                    None => tracing::debug!(
                        "Ignoring {:?} at {} with no open break",
                        event.kind.as_str(),
                        event.timestamp
                    ),
                }
            }
        }
    }

    session
}

/// `work_start + 510 min + all break time`, recomputed on every call since a
/// break may still be running.
pub fn expected_checkout(session: &AttendanceSession, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let work_start = session.work_start?;
    Some(work_start + Duration::minutes(WORK_MINUTES) + session.total_break_at(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::from_local_naive;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn at(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
        from_local_naive(date.and_hms_opt(hour, minute, 0).unwrap()).unwrap()
    }

    fn ev(hour: u32, minute: u32, kind: EventKind) -> AttendanceEvent {
        AttendanceEvent::new(at(day(), hour, minute), kind)
    }

    #[test]
    fn second_check_in_is_ignored() {
        let events = vec![
            ev(8, 0, EventKind::CheckedIn),
            ev(10, 0, EventKind::BreakedIn),
            ev(10, 20, EventKind::BreakedOut),
            ev(11, 0, EventKind::CheckedIn),
        ];

        let session = derive_session(&events, day());

        assert_eq!(session.work_start, Some(at(day(), 8, 0)));
        assert_eq!(session.breaks.len(), 1);
        let only = &session.breaks[0];
        assert_eq!(only.end, Some(at(day(), 10, 20)));
        assert_eq!(only.duration_at(at(day(), 16, 0)), Duration::minutes(20));
    }

    #[test]
    fn last_check_out_wins() {
        let events = vec![
            ev(9, 0, EventKind::CheckedIn),
            ev(17, 0, EventKind::CheckedOut),
            ev(18, 45, EventKind::CheckedOut),
        ];

        let session = derive_session(&events, day());

        assert_eq!(session.work_end, Some(at(day(), 18, 45)));
    }

    #[test]
    fn orphan_break_end_is_ignored() {
        let session = derive_session(&[ev(9, 0, EventKind::BreakedOut)], day());
        assert!(session.breaks.is_empty());
        assert!(!session.is_started());
    }

    #[test]
    fn break_end_closes_oldest_open_break() {
        let events = vec![
            ev(9, 0, EventKind::CheckedIn),
            ev(11, 0, EventKind::BreakedIn),
            ev(11, 5, EventKind::BreakedIn),
            ev(11, 30, EventKind::BreakedOut),
        ];

        let session = derive_session(&events, day());

        assert_eq!(session.breaks.len(), 2);
        assert_eq!(session.breaks[0].end, Some(at(day(), 11, 30)));
        assert!(session.breaks[1].is_open());
    }

    #[test]
    fn open_break_grows_with_now() {
        let events = vec![ev(9, 0, EventKind::CheckedIn), ev(13, 0, EventKind::BreakedIn)];
        let session = derive_session(&events, day());

        assert_eq!(session.total_break_at(at(day(), 13, 10)), Duration::minutes(10));
        assert_eq!(session.total_break_at(at(day(), 13, 40)), Duration::minutes(40));
    }

    #[test]
    fn events_from_other_days_are_dropped() {
        let yesterday = day().pred_opt().unwrap();
        let events = vec![
            AttendanceEvent::new(at(yesterday, 9, 0), EventKind::CheckedIn),
            AttendanceEvent::new(at(yesterday, 12, 0), EventKind::BreakedIn),
            AttendanceEvent::new(at(yesterday, 18, 0), EventKind::CheckedOut),
        ];

        let session = derive_session(&events, day());

        assert_eq!(session, AttendanceSession::default());
    }

    #[test]
    fn break_spanning_midnight_is_dropped_on_both_days() {
        let next = day().succ_opt().unwrap();
        let events = vec![
            AttendanceEvent::new(at(day(), 23, 50), EventKind::BreakedIn),
            AttendanceEvent::new(at(next, 0, 10), EventKind::BreakedOut),
        ];

        assert_eq!(derive_session(&events, day()).breaks.len(), 1);
        assert!(derive_session(&events, day()).breaks[0].is_open());
        assert!(derive_session(&events, next).breaks.is_empty());
    }

    #[test]
    fn derivation_is_repeatable() {
        let events = vec![
            ev(9, 0, EventKind::CheckedIn),
            ev(12, 0, EventKind::BreakedIn),
            ev(12, 30, EventKind::BreakedOut),
        ];

        let first = derive_session(&events, day());
        let second = derive_session(&events, day());

        assert_eq!(first, second);
    }

    #[test]
    fn expected_checkout_adds_work_and_breaks() {
        let mut events = vec![ev(9, 0, EventKind::CheckedIn)];
        let now = at(day(), 12, 0);

        let session = derive_session(&events, day());
        assert_eq!(expected_checkout(&session, now), Some(at(day(), 17, 30)));

        events.push(ev(10, 0, EventKind::BreakedIn));
        events.push(ev(10, 30, EventKind::BreakedOut));
        let session = derive_session(&events, day());
        assert_eq!(expected_checkout(&session, now), Some(at(day(), 18, 0)));
    }

    #[test]
    fn expected_checkout_tracks_open_break() {
        let events = vec![ev(9, 0, EventKind::CheckedIn), ev(13, 0, EventKind::BreakedIn)];
        let session = derive_session(&events, day());

        assert_eq!(expected_checkout(&session, at(day(), 13, 15)), Some(at(day(), 17, 45)));
        assert_eq!(expected_checkout(&session, at(day(), 13, 45)), Some(at(day(), 18, 15)));
    }

    #[test]
    fn no_expected_checkout_before_check_in() {
        assert_eq!(expected_checkout(&AttendanceSession::default(), at(day(), 9, 0)), None);
    }
}
