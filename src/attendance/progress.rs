use crate::attendance::session::{AttendanceSession, WORK_MINUTES};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProgressBand {
    /// Less than 20% of the day done
    Critical,
    /// 20% up to 50%
    Warning,
    /// Half the day or more
    OnTrack,
}

impl ProgressBand {
    pub fn for_percent(percent: f64) -> Self {
        if percent < 20.0 {
            ProgressBand::Critical
        } else if percent < 50.0 {
            ProgressBand::Warning
        } else {
            ProgressBand::OnTrack
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            ProgressBand::Critical => 0xf44336,
            ProgressBand::Warning => 0xff9800,
            ProgressBand::OnTrack => 0x4caf50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    pub percent: f64,
    pub completed_minutes: i64,
    pub remaining_minutes: i64,
    pub band: ProgressBand,
}

impl Progress {
    /// Completion of the working day. Measured up to check-out once there is
    /// one, otherwise up to `now`. `None` until the day has started.
    pub fn compute(session: &AttendanceSession, now: DateTime<Utc>) -> Option<Self> {
        let work_start = session.work_start?;
        let reference = session.work_end.unwrap_or(now);

        let break_time = session.total_break_at(reference);
        let target = Duration::minutes(WORK_MINUTES) + break_time;
        let expected = work_start + target;

        let completed = reference.signed_duration_since(work_start).max(Duration::zero());
        let percent = (seconds(completed) / seconds(target) * 100.0).min(100.0);

        let remaining = expected.signed_duration_since(reference);
        let remaining_minutes = ((seconds(remaining) / 60.0).round() as i64).max(0);

        Some(Self {
            percent,
            completed_minutes: completed.num_minutes(),
            remaining_minutes,
            band: ProgressBand::for_percent(percent),
        })
    }

    pub fn rounded_percent(&self) -> u32 {
        self.percent.round() as u32
    }
}

fn seconds(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 1000.0
}
