use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

/// India Standard Time, UTC+05:30 with no DST.
const IST_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

/// The single local zone every day boundary and wall-clock label is computed in.
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix())
}

/// Calendar day of `timestamp` as seen in IST.
pub fn local_date(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&ist()).date_naive()
}

/// Reads a naive wall-clock reading as IST.
pub fn from_local_naive(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    ist()
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.to_utc())
}

pub fn parse_feed_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.to_utc());
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return from_local_naive(naive);
        }
    }

    None
}

pub fn format_duration_hm(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!("{}h {}m", minutes / 60, minutes % 60)
}

pub fn format_time_ist(datetime: DateTime<Utc>) -> String {
    datetime.with_timezone(&ist()).format("%H:%M").to_string()
}
