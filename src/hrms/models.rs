use crate::hrms::error::Result;
use crate::utils::time::parse_feed_timestamp;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    CheckedIn,
    CheckedOut,
    BreakedIn,
    BreakedOut,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::CheckedIn => "Checked In",
            EventKind::CheckedOut => "Checked Out",
            EventKind::BreakedIn => "Breaked In",
            EventKind::BreakedOut => "Breaked Out",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Checked In" => Some(EventKind::CheckedIn),
            "Checked Out" => Some(EventKind::CheckedOut),
            "Breaked In" => Some(EventKind::BreakedIn),
            "Breaked Out" => Some(EventKind::BreakedOut),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: EventKind,
}

impl AttendanceEvent {
    pub fn new(timestamp: DateTime<Utc>, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }
}

/// Cached identity shown next to the summary. Obtained out of band, never fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub first_name: String,
    pub employee_id: String,
}

#[derive(Debug, Deserialize)]
struct FeedBody {
    #[serde(default)]
    listings: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct RawListing {
    #[serde(rename = "0")]
    stamp: Option<RawStamp>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawStamp {
    date: Option<String>,
}

/// Decodes a feed body into events, in feed order.
///
/// A body that is not JSON is an error. A JSON body without a `listings`
/// array yields no events. Entries that can't be understood are skipped.
pub fn parse_feed(body: &str) -> Result<Vec<AttendanceEvent>> {
    let body: FeedBody = serde_json::from_str(body)?;

    let Some(listings) = body.listings else {
        tracing::warn!("HRMS feed has no listings array");
        return Ok(Vec::new());
    };

    let mut events = Vec::with_capacity(listings.len());
    for (position, value) in listings.into_iter().enumerate() {
        match listing_to_event(value) {
            Some(event) => events.push(event),
            None => tracing::warn!("Skipping unreadable HRMS listing at position {}", position),
        }
    }

    Ok(events)
}

fn listing_to_event(value: serde_json::Value) -> Option<AttendanceEvent> {
    let raw: RawListing = serde_json::from_value(value).ok()?;
    let kind = EventKind::parse(raw.kind.as_deref()?)?;
    let timestamp = parse_feed_timestamp(raw.stamp?.date.as_deref()?)?;
    Some(AttendanceEvent::new(timestamp, kind))
}
