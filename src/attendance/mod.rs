pub mod progress;
pub mod session;
pub mod summary;

pub use session::{AttendanceSession, derive_session, expected_checkout};
pub use summary::{SessionSummary, SummaryReply};
