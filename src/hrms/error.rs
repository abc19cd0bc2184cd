use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeedError>;

/// Ways a fetch of the attendance feed can fail.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport failure, including the request timeout
    #[error("HRMS request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("HRMS returned HTTP {0}")]
    Status(u16),

    /// Body was not JSON
    #[error("HRMS feed is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl FeedError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, FeedError::Malformed(_))
    }
}
