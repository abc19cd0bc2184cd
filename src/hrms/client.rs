use crate::hrms::error::{FeedError, Result};
use crate::hrms::models::{AttendanceEvent, parse_feed};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Source of the raw attendance event list.
#[async_trait]
pub trait AttendanceFeed: Send + Sync {
    async fn fetch_events(&self) -> Result<Vec<AttendanceEvent>>;
}

pub struct HrmsClient {
    client: Client,
    api_url: String,
    token: String,
}

impl HrmsClient {
    pub fn new(api_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            token: token.to_string(),
        })
    }
}

#[async_trait]
impl AttendanceFeed for HrmsClient {
    async fn fetch_events(&self) -> Result<Vec<AttendanceEvent>> {
        let response = self
            .client
            .get(&self.api_url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let events = parse_feed(&body)?;
        tracing::debug!("Fetched {} attendance events from HRMS", events.len());

        Ok(events)
    }
}
