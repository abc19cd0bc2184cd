pub mod client;
pub mod error;
pub mod models;

use crate::config::Config;
use anyhow::Result;
use client::HrmsClient;

pub fn create_client(config: &Config) -> Result<HrmsClient> {
    let client = HrmsClient::new(&config.hrms_api_url, &config.hrms_token, config.request_timeout)?;
    tracing::info!("HRMS client ready for {}", config.hrms_api_url);
    Ok(client)
}
