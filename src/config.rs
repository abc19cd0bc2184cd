use crate::hrms::models::UserProfile;
use anyhow::Result;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub hrms_api_url: String,
    pub hrms_token: String,
    pub profile: Option<UserProfile>,
    pub notify_channel_id: Option<u64>,
    pub refresh_interval: Duration,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let discord_token = required("DISCORD_TOKEN")?;
        let hrms_api_url = required("HRMS_API_URL")?;
        let hrms_token = required("HRMS_TOKEN")?;

        let profile = match (env::var("HRMS_USER_FIRSTNAME"), env::var("HRMS_EMPLOYEE_ID")) {
            (Ok(first_name), Ok(employee_id)) => Some(UserProfile {
                first_name,
                employee_id,
            }),
            _ => None,
        };

        let notify_channel_id = env::var("NOTIFY_CHANNEL_ID")
            .ok()
            .map(|raw| parse_number::<u64>("NOTIFY_CHANNEL_ID", &raw))
            .transpose()?
            .filter(|id| *id != 0);

        let refresh_minutes = optional_number("REFRESH_INTERVAL_MINUTES", 2)?;
        let timeout_secs = optional_number("HRMS_TIMEOUT_SECS", 30)?;

        if refresh_minutes == 0 || timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "REFRESH_INTERVAL_MINUTES and HRMS_TIMEOUT_SECS must be greater than zero"
            ));
        }

        Ok(Config {
            discord_token,
            hrms_api_url,
            hrms_token,
            profile,
            notify_channel_id,
            refresh_interval: Duration::from_secs(refresh_minutes * 60),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| anyhow::anyhow!("{} environment variable is required", name))
}

fn optional_number(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => parse_number(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("{} must be a number, got {:?}", name, raw))
}
