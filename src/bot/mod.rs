pub mod commands;
pub mod handlers;
pub mod interactions;
pub mod notifier;

use crate::attendance::SummaryReply;
use crate::config::Config;
use crate::tracker::AttendanceTracker;
use anyhow::Result;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use std::time::Duration;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Slack on top of the HRMS timeout before a request counts as failed.
const REPLY_GRACE: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct Data {
    pub tracker: Arc<AttendanceTracker>,
    pub config: Config,
}

/// Runs a fresh fetch-derive cycle for a UI request. `None` when the round
/// trip took too long.
pub async fn fetch_summary(data: &Data) -> Option<SummaryReply> {
    let limit = data.config.request_timeout + REPLY_GRACE;
    match tokio::time::timeout(limit, data.tracker.current_summary()).await {
        Ok(reply) => Some(reply),
        Err(_) => {
            tracing::warn!("Summary request exceeded {:?}", limit);
            None
        }
    }
}

pub async fn create_bot(config: Config, tracker: Arc<AttendanceTracker>) -> Result<serenity::Client> {
    let data = Data {
        tracker,
        config: config.clone(),
    };

    let intents = serenity::GatewayIntents::non_privileged();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::summary::summary(),
                commands::profile::whoami(),
            ],
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::ReminderScheduler;
    use crate::testing::{FakeFeed, FakeTimerService};

    fn data_with(feed: Arc<FakeFeed>) -> Data {
        let scheduler = ReminderScheduler::new(Arc::new(FakeTimerService::default()));
        Data {
            tracker: Arc::new(AttendanceTracker::new(feed, scheduler, None)),
            config: Config {
                discord_token: "discord-token".to_string(),
                hrms_api_url: "http://localhost/attendance".to_string(),
                hrms_token: "hrms-token".to_string(),
                profile: None,
                notify_channel_id: None,
                refresh_interval: Duration::from_secs(120),
                request_timeout: Duration::from_secs(30),
            },
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_fetch_gives_up_after_timeout_and_grace() {
        let feed = Arc::new(FakeFeed::gated());
        let data = data_with(feed.clone());
        let started = tokio::time::Instant::now();

        assert_eq!(fetch_summary(&data).await, None);

        assert!(started.elapsed() >= Duration::from_secs(35));
        assert_eq!(feed.calls(), 0);
    }

    #[tokio::test]
    async fn prompt_fetch_is_answered() {
        let data = data_with(Arc::new(FakeFeed::new()));

        let reply = fetch_summary(&data).await;

        assert!(matches!(reply, Some(SummaryReply::Fresh(_))), "got {:?}", reply);
    }
}
