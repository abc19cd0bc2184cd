mod attendance;
mod bot;
mod config;
mod hrms;
mod reminder;
mod tracker;
mod utils;

#[cfg(test)]
mod testing;

use anyhow::Result;
use bot::notifier::DiscordNotifier;
use chrono::Utc;
use config::Config;
use reminder::{LogNotifier, Notifier, ReminderScheduler, TokioTimerService};
use std::sync::Arc;
use tracker::AttendanceTracker;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "workpulse=info,poise=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let feed = Arc::new(hrms::create_client(&config)?);
    let (timers, fired) = TokioTimerService::new();
    let scheduler = ReminderScheduler::new(Arc::new(timers));
    let tracker = Arc::new(AttendanceTracker::new(feed, scheduler, config.profile.clone()));

    tracker.startup(Utc::now()).await;

    // Create the bot, then hand its HTTP client to the reminder side
    let mut client = bot::create_bot(config.clone(), tracker.clone()).await?;

    let notifier: Arc<dyn Notifier> = match config.notify_channel_id {
        Some(channel_id) => Arc::new(DiscordNotifier::new(client.http.clone(), channel_id)),
        None => {
            tracing::info!("NOTIFY_CHANNEL_ID not set, reminders will only be logged");
            Arc::new(LogNotifier)
        }
    };

    tokio::spawn(tracker::runner::run(
        tracker,
        fired,
        notifier,
        config.refresh_interval,
    ));

    tracing::info!("Starting Discord bot...");

    if let Err(why) = client.start().await {
        tracing::error!("Client error: {:?}", why);
    }

    Ok(())
}
