use crate::reminder::{Notification, Notifier};
use crate::utils::format::create_notification_embed;
use anyhow::Result;
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Posts reminders to a fixed channel.
pub struct DiscordNotifier {
    http: Arc<serenity::Http>,
    channel_id: serenity::ChannelId,
}

impl DiscordNotifier {
    pub fn new(http: Arc<serenity::Http>, channel_id: u64) -> Self {
        Self {
            http,
            channel_id: serenity::ChannelId::new(channel_id),
        }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn notify(&self, notification: Notification) -> Result<()> {
        let message = serenity::CreateMessage::new().embed(create_notification_embed(notification));
        self.channel_id.send_message(&self.http, message).await?;
        tracing::info!("Sent {:?} to channel {}", notification, self.channel_id);
        Ok(())
    }
}
