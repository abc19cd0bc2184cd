use anyhow::Result;
use async_trait::async_trait;

pub const NOTIFICATION_TITLE: &str = "WorkPulse Tracker";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    TakeBreak,
    CheckoutSoon,
    Overtime,
}

impl Notification {
    pub fn message(&self) -> &'static str {
        match self {
            Notification::TakeBreak => "🚶 Time to move! Take a quick break.",
            Notification::CheckoutSoon => "⏰ 15 minutes left until checkout.",
            Notification::Overtime => "⚠️ You're working overtime!",
        }
    }
}

/// Fire-and-forget delivery; nothing is acknowledged.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<()>;
}

/// Used when no notification channel is configured.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: Notification) -> Result<()> {
        tracing::info!("{}: {}", NOTIFICATION_TITLE, notification.message());
        Ok(())
    }
}
