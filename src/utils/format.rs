use crate::attendance::progress::Progress;
use crate::attendance::{SessionSummary, SummaryReply};
use crate::hrms::models::UserProfile;
use crate::reminder::Notification;
use crate::reminder::notify::NOTIFICATION_TITLE;
use crate::utils::time::{format_duration_hm, format_time_ist};
use poise::serenity_prelude as serenity;

const NOT_STARTED_COLOR: u32 = 0x666666;
const PROGRESS_CELLS: usize = 20;

pub const UNAVAILABLE_MESSAGE: &str = "⚠️ Unable to fetch HRMS data";
pub const RETRY_MESSAGE: &str = "❌ Unable to fetch HRMS data. Please run /summary again.";

/// Check-in/out, numbered breaks and expected checkout, one per line.
pub fn format_summary_lines(summary: &SessionSummary) -> String {
    let mut text = String::new();

    if let Some(start) = summary.work_start {
        text.push_str(&format!("🟢 **Check In**: {}\n", format_time_ist(start)));
    }
    if let Some(end) = summary.work_end {
        text.push_str(&format!("🔴 **Check Out**: {}\n", format_time_ist(end)));
    }

    if !summary.breaks.is_empty() {
        text.push_str("🛑 **Breaks**:\n");
        for b in &summary.breaks {
            let end = b
                .end
                .map(format_time_ist)
                .unwrap_or_else(|| "ongoing".to_string());
            text.push_str(&format!(
                "  {}. {} - {} ({} min)\n",
                b.index,
                format_time_ist(b.start),
                end,
                b.duration_minutes
            ));
        }
        text.push_str(&format!("  Total: {} min\n", summary.total_break_minutes()));
    }

    if summary.is_working() {
        if let Some(expected) = summary.expected_checkout {
            text.push_str(&format!("⏰ **Expected Checkout**: {}\n", format_time_ist(expected)));
        }
    }

    if !summary.is_started() {
        text.push_str("Work not started");
    }

    text
}

pub fn format_progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * PROGRESS_CELLS as f64).round() as usize;
    format!(
        "`{}{}`",
        "▓".repeat(filled),
        "░".repeat(PROGRESS_CELLS - filled)
    )
}

pub fn format_progress(progress: &Progress) -> String {
    format!(
        "{} {}%\nRemaining: {}",
        format_progress_bar(progress.percent),
        progress.rounded_percent(),
        format_duration_hm(progress.remaining_minutes)
    )
}

pub fn format_profile_header(profile: Option<&UserProfile>) -> String {
    match profile {
        Some(p) => format!("{} - {} ({})", NOTIFICATION_TITLE, p.first_name, p.employee_id),
        None => NOTIFICATION_TITLE.to_string(),
    }
}

pub fn format_error_message(error: &str) -> String {
    format!("❌ **Error**: {}", error)
}

pub fn create_error_embed(title: &str, description: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title)
        .description(description)
        .color(0xff0000) // Red
        .timestamp(chrono::Utc::now())
}

pub fn create_info_embed(title: &str, description: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title)
        .description(description)
        .color(0x3498db) // Blue
        .timestamp(chrono::Utc::now())
}

fn summary_body(profile: Option<&UserProfile>, summary: &SessionSummary) -> serenity::CreateEmbed {
    let color = summary
        .progress
        .as_ref()
        .map(|p| p.band.color())
        .unwrap_or(NOT_STARTED_COLOR);

    let mut embed = serenity::CreateEmbed::new()
        .title("📊 Today's attendance")
        .description(format_summary_lines(summary))
        .color(color)
        .author(serenity::CreateEmbedAuthor::new(format_profile_header(profile)))
        .footer(serenity::CreateEmbedFooter::new(summary.date.format("%Y-%m-%d (%a)").to_string()))
        .timestamp(summary.generated_at);

    if let Some(progress) = &summary.progress {
        embed = embed.field("Progress", format_progress(progress), false);
    }

    embed
}

pub fn create_summary_embed(profile: Option<&UserProfile>, reply: &SummaryReply) -> serenity::CreateEmbed {
    match reply {
        SummaryReply::Fresh(summary) => summary_body(profile, summary),
        SummaryReply::Unavailable { stale: Some(stale) } => summary_body(profile, stale)
            .title(UNAVAILABLE_MESSAGE)
            .field("Last known", "Showing data from the last successful sync.", false),
        SummaryReply::Unavailable { stale: None } => {
            create_error_embed(UNAVAILABLE_MESSAGE, "The HRMS feed could not be reached. Try again shortly.")
        }
    }
}

pub fn create_notification_embed(notification: Notification) -> serenity::CreateEmbed {
    let color = match notification {
        Notification::TakeBreak => 0x3498db,
        Notification::CheckoutSoon => 0xff9800,
        Notification::Overtime => 0xf44336,
    };

    serenity::CreateEmbed::new()
        .title(NOTIFICATION_TITLE)
        .description(notification.message())
        .color(color)
        .timestamp(chrono::Utc::now())
}
