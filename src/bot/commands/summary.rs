use crate::bot::interactions::summary_buttons::refresh_components;
use crate::bot::{Context, Error, fetch_summary};
use crate::utils::format::{RETRY_MESSAGE, create_error_embed, create_summary_embed};

/// Show today's attendance: check-in, breaks, expected checkout and progress
#[poise::command(slash_command)]
pub async fn summary(ctx: Context<'_>) -> Result<(), Error> {
    // The HRMS round trip can take longer than Discord's response window.
    ctx.defer().await?;

    let data = ctx.data();

    let Some(reply) = fetch_summary(data).await else {
        let embed = create_error_embed("Timed out", RETRY_MESSAGE);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        return Ok(());
    };

    let embed = create_summary_embed(data.tracker.user_profile(), &reply);
    let builder = poise::CreateReply::default()
        .embed(embed)
        .components(refresh_components());

    ctx.send(builder).await?;

    Ok(())
}
