use crate::bot::{Data, Error, fetch_summary};
use crate::utils::format::{RETRY_MESSAGE, create_error_embed, create_summary_embed, format_error_message};
use poise::serenity_prelude as serenity;

pub const REFRESH_BUTTON_ID: &str = "summary_refresh";

pub fn refresh_components() -> Vec<serenity::CreateActionRow> {
    let button = serenity::CreateButton::new(REFRESH_BUTTON_ID)
        .label("🔄 Refresh")
        .style(serenity::ButtonStyle::Secondary);

    vec![serenity::CreateActionRow::Buttons(vec![button])]
}

pub async fn handle_summary_interaction(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    data: &Data,
) -> Result<(), Error> {
    match interaction.data.custom_id.as_str() {
        REFRESH_BUTTON_ID => handle_refresh(ctx, interaction, data).await,
        _ => {
            interaction
                .create_response(
                    &ctx.http,
                    serenity::CreateInteractionResponse::Message(
                        serenity::CreateInteractionResponseMessage::new()
                            .content(format_error_message("Unknown action"))
                            .ephemeral(true),
                    ),
                )
                .await?;
            Ok(())
        }
    }
}

async fn handle_refresh(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    data: &Data,
) -> Result<(), Error> {
    // Acknowledge first, then edit the original message once the fetch is done.
    interaction.defer(&ctx.http).await?;

    let embed = match fetch_summary(data).await {
        Some(reply) => create_summary_embed(data.tracker.user_profile(), &reply),
        None => create_error_embed("Timed out", RETRY_MESSAGE),
    };

    interaction
        .edit_response(
            &ctx.http,
            serenity::EditInteractionResponse::new()
                .embed(embed)
                .components(refresh_components()),
        )
        .await?;

    Ok(())
}
