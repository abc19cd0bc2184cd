use crate::bot::{Context, Error};
use crate::utils::format::{create_info_embed, format_profile_header};

/// Show the HRMS identity this tracker reports for
#[poise::command(slash_command)]
pub async fn whoami(ctx: Context<'_>) -> Result<(), Error> {
    let embed = match ctx.data().tracker.user_profile() {
        Some(profile) => create_info_embed(
            &format_profile_header(Some(profile)),
            &format!(
                "**Name**: {}\n**Employee ID**: {}",
                profile.first_name, profile.employee_id
            ),
        ),
        None => create_info_embed(
            &format_profile_header(None),
            "No HRMS profile is configured (set HRMS_USER_FIRSTNAME and HRMS_EMPLOYEE_ID).",
        ),
    };

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
