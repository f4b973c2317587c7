//! Automatic-delivery configuration commands.
//!
//! `auto enable`, `auto disable` and `auto time [hour]` manage the per-guild
//! schedule: whether the hourly scheduler delivers to the guild at all, and
//! at which UTC hour.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::Context,
        core::guild,
        errors::{Error, Result},
    };

    #[allow(clippy::cast_possible_wrap)]
    fn guild_discord_id(ctx: &Context<'_>) -> Option<i64> {
        ctx.guild_id().map(|id| id.get() as i64)
    }

    /// Manages automatic deal updates for this guild.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "ADMINISTRATOR",
        subcommands("enable", "disable", "time")
    )]
    pub async fn auto(ctx: Context<'_>) -> Result<()> {
        // Reached via prefix invocation without a subcommand
        ctx.say(
            "Invalid subcommand\nPossible subcommands:\n\
             `auto enable`\n`auto disable`\n`auto time [hour]`",
        )
        .await?;
        Ok(())
    }

    /// Enables automatic updates for this guild.
    #[poise::command(slash_command, prefix_command, guild_only)]
    pub async fn enable(ctx: Context<'_>) -> Result<()> {
        let Some(discord_id) = guild_discord_id(&ctx) else {
            return Ok(());
        };
        let db = &ctx.data().database;

        let Some(config) = guild::get_by_discord_id(db, discord_id).await? else {
            ctx.say("This guild has not been set up yet").await?;
            return Ok(());
        };
        if config.auto {
            ctx.say("Automatic updates are already enabled").await?;
            return Ok(());
        }
        guild::set_auto(db, discord_id, true).await?;
        ctx.say("Automatic updates have been enabled").await?;
        Ok(())
    }

    /// Disables automatic updates for this guild.
    #[poise::command(slash_command, prefix_command, guild_only)]
    pub async fn disable(ctx: Context<'_>) -> Result<()> {
        let Some(discord_id) = guild_discord_id(&ctx) else {
            return Ok(());
        };
        let db = &ctx.data().database;

        let Some(config) = guild::get_by_discord_id(db, discord_id).await? else {
            ctx.say("This guild has not been set up yet").await?;
            return Ok(());
        };
        if !config.auto {
            ctx.say("Automatic updates are already disabled").await?;
            return Ok(());
        }
        guild::set_auto(db, discord_id, false).await?;
        ctx.say("Automatic updates have been disabled").await?;
        Ok(())
    }

    /// Shows or sets the UTC hour of the automatic update.
    #[poise::command(slash_command, prefix_command, guild_only)]
    pub async fn time(
        ctx: Context<'_>,
        #[description = "Hour of the day (0-23, UTC)"] hour: Option<u32>,
    ) -> Result<()> {
        let Some(discord_id) = guild_discord_id(&ctx) else {
            return Ok(());
        };
        let db = &ctx.data().database;

        let Some(hour) = hour else {
            let Some(config) = guild::get_by_discord_id(db, discord_id).await? else {
                ctx.say("This guild has not been set up yet").await?;
                return Ok(());
            };
            ctx.say(format!(
                "Automatic updates are scheduled for {}:00 UTC",
                config.delivery_hour
            ))
            .await?;
            return Ok(());
        };

        match guild::set_delivery_hour(db, discord_id, hour).await {
            Ok(_) => {
                ctx.say(format!("Update time has been set to {hour}:00 UTC"))
                    .await?;
            }
            Err(Error::InvalidHour { .. }) => {
                ctx.say("Time of auto update has to be a number between 0 and 23")
                    .await?;
            }
            Err(Error::GuildNotFound { .. }) => {
                ctx.say("This guild has not been set up yet").await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
