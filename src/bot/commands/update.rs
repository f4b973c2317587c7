//! Manual update command - triggers a delivery run for the current guild.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::Context,
        core::delivery::{self, MAX_DEALS_PER_UPDATE},
        core::registry::DELIVERY_TASK,
        deals::StoreSelector,
        errors::{Error, Result},
    };

    /// Fetches fresh deals and reposts them into this guild's deal channels.
    ///
    /// Rejected while a delivery (scheduled or manual) is already in flight
    /// for the guild, so two runs never interleave in the same channels.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "ADMINISTRATOR"
    )]
    pub async fn update(
        ctx: Context<'_>,
        #[description = "Store to update: steam, gog or all (default all)"] store: Option<String>,
        #[description = "How many deals to fetch, up to 200 (default 60)"] amount: Option<u32>,
    ) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };
        #[allow(clippy::cast_possible_wrap)]
        let guild_discord_id = guild_id.get() as i64;

        let store: StoreSelector = match store.as_deref().unwrap_or("all").parse() {
            Ok(selector) => selector,
            Err(Error::InvalidStore { store }) => {
                ctx.say(format!(
                    "Invalid store `{store}`\nPossible options: `steam`, `gog`, `all`\n\
                     Example: `/update steam 10`"
                ))
                .await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let amount = amount.unwrap_or(60) as usize;

        let data = ctx.data();
        if data.registry.is_running(guild_discord_id, DELIVERY_TASK) {
            ctx.say("Bot is already updating, please wait...").await?;
            return Ok(());
        }
        if amount > MAX_DEALS_PER_UPDATE {
            ctx.say(format!(
                "Maximum amount of deals is {MAX_DEALS_PER_UPDATE}\nPlease provide another amount"
            ))
            .await?;
            return Ok(());
        }

        ctx.say(format!("Started updating daily deals for {store}"))
            .await?;

        match delivery::manual_update(
            &data.database,
            &data.gateway,
            &data.registry,
            &data.deals,
            guild_discord_id,
            store,
            amount,
        )
        .await
        {
            Ok(count) => {
                ctx.say(format!(
                    "{store} deals have been updated with {count} positions"
                ))
                .await?;
            }
            Err(Error::NoDealsFound) => {
                ctx.say("Could not find any deals to show").await?;
            }
            // The command-level checks above already cover these; a race
            // with the scheduler can still surface the first one here.
            Err(Error::AlreadyRunning) => {
                ctx.say("Bot is already updating, please wait...").await?;
            }
            Err(Error::TooManyDeals { max, .. }) => {
                ctx.say(format!("Maximum amount of deals is {max}")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
