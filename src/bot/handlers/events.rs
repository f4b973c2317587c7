//! Discord lifecycle event handling.
//!
//! Guild joins trigger provisioning (category + preset channels + persisted
//! config) followed by an initial delivery; guild departures drop the
//! persisted configuration. A guild merely becoming unavailable during an
//! outage is not a departure and leaves the configuration in place.

use crate::bot::BotData;
use crate::core::{delivery, guild, provision};
use crate::deals::DealQuery;
use crate::errors::{Error, Result};
use poise::serenity_prelude as serenity;
use tracing::{error, info};

/// Dispatches the serenity events the bot cares about.
pub async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<()> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!("Connected as {}", data_about_bot.user.name);
            ctx.set_presence(
                Some(serenity::ActivityData::watching("for game deals")),
                serenity::OnlineStatus::Online,
            );
        }
        serenity::FullEvent::GuildCreate { guild, is_new } => {
            if is_new.unwrap_or(false) {
                on_guild_join(data, guild).await?;
            }
        }
        serenity::FullEvent::GuildDelete { incomplete, .. } => {
            // unavailable means an outage, not a removal
            if !incomplete.unavailable {
                #[allow(clippy::cast_possible_wrap)]
                let discord_id = incomplete.id.get() as i64;
                info!(guild = discord_id, "Removed from guild, dropping configuration");
                guild::remove_by_discord_id(&data.database, discord_id).await?;
            }
        }
        _ => {}
    }
    Ok(())
}

async fn on_guild_join(data: &BotData, joined: &serenity::Guild) -> Result<()> {
    info!("Joined guild {}", joined.name);
    #[allow(clippy::cast_possible_wrap)]
    let guild_discord_id = joined.id.get() as i64;

    provision::provision_guild(
        &data.database,
        &data.gateway,
        &data.settings.channels,
        guild_discord_id,
        &joined.name,
    )
    .await?;

    // Greet the new guild with a first delivery; a failure here is logged
    // rather than unwinding the event handler.
    match data.deals.fetch(&DealQuery::default()).await {
        Ok(deals) => {
            if let Err(e) = delivery::deliver_to_guild(
                &data.database,
                &data.gateway,
                &data.registry,
                guild_discord_id,
                &deals,
            )
            .await
            {
                error!(guild = guild_discord_id, "Initial delivery failed: {}", e);
            }
        }
        Err(e) => error!(
            guild = guild_discord_id,
            "Could not fetch deals for initial delivery: {}", e
        ),
    }
    Ok(())
}
