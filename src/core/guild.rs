//! Guild config business logic.
//!
//! Provides functions for creating, retrieving, updating and removing the
//! per-guild delivery configuration. All functions are async and return
//! Result types for error handling.

use crate::{
    entities::{Channel, Guild, channel, guild},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Default delivery hour (UTC) for newly joined guilds.
pub const DEFAULT_DELIVERY_HOUR: i32 = 12;

/// Finds a guild config by its Discord id, `None` when the guild is not
/// registered.
pub async fn get_by_discord_id(
    db: &DatabaseConnection,
    discord_id: i64,
) -> Result<Option<guild::Model>> {
    Guild::find()
        .filter(guild::Column::DiscordId.eq(discord_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Registers a guild with the default configuration (auto-delivery on,
/// delivery at 12:00 UTC).
pub async fn create(
    db: &DatabaseConnection,
    discord_id: i64,
    name: &str,
) -> Result<guild::Model> {
    let model = guild::ActiveModel {
        discord_id: Set(discord_id),
        name: Set(name.to_string()),
        auto: Set(true),
        delivery_hour: Set(DEFAULT_DELIVERY_HOUR),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Returns all guilds due for an automatic delivery at the given UTC hour.
///
/// Due means the auto flag is set and the configured delivery hour matches.
pub async fn get_all_due(db: &DatabaseConnection, hour: u32) -> Result<Vec<guild::Model>> {
    #[allow(clippy::cast_possible_wrap)]
    let hour = hour as i32;
    Guild::find()
        .filter(guild::Column::Auto.eq(true))
        .filter(guild::Column::DeliveryHour.eq(hour))
        .order_by_asc(guild::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Enables or disables automatic deliveries for a guild.
pub async fn set_auto(
    db: &DatabaseConnection,
    discord_id: i64,
    auto: bool,
) -> Result<guild::Model> {
    let existing = get_by_discord_id(db, discord_id)
        .await?
        .ok_or(Error::GuildNotFound { discord_id })?;

    let mut model: guild::ActiveModel = existing.into();
    model.auto = Set(auto);
    model.update(db).await.map_err(Into::into)
}

/// Sets the UTC hour at which the scheduled delivery fires for a guild.
///
/// Hours outside 0-23 are rejected with [`Error::InvalidHour`].
pub async fn set_delivery_hour(
    db: &DatabaseConnection,
    discord_id: i64,
    hour: u32,
) -> Result<guild::Model> {
    if hour > 23 {
        return Err(Error::InvalidHour { hour });
    }

    let existing = get_by_discord_id(db, discord_id)
        .await?
        .ok_or(Error::GuildNotFound { discord_id })?;

    let mut model: guild::ActiveModel = existing.into();
    #[allow(clippy::cast_possible_wrap)]
    {
        model.delivery_hour = Set(hour as i32);
    }
    model.update(db).await.map_err(Into::into)
}

/// Removes a guild and all of its channel mappings.
///
/// Called when the bot leaves (or is removed from) a guild. Unknown guilds
/// are a no-op: the departure event may arrive for guilds that never
/// finished provisioning.
pub async fn remove_by_discord_id(db: &DatabaseConnection, discord_id: i64) -> Result<()> {
    let Some(existing) = get_by_discord_id(db, discord_id).await? else {
        return Ok(());
    };

    Channel::delete_many()
        .filter(channel::Column::GuildId.eq(existing.id))
        .exec(db)
        .await?;
    Guild::delete_by_id(existing.id).exec(db).await?;
    Ok(())
}
