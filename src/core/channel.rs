//! Channel mapping business logic.
//!
//! Channel mappings tie persisted rows to platform-side text channels. The
//! row id is the stable identity; the Discord id and name are attributes
//! that get rewritten when a channel is recreated after deletion.

use crate::{
    entities::{Channel, channel},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Returns all channel mappings belonging to a guild, by the guild's
/// Discord id. Unregistered guilds yield an empty list.
pub async fn get_all_by_guild_discord_id(
    db: &DatabaseConnection,
    guild_discord_id: i64,
) -> Result<Vec<channel::Model>> {
    let Some(guild) = crate::core::guild::get_by_discord_id(db, guild_discord_id).await? else {
        return Ok(Vec::new());
    };

    Channel::find()
        .filter(channel::Column::GuildId.eq(guild.id))
        .order_by_asc(channel::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Inserts a batch of channel mappings in one statement.
pub async fn create_bulk(
    db: &DatabaseConnection,
    mappings: Vec<channel::ActiveModel>,
) -> Result<()> {
    if mappings.is_empty() {
        return Ok(());
    }
    Channel::insert_many(mappings).exec(db).await?;
    Ok(())
}

/// Rewrites the platform id (and name) of a mapping after the channel was
/// recreated, keyed by the stable row id.
pub async fn update_platform_id(
    db: &DatabaseConnection,
    mapping_id: i64,
    new_discord_id: i64,
    name: &str,
) -> Result<channel::Model> {
    let existing = Channel::find_by_id(mapping_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::Config {
            message: format!("Channel mapping {mapping_id} does not exist"),
        })?;

    let mut model: channel::ActiveModel = existing.into();
    model.discord_id = Set(new_discord_id);
    model.name = Set(name.to_string());
    model.update(db).await.map_err(Into::into)
}
