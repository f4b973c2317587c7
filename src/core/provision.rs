//! Guild provisioning.
//!
//! When the bot joins a guild it creates a locked category with the preset
//! deal channels and persists the guild config plus one channel mapping per
//! preset. Provisioning is idempotent: a guild that already has a config
//! row is returned as-is, without touching the platform again.

use crate::config::channels::ChannelsConfig;
use crate::core::gateway::ChatGateway;
use crate::core::{channel, guild};
use crate::deals::Store;
use crate::entities::channel::{ActiveModel as ChannelActiveModel, Model as ChannelMapping};
use crate::errors::{Error, Result};
use sea_orm::{DatabaseConnection, Set};
use tracing::{info, instrument};

/// Ensures a guild is provisioned, returning its channel mappings.
#[instrument(skip(db, gateway, config))]
pub async fn provision_guild<G: ChatGateway>(
    db: &DatabaseConnection,
    gateway: &G,
    config: &ChannelsConfig,
    guild_discord_id: i64,
    guild_name: &str,
) -> Result<Vec<ChannelMapping>> {
    if guild::get_by_discord_id(db, guild_discord_id).await?.is_some() {
        info!(guild = guild_discord_id, "Guild already provisioned.");
        return channel::get_all_by_guild_discord_id(db, guild_discord_id).await;
    }

    // Presets come from operator config; reject unknown store slugs before
    // creating anything on the platform side.
    for preset in &config.channels {
        if Store::from_slug(&preset.store).is_none() {
            return Err(Error::InvalidStore {
                store: preset.store.clone(),
            });
        }
    }

    let category_id = gateway
        .create_category(guild_discord_id, &config.category)
        .await?;
    gateway
        .restrict_category_posting(guild_discord_id, category_id)
        .await?;

    let guild_row = guild::create(db, guild_discord_id, guild_name).await?;

    let mut mappings = Vec::with_capacity(config.channels.len());
    for preset in &config.channels {
        let channel_id = gateway
            .create_text_channel(guild_discord_id, &preset.name, Some(category_id))
            .await?;
        mappings.push(ChannelActiveModel {
            discord_id: Set(channel_id),
            guild_id: Set(guild_row.id),
            category_discord_id: Set(category_id),
            name: Set(preset.name.clone()),
            min_retail_price: Set(preset.min_retail_price),
            max_retail_price: Set(preset.max_retail_price),
            store: Set(preset.store.clone()),
            ..Default::default()
        });
    }
    channel::create_bulk(db, mappings).await?;

    info!(
        guild = guild_discord_id,
        channels = config.channels.len(),
        "Provisioned guild."
    );
    channel::get_all_by_guild_discord_id(db, guild_discord_id).await
}
