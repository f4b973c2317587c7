//! Per-guild delivery engine.
//!
//! Takes a fetched deal batch, filters it per configured channel and posts
//! it: clear the channel, then header, one card per deal, closing line.
//! Channels of one guild are delivered concurrently; messages within one
//! channel are sequential so the chat order matches presentation order.
//!
//! Recovery paths: a channel that vanished mid-delivery is recreated under
//! its recorded category (the mapping row is rewritten, then delivery is
//! retried exactly once); a permission failure aborts the guild quietly so
//! other guilds are unaffected. The running-task marker is held by a guard
//! and released on every exit path.

use crate::core::gateway::{ChatError, ChatGateway};
use crate::core::registry::{DELIVERY_TASK, TaskRegistry};
use crate::core::{channel, router};
use crate::deals::{Deal, DealQuery, DealsClient, StoreSelector};
use crate::entities::channel::Model as ChannelMapping;
use crate::errors::{Error, Result};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Upper bound on the deal amount a manual update may request.
pub const MAX_DEALS_PER_UPDATE: usize = 200;

/// Settle time between purging a channel and reposting into it. Discord
/// sometimes still shows stale messages right after a purge.
const PURGE_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Delivers a deal batch to every configured channel of one guild.
///
/// Fails soft on permission errors (logged, `Ok`) so one guild cannot take
/// down a scheduling pass; all other errors propagate. The registry marker
/// is cleared in every case.
#[instrument(skip(db, gateway, registry, deals), fields(deals = deals.len()))]
pub async fn deliver_to_guild<G: ChatGateway>(
    db: &DatabaseConnection,
    gateway: &G,
    registry: &Arc<TaskRegistry>,
    guild_discord_id: i64,
    deals: &[Deal],
) -> Result<()> {
    let _task = registry.begin(guild_discord_id, DELIVERY_TASK);

    let mappings = channel::get_all_by_guild_discord_id(db, guild_discord_id).await?;
    let routed = router::route(deals, &mappings);

    let sends = routed
        .iter()
        .filter(|(_, filtered)| !filtered.is_empty())
        .map(|(mapping, filtered)| {
            deliver_to_channel(db, gateway, guild_discord_id, mapping, filtered)
        });

    for result in futures::future::join_all(sends).await {
        match result {
            Ok(()) => {}
            Err(Error::Chat(ChatError::Forbidden)) => {
                error!(
                    guild = guild_discord_id,
                    "Insufficient permissions to deliver deals, or the bot was removed"
                );
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    }

    info!(guild = guild_discord_id, "Delivery finished.");
    Ok(())
}

/// Posts one filtered deal list into one channel, recreating the channel
/// once if it turns out to have been deleted.
async fn deliver_to_channel<G: ChatGateway>(
    db: &DatabaseConnection,
    gateway: &G,
    guild_discord_id: i64,
    mapping: &ChannelMapping,
    deals: &[Deal],
) -> Result<()> {
    if deals.is_empty() {
        return Ok(());
    }

    let mut channel_id = mapping.discord_id;
    let mut recreated = false;
    loop {
        match post_batch(gateway, channel_id, deals).await {
            Ok(()) => return Ok(()),
            Err(ChatError::NotFound) if !recreated => {
                warn!(
                    channel = %mapping.name,
                    guild = guild_discord_id,
                    "Channel was deleted while the bot was working; recreating"
                );
                recreated = true;
                channel_id = gateway
                    .create_text_channel(
                        guild_discord_id,
                        &mapping.name,
                        Some(mapping.category_discord_id),
                    )
                    .await?;
                channel::update_platform_id(db, mapping.id, channel_id, &mapping.name).await?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// The message sequence for one channel: purge, header, cards, closer.
async fn post_batch<G: ChatGateway>(
    gateway: &G,
    channel_id: i64,
    deals: &[Deal],
) -> std::result::Result<(), ChatError> {
    gateway.purge_channel(channel_id).await?;
    tokio::time::sleep(PURGE_SETTLE_DELAY).await;

    let timestamp = chrono::Utc::now().format("%d-%m-%Y %H:%M:%S");
    gateway
        .send_text(channel_id, &format!("```Last updated: {timestamp} UTC```"))
        .await?;
    gateway
        .send_text(
            channel_id,
            &format!("```Here's a list of {} new deals!```", deals.len()),
        )
        .await?;
    for deal in deals {
        gateway.send_deal(channel_id, deal).await?;
    }
    gateway
        .send_text(channel_id, "```That's it for today :(```")
        .await?;
    Ok(())
}

/// Runs a user-triggered update for one guild.
///
/// Rejected with [`Error::AlreadyRunning`] while a delivery is in flight for
/// the guild and with [`Error::TooManyDeals`] above the request cap; both
/// checks happen before any network call. Returns the number of deals
/// delivered.
pub async fn manual_update<G: ChatGateway>(
    db: &DatabaseConnection,
    gateway: &G,
    registry: &Arc<TaskRegistry>,
    client: &DealsClient,
    guild_discord_id: i64,
    store: StoreSelector,
    amount: usize,
) -> Result<usize> {
    if registry.is_running(guild_discord_id, DELIVERY_TASK) {
        return Err(Error::AlreadyRunning);
    }
    if amount > MAX_DEALS_PER_UPDATE {
        return Err(Error::TooManyDeals {
            amount,
            max: MAX_DEALS_PER_UPDATE,
        });
    }

    let query = DealQuery {
        store,
        amount,
        ..DealQuery::default()
    };
    let deals = client.fetch(&query).await?;
    deliver_to_guild(db, gateway, registry, guild_discord_id, &deals).await?;
    Ok(deals.len())
}
