//! Shared test utilities for `BargainBuddy`.
//!
//! This module provides common helper functions for setting up test
//! databases, creating test entities with sensible defaults, and a
//! recording [`MockGateway`] that stands in for Discord in delivery tests.

use crate::core::gateway::{ChatError, ChatGateway, ChatResult};
use crate::deals::{Deal, Store};
use crate::entities::{channel, guild};
use crate::errors::Result;
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, Set, prelude::*};
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test guild with sensible defaults (auto on, delivery at 12).
pub async fn create_test_guild(db: &DatabaseConnection, discord_id: i64) -> Result<guild::Model> {
    crate::core::guild::create(db, discord_id, "Test Guild").await
}

/// Creates a test channel mapping for the given guild.
pub async fn create_test_channel(
    db: &DatabaseConnection,
    guild: &guild::Model,
    discord_id: i64,
    name: &str,
    store: &str,
    min_retail_price: f64,
    max_retail_price: f64,
) -> Result<channel::Model> {
    let model = channel::ActiveModel {
        discord_id: Set(discord_id),
        guild_id: Set(guild.id),
        category_discord_id: Set(discord_id + 10_000),
        name: Set(name.to_string()),
        min_retail_price: Set(min_retail_price),
        max_retail_price: Set(max_retail_price),
        store: Set(store.to_string()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Builds an unsaved channel mapping model for pure-logic tests (router).
#[must_use]
pub fn test_channel_model(
    name: &str,
    store: &str,
    min_retail_price: f64,
    max_retail_price: f64,
) -> channel::Model {
    channel::Model {
        id: 1,
        discord_id: 100,
        guild_id: 1,
        category_discord_id: 10,
        name: name.to_string(),
        min_retail_price,
        max_retail_price,
        store: store.to_string(),
    }
}

/// Builds a deal with sensible defaults; only what tests usually vary is
/// parameterized.
#[must_use]
pub fn test_deal(title: &str, store: Store, normal_price: f64) -> Deal {
    Deal {
        title: title.to_string(),
        store,
        sale_price: normal_price / 2.0,
        normal_price,
        saved_percentage: 50,
        metacritic_score: 80,
        steam_reviews_percent: 90,
        steam_reviews_count: 1000,
        steam_app_id: Some("440".to_string()),
        thumbnail_url: "https://cdn.example/t.jpg".to_string(),
    }
}

/// One recorded gateway call.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    /// Channel purge
    Purge(i64),
    /// Plain text message (channel, content)
    Text(i64, String),
    /// Deal card (channel, deal title)
    Deal(i64, String),
}

/// Recording stand-in for the Discord gateway.
///
/// Channels can be marked missing (every operation on them fails with
/// `NotFound`) or forbidden (`Forbidden`). Created channels get fresh ids
/// starting at 9000.
#[derive(Debug, Default)]
pub struct MockGateway {
    calls: Mutex<Vec<MockCall>>,
    /// (guild, name, category, assigned id)
    created: Mutex<Vec<(i64, String, Option<i64>, i64)>>,
    categories: Mutex<Vec<(i64, String, i64)>>,
    restricted: Mutex<Vec<i64>>,
    missing: Mutex<HashSet<i64>>,
    forbidden: Mutex<HashSet<i64>>,
    mark_next_created_missing: Mutex<bool>,
    next_id: AtomicI64,
}

impl MockGateway {
    /// Creates an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(9000),
            ..Self::default()
        }
    }

    /// Marks a channel as deleted on the platform side.
    pub fn mark_missing(&self, channel_id: i64) {
        self.lock(&self.missing).insert(channel_id);
    }

    /// Makes the next created channel immediately missing as well.
    pub fn mark_next_created_missing(&self) {
        *self.lock(&self.mark_next_created_missing) = true;
    }

    /// Marks a channel as inaccessible to the bot.
    pub fn mark_forbidden(&self, channel_id: i64) {
        self.lock(&self.forbidden).insert(channel_id);
    }

    /// All recorded calls, in order.
    #[must_use]
    pub fn all_calls(&self) -> Vec<MockCall> {
        self.lock(&self.calls).clone()
    }

    /// Recorded calls touching one channel, in order.
    #[must_use]
    pub fn calls_for_channel(&self, channel_id: i64) -> Vec<MockCall> {
        self.all_calls()
            .into_iter()
            .filter(|call| match call {
                MockCall::Purge(id) | MockCall::Text(id, _) | MockCall::Deal(id, _) => {
                    *id == channel_id
                }
            })
            .collect()
    }

    /// Channels created through the gateway: (guild, name, category, id).
    #[must_use]
    pub fn created_channels(&self) -> Vec<(i64, String, Option<i64>, i64)> {
        self.lock(&self.created).clone()
    }

    /// Names of categories created through the gateway.
    #[must_use]
    pub fn created_categories(&self) -> Vec<String> {
        self.lock(&self.categories)
            .iter()
            .map(|(_, name, _)| name.clone())
            .collect()
    }

    /// Ids of categories whose posting was restricted.
    #[must_use]
    pub fn restricted_categories(&self) -> Vec<i64> {
        self.lock(&self.restricted).clone()
    }

    fn check(&self, channel_id: i64) -> ChatResult<()> {
        if self.lock(&self.missing).contains(&channel_id) {
            return Err(ChatError::NotFound);
        }
        if self.lock(&self.forbidden).contains(&channel_id) {
            return Err(ChatError::Forbidden);
        }
        Ok(())
    }

    fn lock<'a, T>(&self, mutex: &'a Mutex<T>) -> std::sync::MutexGuard<'a, T> {
        mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl ChatGateway for MockGateway {
    async fn purge_channel(&self, channel_id: i64) -> ChatResult<()> {
        self.check(channel_id)?;
        self.lock(&self.calls).push(MockCall::Purge(channel_id));
        Ok(())
    }

    async fn send_text(&self, channel_id: i64, text: &str) -> ChatResult<()> {
        self.check(channel_id)?;
        self.lock(&self.calls)
            .push(MockCall::Text(channel_id, text.to_string()));
        Ok(())
    }

    async fn send_deal(&self, channel_id: i64, deal: &Deal) -> ChatResult<()> {
        self.check(channel_id)?;
        self.lock(&self.calls)
            .push(MockCall::Deal(channel_id, deal.title.clone()));
        Ok(())
    }

    async fn create_text_channel(
        &self,
        guild_id: i64,
        name: &str,
        category_id: Option<i64>,
    ) -> ChatResult<i64> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        if std::mem::take(&mut *self.lock(&self.mark_next_created_missing)) {
            self.lock(&self.missing).insert(id);
        }
        self.lock(&self.created)
            .push((guild_id, name.to_string(), category_id, id));
        Ok(id)
    }

    async fn create_category(&self, guild_id: i64, name: &str) -> ChatResult<i64> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.lock(&self.categories)
            .push((guild_id, name.to_string(), id));
        Ok(id)
    }

    async fn restrict_category_posting(
        &self,
        _guild_id: i64,
        category_id: i64,
    ) -> ChatResult<()> {
        self.lock(&self.restricted).push(category_id);
        Ok(())
    }
}
