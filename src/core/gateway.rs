//! Chat platform seam.
//!
//! The delivery engine only needs a handful of operations from Discord:
//! purge a channel, send a text line or a deal card, and (re)create channels
//! and categories. They are grouped behind a trait so the engine can be
//! driven against a mock in tests and so every platform failure collapses to
//! the three outcomes the engine actually distinguishes: `Forbidden`,
//! `NotFound` and everything else.

use crate::deals::Deal;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Failure modes of chat platform operations.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The bot lacks permission for the operation (or was removed)
    #[error("insufficient permissions")]
    Forbidden,
    /// The target entity no longer exists
    #[error("entity not found")]
    NotFound,
    /// Any other platform failure
    #[error("{0}")]
    Other(String),
}

/// Result alias for gateway operations.
pub type ChatResult<T> = std::result::Result<T, ChatError>;

/// Operations the bot consumes from the chat platform.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Deletes all recent messages in a channel.
    async fn purge_channel(&self, channel_id: i64) -> ChatResult<()>;

    /// Sends a plain text message.
    async fn send_text(&self, channel_id: i64, text: &str) -> ChatResult<()>;

    /// Sends one deal as a rich card.
    async fn send_deal(&self, channel_id: i64, deal: &Deal) -> ChatResult<()>;

    /// Creates a text channel under the given category, returning its id.
    async fn create_text_channel(
        &self,
        guild_id: i64,
        name: &str,
        category_id: Option<i64>,
    ) -> ChatResult<i64>;

    /// Creates a channel category, returning its id.
    async fn create_category(&self, guild_id: i64, name: &str) -> ChatResult<i64>;

    /// Denies posting in a category for everyone except the bot itself.
    async fn restrict_category_posting(&self, guild_id: i64, category_id: i64) -> ChatResult<()>;
}

// Shared gateways are gateways too; the scheduler clones its gateway into
// each detached delivery task.
#[async_trait]
impl<T: ChatGateway + ?Sized> ChatGateway for Arc<T> {
    async fn purge_channel(&self, channel_id: i64) -> ChatResult<()> {
        (**self).purge_channel(channel_id).await
    }

    async fn send_text(&self, channel_id: i64, text: &str) -> ChatResult<()> {
        (**self).send_text(channel_id, text).await
    }

    async fn send_deal(&self, channel_id: i64, deal: &Deal) -> ChatResult<()> {
        (**self).send_deal(channel_id, deal).await
    }

    async fn create_text_channel(
        &self,
        guild_id: i64,
        name: &str,
        category_id: Option<i64>,
    ) -> ChatResult<i64> {
        (**self).create_text_channel(guild_id, name, category_id).await
    }

    async fn create_category(&self, guild_id: i64, name: &str) -> ChatResult<i64> {
        (**self).create_category(guild_id, name).await
    }

    async fn restrict_category_posting(&self, guild_id: i64, category_id: i64) -> ChatResult<()> {
        (**self).restrict_category_posting(guild_id, category_id).await
    }
}
