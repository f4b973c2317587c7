//! serenity-backed implementation of the core chat gateway.
//!
//! Collapses serenity's error surface to the three outcomes the delivery
//! engine distinguishes: `Forbidden` (HTTP 403), `NotFound` (HTTP 404) and
//! everything else.

// Discord snowflakes are positive 63-bit values; i64 <-> u64 casts at this
// boundary are lossless.
#![allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]

use crate::bot::embeds;
use crate::core::gateway::{ChatError, ChatGateway, ChatResult};
use crate::deals::Deal;
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Maximum number of messages fetched (and removed) per purge.
const PURGE_FETCH_LIMIT: u8 = 100;

/// [`ChatGateway`] over the serenity HTTP client.
#[derive(Clone)]
pub struct SerenityGateway {
    http: Arc<serenity::Http>,
    bot_user_id: serenity::UserId,
}

impl SerenityGateway {
    /// Wraps the given HTTP handle. The bot user id is needed to grant the
    /// bot itself posting rights in restricted categories.
    #[must_use]
    pub fn new(http: Arc<serenity::Http>, bot_user_id: serenity::UserId) -> Self {
        Self { http, bot_user_id }
    }
}

fn map_err(error: serenity::Error) -> ChatError {
    if let serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response)) = &error {
        match response.status_code.as_u16() {
            403 => return ChatError::Forbidden,
            404 => return ChatError::NotFound,
            _ => {}
        }
    }
    ChatError::Other(error.to_string())
}

#[async_trait]
impl ChatGateway for SerenityGateway {
    async fn purge_channel(&self, channel_id: i64) -> ChatResult<()> {
        let channel = serenity::ChannelId::new(channel_id as u64);
        let messages = channel
            .messages(
                &self.http,
                serenity::GetMessages::new().limit(PURGE_FETCH_LIMIT),
            )
            .await
            .map_err(map_err)?;
        for message in messages {
            message.delete(&self.http).await.map_err(map_err)?;
        }
        Ok(())
    }

    async fn send_text(&self, channel_id: i64, text: &str) -> ChatResult<()> {
        serenity::ChannelId::new(channel_id as u64)
            .say(&self.http, text)
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn send_deal(&self, channel_id: i64, deal: &Deal) -> ChatResult<()> {
        serenity::ChannelId::new(channel_id as u64)
            .send_message(
                &self.http,
                serenity::CreateMessage::new().embed(embeds::deal_embed(deal)),
            )
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn create_text_channel(
        &self,
        guild_id: i64,
        name: &str,
        category_id: Option<i64>,
    ) -> ChatResult<i64> {
        let mut builder = serenity::CreateChannel::new(name).kind(serenity::ChannelType::Text);
        if let Some(category) = category_id {
            builder = builder.category(serenity::ChannelId::new(category as u64));
        }
        let channel = serenity::GuildId::new(guild_id as u64)
            .create_channel(&self.http, builder)
            .await
            .map_err(map_err)?;
        Ok(channel.id.get() as i64)
    }

    async fn create_category(&self, guild_id: i64, name: &str) -> ChatResult<i64> {
        let builder = serenity::CreateChannel::new(name).kind(serenity::ChannelType::Category);
        let category = serenity::GuildId::new(guild_id as u64)
            .create_channel(&self.http, builder)
            .await
            .map_err(map_err)?;
        Ok(category.id.get() as i64)
    }

    async fn restrict_category_posting(&self, guild_id: i64, category_id: i64) -> ChatResult<()> {
        let category = serenity::ChannelId::new(category_id as u64);

        // The @everyone role id equals the guild id
        category
            .create_permission(
                &self.http,
                serenity::PermissionOverwrite {
                    allow: serenity::Permissions::empty(),
                    deny: serenity::Permissions::SEND_MESSAGES,
                    kind: serenity::PermissionOverwriteType::Role(serenity::RoleId::new(
                        guild_id as u64,
                    )),
                },
            )
            .await
            .map_err(map_err)?;

        category
            .create_permission(
                &self.http,
                serenity::PermissionOverwrite {
                    allow: serenity::Permissions::SEND_MESSAGES,
                    deny: serenity::Permissions::empty(),
                    kind: serenity::PermissionOverwriteType::Member(self.bot_user_id),
                },
            )
            .await
            .map_err(map_err)?;

        Ok(())
    }
}
