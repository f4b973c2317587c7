//! Channel entity - Represents one deal-delivery channel mapping.
//!
//! A channel mapping ties a Discord text channel to a store and a retail
//! price band. The row id is the stable identity; the Discord id and name
//! are mutable attributes that get rewritten when a deleted channel is
//! recreated mid-delivery.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Channel mapping database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "channels")]
pub struct Model {
    /// Unique identifier for the mapping row (stable identity)
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord snowflake of the text channel (updated on recreation)
    #[sea_orm(unique)]
    pub discord_id: i64,
    /// Owning guild row
    pub guild_id: i64,
    /// Discord snowflake of the category the channel lives under
    pub category_discord_id: i64,
    /// Channel name (kept in sync with the platform-side channel)
    pub name: String,
    /// Exclusive lower bound of the retail price band
    pub min_retail_price: f64,
    /// Inclusive upper bound of the retail price band
    pub max_retail_price: f64,
    /// Store slug this channel carries deals for ("steam" or "gog")
    pub store: String,
}

/// Defines relationships between Channel and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each channel belongs to exactly one guild
    #[sea_orm(
        belongs_to = "super::guild::Entity",
        from = "Column::GuildId",
        to = "super::guild::Column::Id",
        on_delete = "Cascade"
    )]
    Guild,
}

impl Related<super::guild::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guild.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
