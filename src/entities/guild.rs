//! Guild entity - Represents one Discord server the bot operates in.
//!
//! Each guild row stores the per-server delivery configuration: whether the
//! scheduled update is enabled and at which UTC hour it fires.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Guild database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guilds")]
pub struct Model {
    /// Unique identifier for the guild row (stable identity)
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord snowflake of the guild
    #[sea_orm(unique)]
    pub discord_id: i64,
    /// Guild display name, as reported by Discord on join
    pub name: String,
    /// Whether scheduled deal deliveries are enabled for this guild
    pub auto: bool,
    /// UTC hour (0-23) at which the scheduled delivery runs
    pub delivery_hour: i32,
}

/// Defines relationships between Guild and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One guild has many deal channels
    #[sea_orm(has_many = "super::channel::Entity")]
    Channels,
}

impl Related<super::channel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Channels.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
