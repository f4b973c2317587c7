//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod channel;
pub mod guild;

// Re-export specific types to avoid conflicts
pub use channel::{Column as ChannelColumn, Entity as Channel, Model as ChannelModel};
pub use guild::{Column as GuildColumn, Entity as Guild, Model as GuildModel};
