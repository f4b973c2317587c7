//! Unified error types and result handling for `BargainBuddy`.

use crate::core::gateway::ChatError;
use thiserror::Error;

/// All errors the bot can produce, from configuration problems to
/// user-facing command rejections.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what was wrong with the configuration
        message: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Unknown store '{store}': expected steam, gog or all")]
    InvalidStore {
        /// The selector the caller passed
        store: String,
    },

    #[error("Maximum amount of deals is {max}, got {amount}")]
    TooManyDeals {
        /// The requested amount
        amount: usize,
        /// The allowed maximum
        max: usize,
    },

    #[error("Delivery hour must be between 0 and 23, got {hour}")]
    InvalidHour {
        /// The rejected hour value
        hour: u32,
    },

    #[error("No deals found for the provided filters")]
    NoDealsFound,

    #[error("A deals update is already running for this guild")]
    AlreadyRunning,

    #[error("Guild {discord_id} is not registered")]
    GuildNotFound {
        /// Discord ID of the missing guild
        discord_id: i64,
    },

    #[error("Chat platform error: {0}")]
    Chat(#[from] ChatError),

    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Error::Framework(Box::new(value))
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
