//! Bot layer - Discord-specific interface and command handlers.
//!
//! This module provides the Discord interface for the `BargainBuddy`
//! application: all commands, the lifecycle event handlers, the serenity
//! implementation of the chat gateway, and bot context management.

/// Discord command implementations (update, random, flip, auto, general)
pub mod commands;
/// Deal embed construction (cards, store links, discount colours)
pub mod embeds;
/// serenity-backed implementation of the core chat gateway
pub mod gateway;
/// Discord lifecycle event handlers (ready, guild join/leave)
pub mod handlers;

use crate::config::AppSettings;
use crate::core::registry::TaskRegistry;
use crate::core::scheduler;
use crate::deals::DealsClient;
use crate::errors::{Error, Result};
use gateway::SerenityGateway;
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::env;
use std::sync::Arc;
use tracing::{info, instrument};

/// Shared data available to all bot commands.
/// This structure holds the database connection and any other global state
/// that commands need to access.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Client for the upstream deals API
    pub deals: DealsClient,
    /// Per-guild running-task tracker
    pub registry: Arc<TaskRegistry>,
    /// Chat gateway used by the delivery engine
    pub gateway: SerenityGateway,
    /// Application settings (API amounts, channel presets)
    pub settings: Arc<AppSettings>,
}

/// Type alias for the poise context used by all commands.
pub(crate) type Context<'a> = poise::Context<'a, BotData, Error>;

#[allow(clippy::panic)] // A failed setup leaves nothing to run
async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            panic!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                tracing::error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds and runs the Discord client until it disconnects.
#[instrument(skip(token, db, settings))]
pub async fn run_bot(token: String, db: DatabaseConnection, settings: AppSettings) -> Result<()> {
    let settings = Arc::new(settings);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::update(),
                commands::random(),
                commands::flip(),
                commands::auto(),
                commands::ping(),
                commands::help(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: env::var("BOT_PREFIX").ok(),
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::events::handle_event(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                let registry = Arc::new(TaskRegistry::new());
                let deals = DealsClient::new(settings.api.base_url.clone());
                let bot_gateway = SerenityGateway::new(Arc::clone(&ctx.http), ready.user.id);

                // The scheduler only starts once the connection is up, and
                // its first pass fires immediately.
                tokio::spawn(scheduler::run(
                    db.clone(),
                    bot_gateway.clone(),
                    Arc::clone(&registry),
                    deals.clone(),
                    settings.api.clone(),
                ));

                Ok(BotData {
                    database: db,
                    deals,
                    registry,
                    gateway: bot_gateway,
                    settings,
                })
            })
        })
        .build();

    // Define necessary gateway intents
    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot client...");
    client.start().await?;
    Ok(())
}
