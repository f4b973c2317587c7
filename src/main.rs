use bargain_buddy::config::{self, AppSettings};
use bargain_buddy::errors::{Error, Result};
use dotenvy::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load application settings (deals API + channel presets)
    let settings = AppSettings::load()
        .inspect_err(|e| error!("Failed to load application settings: {}", e))?;
    info!("Successfully processed application configuration.");

    // 4. Initialize database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables ensured."))
        .inspect_err(|e| error!("Failed to create database tables: {}", e))?;

    // 5. Run the bot
    // DISCORD_BOT_TOKEN is loaded here, directly before use, not stored in settings
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bargain_buddy::bot::run_bot(token, db, settings).await?;

    Ok(())
}
