//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database operations
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    ///
    /// This is a simple health check command that doesn't require any database operations.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**BargainBuddy Help**\n\
        Here is a summary of all available commands for BargainBuddy.\n\n\
        **Deal Commands**\n\
        • `/update [store] [amount]` - Refreshes this guild's deal channels (admin).\n\
        • `/random [min_price]` - Posts one random deal in the current channel.\n\
        • `/flip [min_price] [max_price]` - Posts an interactive flipbook of deals.\n\n\
        **Schedule Commands** (admin)\n\
        • `/auto enable` - Enables the daily automatic update.\n\
        • `/auto disable` - Disables the daily automatic update.\n\
        • `/auto time [hour]` - Shows or sets the update hour (0-23, UTC).\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
