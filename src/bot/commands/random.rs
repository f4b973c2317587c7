//! Random single-deal command.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, embeds},
        errors::{Error, Result},
    };

    /// Posts one random deal in the current channel.
    #[poise::command(slash_command, prefix_command)]
    pub async fn random(
        ctx: Context<'_>,
        #[description = "Only deals with at least this sale price (USD)"] min_price: Option<u32>,
    ) -> Result<()> {
        // The random fetch may probe several pages; acknowledge first
        ctx.defer().await?;

        match ctx.data().deals.fetch_random(min_price).await {
            Ok(deal) => {
                ctx.send(
                    poise::CreateReply::default()
                        .content(format!(
                            "Here's a random deal for you, **{}**!",
                            ctx.author().name
                        ))
                        .embed(embeds::deal_embed(&deal)),
                )
                .await?;
            }
            Err(Error::NoDealsFound) => {
                ctx.say("Unable to find a random deal with the provided minimum price")
                    .await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
