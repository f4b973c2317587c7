//! Interactive deal flipbook.
//!
//! Posts one deal at a time with previous/next buttons. Navigation is
//! circular and gated to the user who requested the flipbook; everyone
//! else's presses are acknowledged and dropped. After two minutes of
//! inactivity the flipbook is deleted.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, embeds},
        deals::DealQuery,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::time::Duration;

    /// How many deals one flipbook holds at most.
    const FLIP_AMOUNT: usize = 60;

    /// Inactivity window before the flipbook is taken down.
    const FLIP_TIMEOUT: Duration = Duration::from_secs(120);

    /// Posts a flipbook of deals that only you can page through.
    #[allow(clippy::too_many_lines)] // Button wiring is verbose but linear
    #[poise::command(slash_command, prefix_command)]
    pub async fn flip(
        ctx: Context<'_>,
        #[description = "Only deals with at least this sale price (USD)"] min_price: Option<u32>,
        #[description = "Only deals up to this sale price (USD, default 60)"] max_price: Option<u32>,
    ) -> Result<()> {
        let query = DealQuery {
            amount: FLIP_AMOUNT,
            min_price,
            max_price: max_price.unwrap_or(60),
            ..DealQuery::default()
        };
        let deals = match ctx.data().deals.fetch(&query).await {
            Ok(deals) => deals,
            Err(Error::NoDealsFound) => {
                ctx.say("No deals found within the specified price range")
                    .await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let Some(first) = deals.first() else {
            ctx.say("No deals found within the specified price range")
                .await?;
            return Ok(());
        };

        let ctx_id = ctx.id();
        let prev_button_id = format!("{ctx_id}prev");
        let next_button_id = format!("{ctx_id}next");

        let reply = poise::CreateReply::default()
            .content(format!(
                "**Page 1/{}** — here's a flipbook of deals for you, {}!",
                deals.len(),
                ctx.author().name
            ))
            .embed(embeds::deal_embed(first))
            .components(vec![serenity::CreateActionRow::Buttons(vec![
                serenity::CreateButton::new(&prev_button_id).emoji('◀'),
                serenity::CreateButton::new(&next_button_id).emoji('▶'),
            ])]);
        let message = ctx.send(reply).await?;

        let mut current_page = 0usize;
        while let Some(press) = serenity::ComponentInteractionCollector::new(ctx)
            .filter(move |press| press.data.custom_id.starts_with(&ctx_id.to_string()))
            .timeout(FLIP_TIMEOUT)
            .await
        {
            // The flipbook belongs to whoever requested it
            if press.user.id != ctx.author().id {
                press
                    .create_response(
                        ctx.serenity_context(),
                        serenity::CreateInteractionResponse::Acknowledge,
                    )
                    .await?;
                continue;
            }

            if press.data.custom_id == next_button_id {
                current_page = (current_page + 1) % deals.len();
            } else if press.data.custom_id == prev_button_id {
                current_page = current_page.checked_sub(1).unwrap_or(deals.len() - 1);
            } else {
                continue;
            }

            press
                .create_response(
                    ctx.serenity_context(),
                    serenity::CreateInteractionResponse::UpdateMessage(
                        serenity::CreateInteractionResponseMessage::new()
                            .content(format!("**Page {}/{}**", current_page + 1, deals.len()))
                            .embed(embeds::deal_embed(&deals[current_page])),
                    ),
                )
                .await?;
        }

        // Timed out: take the flipbook down like the start message promised
        message.delete(ctx).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
