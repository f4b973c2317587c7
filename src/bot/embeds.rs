//! Deal embed construction.
//!
//! One deal becomes one embed: prices and savings in the description, a
//! store link (Steam app page or GOG slug URL), the thumbnail as image, and
//! a colour that scales with the discount.

use crate::deals::{Deal, Store};
use poise::serenity_prelude as serenity;

/// Builds the rich card for one deal.
#[must_use]
pub fn deal_embed(deal: &Deal) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(deal.title.as_str())
        .description(format!(
            "*Sale price:* **{:.2}$**\n\
             *Normal price:* **{:.2}$**\n\
             *You save:* **{:.2}$ ({}% off)**\n\n\
             *Steam reviews:* **{}** *({}% positive)*\n\
             *Link:* {}",
            deal.sale_price,
            deal.normal_price,
            deal.saved_amount(),
            deal.saved_percentage,
            deal.steam_reviews_count,
            deal.steam_reviews_percent,
            store_link(deal),
        ))
        .colour(discount_colour(deal.saved_percentage))
        .image(deal.thumbnail_url.as_str())
}

/// Store page URL for a deal.
fn store_link(deal: &Deal) -> String {
    match deal.store {
        Store::Steam => match &deal.steam_app_id {
            Some(app_id) => format!("https://store.steampowered.com/app/{app_id}/"),
            // Not every record carries an app id; fall back to a search
            None => format!(
                "https://store.steampowered.com/search/?term={}",
                deal.title.replace(' ', "+")
            ),
        },
        Store::Gog => format!("https://www.gog.com/game/{}", gog_slug(&deal.title)),
    }
}

/// Converts a game title to a GOG store slug.
pub(crate) fn gog_slug(title: &str) -> String {
    title
        .replace(" - ", " ")
        .replace(['\'', '.', ':'], "")
        .replace(' ', "_")
        .to_lowercase()
}

/// Embed colour by discount percentage: grey below 25, green below 50, blue
/// below 75, gold above.
pub(crate) const fn discount_colour(saved_percentage: u8) -> u32 {
    match saved_percentage {
        0..=24 => 0x0097_9C9F,
        25..=49 => 0x002E_CC71,
        50..=74 => 0x0034_98DB,
        _ => 0x00F1_C40F,
    }
}
