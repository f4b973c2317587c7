//! Store / price-band deal routing.
//!
//! Maps a fetched deal batch onto a guild's configured channels. Every
//! mapping gets an entry in the result, even when its filter matches
//! nothing, so the caller can decide per channel whether to deliver or
//! skip.

use crate::deals::Deal;
use crate::entities::channel;

/// Filters `deals` per channel mapping.
///
/// A deal lands in a channel when its store matches the mapping's store slug
/// and its normal price falls inside the band: the minimum is exclusive, the
/// maximum inclusive (`min < price <= max`). Input order is preserved.
#[must_use]
pub fn route<'a>(
    deals: &[Deal],
    mappings: &'a [channel::Model],
) -> Vec<(&'a channel::Model, Vec<Deal>)> {
    mappings
        .iter()
        .map(|mapping| {
            let filtered = deals
                .iter()
                .filter(|deal| {
                    deal.store.slug() == mapping.store
                        && mapping.min_retail_price < deal.normal_price
                        && deal.normal_price <= mapping.max_retail_price
                })
                .cloned()
                .collect();
            (mapping, filtered)
        })
        .collect()
}
