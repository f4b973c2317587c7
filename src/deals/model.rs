//! Deal model - normalizes raw CheapShark records into a typed structure.
//!
//! CheapShark returns every numeric field as a string. Parsing is defensive:
//! an absent or malformed number becomes 0 rather than failing the whole
//! batch, and records for stores the bot does not carry are dropped by the
//! caller (see [`Deal::from_raw`]).

use crate::deals::store::Store;
use serde::Deserialize;
use std::str::FromStr;

/// One raw record as returned by the deals endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDeal {
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default, rename = "storeID")]
    pub(crate) store_id: String,
    #[serde(default)]
    pub(crate) sale_price: String,
    #[serde(default)]
    pub(crate) normal_price: String,
    #[serde(default)]
    pub(crate) savings: String,
    #[serde(default)]
    pub(crate) metacritic_score: String,
    #[serde(default)]
    pub(crate) steam_rating_percent: String,
    #[serde(default)]
    pub(crate) steam_rating_count: String,
    #[serde(default, rename = "steamAppID")]
    pub(crate) steam_app_id: Option<String>,
    #[serde(default)]
    pub(crate) thumb: String,
}

/// One discounted-game listing, normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    /// Game title
    pub title: String,
    /// Store the deal is listed on
    pub store: Store,
    /// Discounted price in USD
    pub sale_price: f64,
    /// Normal (list) price in USD
    pub normal_price: f64,
    /// Discount percentage, rounded to a whole number in 0..=100
    pub saved_percentage: u8,
    /// Metacritic score (0 when unknown)
    pub metacritic_score: i32,
    /// Percentage of positive Steam reviews (0 when unknown)
    pub steam_reviews_percent: i32,
    /// Number of Steam reviews (0 when unknown)
    pub steam_reviews_count: i64,
    /// Steam app id, when the game has a Steam store page
    pub steam_app_id: Option<String>,
    /// Thumbnail image URL
    pub thumbnail_url: String,
}

impl Deal {
    /// Builds a deal from a raw record, returning `None` when the record
    /// belongs to a store the bot does not carry.
    #[must_use]
    pub fn from_raw(raw: RawDeal) -> Option<Self> {
        let store = Store::from_store_id(&raw.store_id)?;
        let savings: f64 = parse_or_zero(&raw.savings);
        Some(Self {
            title: raw.title,
            store,
            sale_price: parse_or_zero(&raw.sale_price),
            normal_price: parse_or_zero(&raw.normal_price),
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            saved_percentage: savings.round().clamp(0.0, 100.0) as u8,
            metacritic_score: parse_or_zero(&raw.metacritic_score),
            steam_reviews_percent: parse_or_zero(&raw.steam_rating_percent),
            steam_reviews_count: parse_or_zero(&raw.steam_rating_count),
            steam_app_id: raw.steam_app_id.filter(|id| !id.is_empty()),
            thumbnail_url: raw.thumb,
        })
    }

    /// Amount saved against the normal price, rounded to 2 decimals.
    ///
    /// Computed on demand rather than stored, so it can never go stale
    /// against the price fields.
    #[must_use]
    pub fn saved_amount(&self) -> f64 {
        ((self.normal_price - self.sale_price) * 100.0).round() / 100.0
    }
}

fn parse_or_zero<T: FromStr + Default>(raw: &str) -> T {
    raw.trim().parse().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn raw(store_id: &str) -> RawDeal {
        RawDeal {
            title: "Dishonored".to_string(),
            store_id: store_id.to_string(),
            sale_price: "2.99".to_string(),
            normal_price: "9.99".to_string(),
            savings: "70.070070".to_string(),
            metacritic_score: "88".to_string(),
            steam_rating_percent: "96".to_string(),
            steam_rating_count: "73488".to_string(),
            steam_app_id: Some("205100".to_string()),
            thumb: "https://cdn.example/capsule.jpg".to_string(),
        }
    }

    #[test]
    fn test_from_raw_normalizes_fields() {
        let deal = Deal::from_raw(raw("1")).unwrap();
        assert_eq!(deal.store, Store::Steam);
        assert_eq!(deal.sale_price, 2.99);
        assert_eq!(deal.normal_price, 9.99);
        assert_eq!(deal.saved_percentage, 70);
        assert_eq!(deal.metacritic_score, 88);
        assert_eq!(deal.steam_reviews_count, 73488);
        assert_eq!(deal.steam_app_id.as_deref(), Some("205100"));
    }

    #[test]
    fn test_from_raw_skips_unknown_store() {
        assert!(Deal::from_raw(raw("25")).is_none());
    }

    #[test]
    fn test_malformed_numbers_default_to_zero() {
        let mut record = raw("7");
        record.sale_price = "not-a-price".to_string();
        record.metacritic_score = String::new();
        record.steam_rating_count = "n/a".to_string();

        let deal = Deal::from_raw(record).unwrap();
        assert_eq!(deal.sale_price, 0.0);
        assert_eq!(deal.metacritic_score, 0);
        assert_eq!(deal.steam_reviews_count, 0);
    }

    #[test]
    fn test_empty_steam_app_id_becomes_none() {
        let mut record = raw("7");
        record.steam_app_id = Some(String::new());
        assert_eq!(Deal::from_raw(record).unwrap().steam_app_id, None);
    }

    #[test]
    fn test_saved_amount_rounds_to_cents() {
        let mut record = raw("1");
        record.normal_price = "3.33".to_string();
        record.sale_price = "1.111".to_string();
        let deal = Deal::from_raw(record).unwrap();
        assert_eq!(deal.saved_amount(), 2.22);

        let deal = Deal::from_raw(raw("1")).unwrap();
        assert_eq!(deal.saved_amount(), 7.0);
    }

    #[test]
    fn test_savings_clamped_to_percentage_range() {
        let mut record = raw("1");
        record.savings = "137.5".to_string();
        assert_eq!(Deal::from_raw(record).unwrap().saved_percentage, 100);
    }

    #[test]
    fn test_deserializes_cheapshark_shape() {
        let body = r#"{
            "title": "Deus Ex",
            "storeID": "7",
            "salePrice": "0.97",
            "normalPrice": "6.49",
            "savings": "85.054",
            "metacriticScore": "90",
            "steamRatingPercent": "94",
            "steamRatingCount": "10210",
            "steamAppID": "6910",
            "thumb": "https://cdn.example/deusex.jpg",
            "dealRating": "9.4"
        }"#;
        let record: RawDeal = serde_json::from_str(body).unwrap();
        let deal = Deal::from_raw(record).unwrap();
        assert_eq!(deal.store, Store::Gog);
        assert_eq!(deal.saved_percentage, 85);
    }
}
