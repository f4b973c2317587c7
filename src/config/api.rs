//! Deals API configuration from environment variables.
//!
//! This module reads the CheapShark endpoint and the scheduled batch sizes
//! from the environment, falling back to sensible defaults so the bot runs
//! with nothing but a Discord token configured.

/// Default CheapShark deals endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://www.cheapshark.com/api/1.0/deals";

/// Default number of deals fetched per store on each scheduled tick.
pub const DEFAULT_DEALS_AMOUNT: usize = 60;

/// Settings for the upstream deals API.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Base URL of the deals endpoint
    pub base_url: String,
    /// Steam batch size for scheduled deliveries
    pub steam_deals_amount: usize,
    /// GOG batch size for scheduled deliveries
    pub gog_deals_amount: usize,
}

impl ApiSettings {
    /// Reads `DEALS_API_URL`, `STEAM_DEALS_AMOUNT` and `GOG_DEALS_AMOUNT`
    /// from the environment. Unset or unparsable values fall back to the
    /// defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("DEALS_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            steam_deals_amount: env_amount("STEAM_DEALS_AMOUNT"),
            gog_deals_amount: env_amount("GOG_DEALS_AMOUNT"),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            steam_deals_amount: DEFAULT_DEALS_AMOUNT,
            gog_deals_amount: DEFAULT_DEALS_AMOUNT,
        }
    }
}

fn env_amount(var: &str) -> usize {
    std::env::var(var)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_DEALS_AMOUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ApiSettings::default();
        assert_eq!(settings.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.steam_deals_amount, 60);
        assert_eq!(settings.gog_deals_amount, 60);
    }
}
