//! Paginated HTTP client over the CheapShark deals endpoint.
//!
//! The upstream API caps responses at 60 records per page, so larger
//! requests are satisfied by walking `pageNumber` sequentially until enough
//! records are collected or the data runs out. Transport errors are not
//! retried here; they propagate to the caller, which decides whether the
//! whole run is skipped (scheduler) or surfaced to the user (commands).

use crate::deals::model::{Deal, RawDeal};
use crate::deals::store::StoreSelector;
use crate::errors::{Error, Result};
use tracing::{debug, instrument, warn};

/// Maximum number of records the upstream API returns per page.
pub const PAGE_SIZE: usize = 60;

/// Upper bound of the random page index used by [`DealsClient::fetch_random`].
const RANDOM_PAGE_SPAN: usize = 1000;

/// How many empty random pages are tolerated before giving up.
const RANDOM_MAX_ATTEMPTS: usize = 5;

/// Query parameters for a deals fetch.
#[derive(Debug, Clone)]
pub struct DealQuery {
    /// Store filter
    pub store: StoreSelector,
    /// How many deals to return at most
    pub amount: usize,
    /// Upstream sort key (e.g. "Metacritic", "Savings", "Recent")
    pub sort_by: String,
    /// Only deals with a sale price of at least this many USD
    pub min_price: Option<u32>,
    /// Only deals with a sale price of at most this many USD
    pub max_price: u32,
    /// Only deals at or above this Steam rating percentage
    pub min_steam_rating: Option<u32>,
    /// Restrict to AAA titles (normal price above the upstream threshold)
    pub aaa: bool,
}

impl Default for DealQuery {
    fn default() -> Self {
        Self {
            store: StoreSelector::All,
            amount: PAGE_SIZE,
            sort_by: "Metacritic".to_string(),
            min_price: None,
            max_price: 60,
            min_steam_rating: None,
            aaa: false,
        }
    }
}

/// HTTP client for the deals endpoint.
#[derive(Debug, Clone)]
pub struct DealsClient {
    http: reqwest::Client,
    base_url: String,
}

impl DealsClient {
    /// Creates a client against the given endpoint URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetches up to `query.amount` deals, walking pages as needed.
    ///
    /// An amount of 0 short-circuits to an empty list without touching the
    /// network. An empty first page fails with [`Error::NoDealsFound`]; an
    /// empty or short later page just ends pagination.
    #[instrument(skip(self))]
    pub async fn fetch(&self, query: &DealQuery) -> Result<Vec<Deal>> {
        if query.amount == 0 {
            return Ok(Vec::new());
        }

        let pages = query.amount.div_ceil(PAGE_SIZE);
        let mut deals = Vec::with_capacity(query.amount);

        for page in 0..pages {
            let records = self.fetch_page(query, page).await?;
            if records.is_empty() {
                if page == 0 {
                    return Err(Error::NoDealsFound);
                }
                break;
            }

            let page_len = records.len();
            for record in records {
                if deals.len() == query.amount {
                    break;
                }
                match Deal::from_raw(record) {
                    Some(deal) => deals.push(deal),
                    None => warn!("Skipping deal record with unknown store id"),
                }
            }

            // A short page means the upstream ran out of data.
            if deals.len() >= query.amount || page_len < PAGE_SIZE {
                break;
            }
        }

        debug!("Fetched {} deals over {} page(s).", deals.len(), pages);
        Ok(deals)
    }

    /// Fetches a single random deal from the combined-store endpoint, with
    /// the default number of attempts.
    pub async fn fetch_random(&self, min_price: Option<u32>) -> Result<Deal> {
        self.fetch_random_with_attempts(min_price, RANDOM_MAX_ATTEMPTS)
            .await
    }

    /// Fetches a single random deal from the combined-store endpoint.
    ///
    /// Picks a random page of size 1; an empty page (the index landed past
    /// the end of the data) is retried with a fresh index, up to
    /// `max_attempts` in total, then fails with [`Error::NoDealsFound`].
    #[instrument(skip(self))]
    pub async fn fetch_random_with_attempts(
        &self,
        min_price: Option<u32>,
        max_attempts: usize,
    ) -> Result<Deal> {
        for attempt in 1..=max_attempts {
            let page = {
                use rand::Rng;
                rand::thread_rng().gen_range(0..=RANDOM_PAGE_SPAN)
            };
            let query = DealQuery {
                amount: 1,
                min_price,
                ..DealQuery::default()
            };
            let records = self.fetch_single_page(&query, page).await?;
            if let Some(deal) = records.into_iter().find_map(Deal::from_raw) {
                return Ok(deal);
            }
            debug!("Random page {} was empty (attempt {}).", page, attempt);
        }
        Err(Error::NoDealsFound)
    }

    async fn fetch_page(&self, query: &DealQuery, page: usize) -> Result<Vec<RawDeal>> {
        self.request(query, PAGE_SIZE, page).await
    }

    async fn fetch_single_page(&self, query: &DealQuery, page: usize) -> Result<Vec<RawDeal>> {
        self.request(query, 1, page).await
    }

    async fn request(
        &self,
        query: &DealQuery,
        page_size: usize,
        page: usize,
    ) -> Result<Vec<RawDeal>> {
        let mut params: Vec<(&str, String)> = vec![
            ("storeID", query.store.store_ids().to_string()),
            ("sortBy", query.sort_by.clone()),
            ("upperPrice", query.max_price.to_string()),
            ("onSale", "1".to_string()),
            ("pageSize", page_size.to_string()),
            ("pageNumber", page.to_string()),
        ];
        if let Some(min_price) = query.min_price {
            params.push(("lowerPrice", min_price.to_string()));
        }
        if let Some(rating) = query.min_steam_rating {
            params.push(("steamRating", rating.to_string()));
        }
        if query.aaa {
            params.push(("AAA", "1".to_string()));
        }

        let response = self
            .http
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        response.json::<Vec<RawDeal>>().await.map_err(Into::into)
    }
}
