//! Recurring delivery scheduler.
//!
//! Once an hour, fetch one shared Steam batch and one shared GOG batch,
//! look up the guilds whose configured delivery hour matches the current
//! UTC hour, and hand each of them to the delivery engine as a detached
//! task. The next tick never waits for deliveries to finish; overlap with
//! manual updates is prevented by the task registry, not by the scheduler.
//!
//! A fetch failure skips the whole tick (logged): every due guild shares
//! the same batch, so there is nothing to deliver.

use crate::config::api::ApiSettings;
use crate::core::delivery;
use crate::core::gateway::ChatGateway;
use crate::core::guild;
use crate::core::registry::TaskRegistry;
use crate::deals::{DealQuery, DealsClient, StoreSelector};
use crate::errors::Result;
use chrono::{Timelike, Utc};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

/// Interval between scheduling passes.
const TICK_INTERVAL: Duration = Duration::from_secs(3600);

/// Runs the scheduler forever. Call this once the Discord connection is up;
/// the first pass fires immediately.
pub async fn run<G>(
    db: DatabaseConnection,
    gateway: G,
    registry: Arc<TaskRegistry>,
    client: DealsClient,
    settings: ApiSettings,
) where
    G: ChatGateway + Clone + 'static,
{
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    loop {
        ticker.tick().await;
        let hour = Utc::now().hour();
        match tick_at(&db, &gateway, &registry, &client, &settings, hour).await {
            // Deliveries run detached; dropping the handles lets them finish
            // on their own while the scheduler goes back to sleep.
            Ok(handles) => debug!(hour, deliveries = handles.len(), "Scheduling pass done."),
            Err(e) => error!(hour, error = %e, "Scheduled deals update failed: {}", e),
        }
    }
}

/// One scheduling pass for the given UTC hour.
///
/// Returns the join handles of the spawned per-guild deliveries, mostly so
/// tests can await them; the production loop drops them.
#[instrument(skip(db, gateway, registry, client, settings))]
pub async fn tick_at<G>(
    db: &DatabaseConnection,
    gateway: &G,
    registry: &Arc<TaskRegistry>,
    client: &DealsClient,
    settings: &ApiSettings,
    hour: u32,
) -> Result<Vec<JoinHandle<()>>>
where
    G: ChatGateway + Clone + 'static,
{
    let due = guild::get_all_due(db, hour).await?;
    if due.is_empty() {
        return Ok(Vec::new());
    }

    // One shared fetch per store for all due guilds this tick.
    let steam_query = DealQuery {
        store: StoreSelector::Steam,
        amount: settings.steam_deals_amount,
        ..DealQuery::default()
    };
    let gog_query = DealQuery {
        store: StoreSelector::Gog,
        amount: settings.gog_deals_amount,
        ..DealQuery::default()
    };
    let mut deals = client.fetch(&steam_query).await?;
    deals.extend(client.fetch(&gog_query).await?);

    info!(hour, guilds = due.len(), deals = deals.len(), "Dispatching scheduled deliveries.");

    let mut handles = Vec::with_capacity(due.len());
    for due_guild in due {
        let db = db.clone();
        let gateway = gateway.clone();
        let registry = Arc::clone(registry);
        let deals = deals.clone();
        handles.push(tokio::spawn(async move {
            if let Err(e) = delivery::deliver_to_guild(
                &db,
                &gateway,
                &registry,
                due_guild.discord_id,
                &deals,
            )
            .await
            {
                error!(
                    guild = due_guild.discord_id,
                    error = %e,
                    "Scheduled delivery failed: {}",
                    e
                );
            }
        }));
    }
    Ok(handles)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::guild::set_delivery_hour;
    use crate::test_utils::{MockGateway, create_test_channel, create_test_guild, setup_test_db};
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn steam_deal(title: &str, normal: &str) -> serde_json::Value {
        json!({
            "title": title,
            "storeID": "1",
            "salePrice": "4.99",
            "normalPrice": normal,
            "savings": "50.0",
            "metacriticScore": "80",
            "steamRatingPercent": "90",
            "steamRatingCount": "1000",
            "steamAppID": "440",
            "thumb": "https://cdn.example/t.jpg"
        })
    }

    async fn mock_both_stores(server: &MockServer) {
        Mock::given(method("GET"))
            .and(query_param("storeID", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([steam_deal("Portal", "9.99")])),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("storeID", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "title": "Gwent",
                "storeID": "7",
                "salePrice": "4.99",
                "normalPrice": "9.99",
                "savings": "50.0",
                "metacriticScore": "80",
                "steamRatingPercent": "90",
                "steamRatingCount": "1000",
                "steamAppID": null,
                "thumb": "https://cdn.example/g.jpg"
            }])))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_tick_delivers_to_due_guilds_only() -> Result<()> {
        let db = setup_test_db().await?;
        let registry = Arc::new(TaskRegistry::new());
        let gateway = Arc::new(MockGateway::new());
        let server = MockServer::start().await;
        mock_both_stores(&server).await;

        let due = create_test_guild(&db, 1).await?;
        create_test_channel(&db, &due, 100, "steam-deals", "steam", 0.0, 29.0).await?;
        let not_due = create_test_guild(&db, 2).await?;
        create_test_channel(&db, &not_due, 200, "steam-deals", "steam", 0.0, 29.0).await?;
        set_delivery_hour(&db, 2, 18).await?;

        let client = DealsClient::new(server.uri());
        let handles = tick_at(&db, &gateway, &registry, &client, &ApiSettings::default(), 12)
            .await?;
        assert_eq!(handles.len(), 1);
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(!gateway.calls_for_channel(100).is_empty());
        assert!(gateway.calls_for_channel(200).is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_tick_skips_disabled_guilds() -> Result<()> {
        let db = setup_test_db().await?;
        let registry = Arc::new(TaskRegistry::new());
        let gateway = Arc::new(MockGateway::new());
        let server = MockServer::start().await;
        mock_both_stores(&server).await;

        let disabled = create_test_guild(&db, 1).await?;
        create_test_channel(&db, &disabled, 100, "steam-deals", "steam", 0.0, 29.0).await?;
        crate::core::guild::set_auto(&db, 1, false).await?;

        let client = DealsClient::new(server.uri());
        let handles = tick_at(&db, &gateway, &registry, &client, &ApiSettings::default(), 12)
            .await?;
        assert!(handles.is_empty());
        assert!(gateway.all_calls().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_no_due_guilds_makes_no_fetch() -> Result<()> {
        let db = setup_test_db().await?;
        let registry = Arc::new(TaskRegistry::new());
        let gateway = Arc::new(MockGateway::new());
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let client = DealsClient::new(server.uri());
        let handles = tick_at(&db, &gateway, &registry, &client, &ApiSettings::default(), 12)
            .await?;
        assert!(handles.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_tick() -> Result<()> {
        let db = setup_test_db().await?;
        let registry = Arc::new(TaskRegistry::new());
        let gateway = Arc::new(MockGateway::new());
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let due = create_test_guild(&db, 1).await?;
        create_test_channel(&db, &due, 100, "steam-deals", "steam", 0.0, 29.0).await?;

        let client = DealsClient::new(server.uri());
        let result =
            tick_at(&db, &gateway, &registry, &client, &ApiSettings::default(), 12).await;
        assert!(result.is_err());
        assert!(gateway.all_calls().is_empty());
        Ok(())
    }
}
