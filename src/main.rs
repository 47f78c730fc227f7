mod actor_framework;
mod actors;
mod app_system;
mod catalog;
mod checkout;
mod clients;
mod domain;
mod messages;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;

use tracing::{info, Instrument};

use crate::app_system::{setup_tracing, MarketSystem};
use crate::domain::{Condition, ProductCreate, ProductFilter};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting marketplace demo");

    let system = MarketSystem::new();

    // Two sellers put up listings.
    let bike = system
        .catalog_client
        .create_listing(ProductCreate {
            seller_id: "ana".to_string(),
            title: "Road bike".to_string(),
            description: "Aluminium frame, recently serviced".to_string(),
            category: Some("sports".to_string()),
            price_cents: 42_000,
            condition: Condition::Used,
        })
        .await
        .map_err(|e| e.to_string())?;

    let lamp = system
        .catalog_client
        .create_listing(ProductCreate {
            seller_id: "ana".to_string(),
            title: "Desk lamp".to_string(),
            description: "Warm light, USB charger".to_string(),
            category: Some("home".to_string()),
            price_cents: 3_500,
            condition: Condition::LikeNew,
        })
        .await
        .map_err(|e| e.to_string())?;

    let camera = system
        .catalog_client
        .create_listing(ProductCreate {
            seller_id: "ben".to_string(),
            title: "Film camera".to_string(),
            description: "35mm, tested with one roll".to_string(),
            category: Some("photo".to_string()),
            price_cents: 18_000,
            condition: Condition::Used,
        })
        .await
        .map_err(|e| e.to_string())?;

    let available = system
        .catalog_client
        .list_available(ProductFilter::default())
        .await
        .map_err(|e| e.to_string())?;
    info!(count = available.len(), "Listings available");

    // A buyer fills their cart.
    let span = tracing::info_span!("cart_session", buyer = "carla");
    async {
        system.cart_client.add("carla".to_string(), bike.clone()).await?;
        system.cart_client.add("carla".to_string(), lamp.clone()).await?;
        system.cart_client.add("carla".to_string(), camera.clone()).await?;
        let view = system.cart_client.snapshot("carla".to_string()).await?;
        info!(lines = view.lines.len(), total_cents = view.total_cents, "Cart ready");
        Ok::<(), crate::actors::CartError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    // Another buyer grabs the camera first.
    system
        .sales_client
        .reserve_and_sell(camera.clone(), "dmitri".to_string())
        .await
        .map_err(|e| e.to_string())?;

    // Checkout is best-effort: the camera is reported as skipped, the
    // rest goes through.
    let report = system
        .checkout
        .checkout("carla".to_string())
        .await
        .map_err(|e| e.to_string())?;

    println!(
        "{}",
        serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?
    );

    let orders = system
        .sales_client
        .list_orders("carla".to_string())
        .await
        .map_err(|e| e.to_string())?;
    info!(orders = orders.len(), "Orders on file for carla");

    system.shutdown().await?;

    info!("Demo completed");
    Ok(())
}
