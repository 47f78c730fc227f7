use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::actors::{CartService, SalesService};
use crate::checkout::CheckoutEngine;
use crate::clients::{CartClient, CatalogClient, SalesClient};
use crate::domain::Product;

const MAILBOX_SIZE: usize = 32;

/// The whole marketplace core: catalog, carts, sales, checkout.
///
/// Responsible for starting the actors, wiring them together, and
/// shutting down cleanly.
pub struct MarketSystem {
    pub catalog_client: CatalogClient,
    pub cart_client: CartClient,
    pub sales_client: SalesClient,
    pub checkout: CheckoutEngine,
    catalog_handle: tokio::task::JoinHandle<()>,
    cart_handle: tokio::task::JoinHandle<()>,
    sales_handle: tokio::task::JoinHandle<()>,
}

impl MarketSystem {
    pub fn new() -> Self {
        // 1. Catalog: the generic resource actor over products.
        let product_counter = Arc::new(AtomicU64::new(1));
        let next_product_id = move || {
            let id = product_counter.fetch_add(1, Ordering::SeqCst);
            format!("product_{}", id)
        };
        let (catalog_actor, catalog_resource_client) =
            ResourceActor::<Product>::new(MAILBOX_SIZE, next_product_id);
        let catalog_client = CatalogClient::new(catalog_resource_client);
        let catalog_handle = tokio::spawn(catalog_actor.run());

        // 2. Carts, resolving against the catalog at read time.
        let (cart_service, cart_client) = CartService::new(MAILBOX_SIZE, catalog_client.clone());
        let cart_handle = tokio::spawn(cart_service.run());

        // 3. Sales: the one mailbox every sold transition goes through.
        let (sales_service, sales_client) = SalesService::new(MAILBOX_SIZE, catalog_client.clone());
        let sales_handle = tokio::spawn(sales_service.run());

        let checkout = CheckoutEngine::new(cart_client.clone(), sales_client.clone());

        Self {
            catalog_client,
            cart_client,
            sales_client,
            checkout,
            catalog_handle,
            cart_handle,
            sales_handle,
        }
    }

    /// Graceful shutdown: dropping the clients closes the mailboxes,
    /// and each actor exits once its queue drains. The cart and sales
    /// actors hold catalog clients of their own, so the catalog stops
    /// last.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.checkout);
        drop(self.cart_client);
        drop(self.sales_client);
        drop(self.catalog_client);

        for (name, handle) in [
            ("cart", self.cart_handle),
            ("sales", self.sales_handle),
            ("catalog", self.catalog_handle),
        ] {
            if let Err(e) = handle.await {
                error!(actor = name, "Actor task failed: {:?}", e);
                return Err(format!("{} actor task failed: {:?}", name, e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for MarketSystem {
    fn default() -> Self {
        Self::new()
    }
}
