use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::error::CartError;
use crate::clients::{CartClient, CatalogClient};
use crate::domain::{CartEntry, CartLine, CartView};
use crate::messages::{CartRequest, ServiceResponse};

/// Per-buyer carts, keyed by buyer id.
///
/// The cart is a view over the catalog, not a cache of stale prices:
/// every snapshot re-resolves each entry and prunes products that have
/// disappeared or sold since they were added. All cart mutation for
/// every buyer flows through this one mailbox, which covers the
/// double-submit case for a single buyer's concurrent requests.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    carts: HashMap<String, HashMap<String, CartEntry>>,
    catalog: CatalogClient,
}

impl CartService {
    pub fn new(buffer_size: usize, catalog: CatalogClient) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            carts: HashMap::new(),
            catalog,
        };
        (service, CartClient::new(sender))
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!("CartService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::Add { buyer_id, product_id, respond_to } => {
                    self.handle_add(buyer_id, product_id, respond_to).await;
                }
                CartRequest::Remove { buyer_id, product_id, respond_to } => {
                    self.handle_remove(buyer_id, product_id, respond_to);
                }
                CartRequest::Snapshot { buyer_id, respond_to } => {
                    self.handle_snapshot(buyer_id, respond_to).await;
                }
                CartRequest::Clear { buyer_id, respond_to } => {
                    self.handle_clear(buyer_id, respond_to);
                }
            }
        }
        info!("CartService stopped");
    }

    fn entries(&self, buyer_id: &str) -> Vec<CartEntry> {
        self.carts
            .get(buyer_id)
            .map(|cart| cart.values().cloned().collect())
            .unwrap_or_default()
    }

    #[instrument(fields(buyer_id = %buyer_id, product_id = %product_id), skip_all)]
    async fn handle_add(
        &mut self,
        buyer_id: String,
        product_id: String,
        respond_to: ServiceResponse<Vec<CartEntry>, CartError>,
    ) {
        debug!("Processing add request");
        let exists = match self.catalog.get_product(product_id.clone()).await {
            Ok(product) => product.is_some(),
            Err(e) => {
                let _ = respond_to.send(Err(CartError::ActorCommunication(e.to_string())));
                return;
            }
        };
        if !exists {
            warn!("Refusing to add unknown product");
            let _ = respond_to.send(Err(CartError::ProductNotFound(product_id)));
            return;
        }

        self.carts
            .entry(buyer_id.clone())
            .or_default()
            .entry(product_id.clone())
            .or_insert_with(|| CartEntry::new(product_id));
        info!(items = self.carts[&buyer_id].len(), "Cart entry added");
        let _ = respond_to.send(Ok(self.entries(&buyer_id)));
    }

    #[instrument(fields(buyer_id = %buyer_id, product_id = %product_id), skip_all)]
    fn handle_remove(
        &mut self,
        buyer_id: String,
        product_id: String,
        respond_to: ServiceResponse<Vec<CartEntry>, CartError>,
    ) {
        debug!("Processing remove request");
        if let Some(cart) = self.carts.get_mut(&buyer_id) {
            cart.remove(&product_id);
        }
        let _ = respond_to.send(Ok(self.entries(&buyer_id)));
    }

    /// Resolve every stored entry against the catalog. Entries whose
    /// product has been deleted or sold are dropped from the stored
    /// cart as a side effect and never appear in the view.
    #[instrument(fields(buyer_id = %buyer_id), skip_all)]
    async fn handle_snapshot(
        &mut self,
        buyer_id: String,
        respond_to: ServiceResponse<CartView, CartError>,
    ) {
        debug!("Processing snapshot request");
        let entries = self.entries(&buyer_id);
        let mut lines = Vec::with_capacity(entries.len());
        let mut total_cents = 0u64;

        for entry in entries {
            let product = match self.catalog.get_product(entry.product_id.clone()).await {
                Ok(product) => product,
                Err(e) => {
                    let _ = respond_to.send(Err(CartError::ActorCommunication(e.to_string())));
                    return;
                }
            };
            match product {
                Some(product) if product.is_available() => {
                    let subtotal_cents = product.price_cents * u64::from(entry.quantity);
                    total_cents += subtotal_cents;
                    lines.push(CartLine {
                        product,
                        quantity: entry.quantity,
                        subtotal_cents,
                    });
                }
                stale => {
                    if stale.is_some() {
                        info!(product_id = %entry.product_id, "Pruning sold product from cart");
                    } else {
                        info!(product_id = %entry.product_id, "Pruning deleted product from cart");
                    }
                    if let Some(cart) = self.carts.get_mut(&buyer_id) {
                        cart.remove(&entry.product_id);
                    }
                }
            }
        }

        let _ = respond_to.send(Ok(CartView { lines, total_cents }));
    }

    #[instrument(fields(buyer_id = %buyer_id), skip_all)]
    fn handle_clear(&mut self, buyer_id: String, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing clear request");
        self.carts.remove(&buyer_id);
        let _ = respond_to.send(Ok(()));
    }
}
