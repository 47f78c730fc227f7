use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::error::SalesError;
use crate::catalog::SaleDecision;
use crate::clients::{CatalogClient, SalesClient};
use crate::domain::{Order, RejectReason, SaleOutcome};
use crate::messages::{SaleRequest, ServiceResponse};

/// Sole authority for turning an available product into an order.
///
/// Every sale flows through this one mailbox: the catalog flips the
/// availability flag (a one-shot transition serialized inside the
/// catalog actor), and the matching order record is appended here in
/// the same message turn. Orders are only readable through this
/// mailbox, so a committed sale and its order become visible together.
pub struct SalesService {
    receiver: mpsc::Receiver<SaleRequest>,
    catalog: CatalogClient,
    orders: HashMap<String, Order>,
    /// product id -> order id. One entry per product, ever.
    by_product: HashMap<String, String>,
    next_order_no: u64,
}

impl SalesService {
    pub fn new(buffer_size: usize, catalog: CatalogClient) -> (Self, SalesClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            catalog,
            orders: HashMap::new(),
            by_product: HashMap::new(),
            next_order_no: 1,
        };
        (service, SalesClient::new(sender))
    }

    #[instrument(name = "sales_service", skip(self))]
    pub async fn run(mut self) {
        info!("SalesService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SaleRequest::ReserveAndSell { product_id, buyer_id, respond_to } => {
                    self.handle_reserve_and_sell(product_id, buyer_id, respond_to).await;
                }
                SaleRequest::ListOrders { buyer_id, respond_to } => {
                    self.handle_list_orders(buyer_id, respond_to);
                }
            }
        }
        info!("SalesService stopped");
    }

    #[instrument(fields(product_id = %product_id, buyer_id = %buyer_id), skip_all)]
    async fn handle_reserve_and_sell(
        &mut self,
        product_id: String,
        buyer_id: String,
        respond_to: ServiceResponse<SaleOutcome, SalesError>,
    ) {
        debug!("Processing reserve_and_sell request");

        // A product with an order on file can never sell again, no
        // matter what the catalog says.
        if self.by_product.contains_key(&product_id) {
            debug!("Order already on file");
            let _ = respond_to.send(Ok(SaleOutcome::Refused(RejectReason::AlreadySold)));
            return;
        }

        let decision = match self.catalog.mark_sold(product_id.clone(), buyer_id.clone()).await {
            Ok(decision) => decision,
            Err(e) => {
                warn!(error = %e, "Catalog unreachable during sale");
                let _ = respond_to.send(Err(SalesError::ActorCommunication(e.to_string())));
                return;
            }
        };

        match decision {
            SaleDecision::Sold(product) => {
                let order = Order {
                    id: format!("order_{}", self.next_order_no),
                    buyer_id,
                    product_id: product.id,
                    ordered_at: Utc::now(),
                };
                self.next_order_no += 1;
                self.by_product.insert(order.product_id.clone(), order.id.clone());
                self.orders.insert(order.id.clone(), order.clone());
                info!(order_id = %order.id, "Sale committed");
                let _ = respond_to.send(Ok(SaleOutcome::Completed(order)));
            }
            SaleDecision::Refused(reason) => {
                info!(?reason, "Sale refused");
                let _ = respond_to.send(Ok(SaleOutcome::Refused(reason)));
            }
        }
    }

    #[instrument(fields(buyer_id = %buyer_id), skip_all)]
    fn handle_list_orders(
        &self,
        buyer_id: String,
        respond_to: ServiceResponse<Vec<Order>, SalesError>,
    ) {
        debug!("Processing list_orders request");
        let mut orders: Vec<Order> = self
            .orders
            .values()
            .filter(|order| order.buyer_id == buyer_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.ordered_at.cmp(&a.ordered_at));
        let _ = respond_to.send(Ok(orders));
    }
}
