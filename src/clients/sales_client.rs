use tokio::sync::mpsc;

use super::macros::client_method;
use crate::actors::SalesError;
use crate::domain::{Order, SaleOutcome};
use crate::messages::SaleRequest;

/// Handle for the sales actor.
#[derive(Clone)]
pub struct SalesClient {
    sender: mpsc::Sender<SaleRequest>,
}

impl SalesClient {
    pub fn new(sender: mpsc::Sender<SaleRequest>) -> Self {
        Self { sender }
    }
}

client_method!(SalesClient => fn reserve_and_sell(product_id: String, buyer_id: String) -> SaleOutcome as SaleRequest::ReserveAndSell, Error = SalesError);
client_method!(SalesClient => fn list_orders(buyer_id: String) -> Vec<Order> as SaleRequest::ListOrders, Error = SalesError);
