use tokio::sync::oneshot;

use crate::actors::{CartError, SalesError};
use crate::domain::{CartEntry, CartView, Order, SaleOutcome};

/// Response channel carried by every service request.
pub type ServiceResponse<T, E> = oneshot::Sender<Result<T, E>>;

// Typed message enums for the bespoke actors. Each variant carries its
// parameters and a oneshot channel for the response.

#[derive(Debug)]
pub enum CartRequest {
    /// Idempotent: adding a product already in the cart is a no-op.
    Add {
        buyer_id: String,
        product_id: String,
        respond_to: ServiceResponse<Vec<CartEntry>, CartError>,
    },
    /// Idempotent: removing an absent entry is a no-op.
    Remove {
        buyer_id: String,
        product_id: String,
        respond_to: ServiceResponse<Vec<CartEntry>, CartError>,
    },
    /// Resolve the cart against the catalog, pruning dead entries.
    Snapshot {
        buyer_id: String,
        respond_to: ServiceResponse<CartView, CartError>,
    },
    Clear {
        buyer_id: String,
        respond_to: ServiceResponse<(), CartError>,
    },
}

#[derive(Debug)]
pub enum SaleRequest {
    /// Commit one product to one buyer, or report why not.
    ReserveAndSell {
        product_id: String,
        buyer_id: String,
        respond_to: ServiceResponse<SaleOutcome, SalesError>,
    },
    ListOrders {
        buyer_id: String,
        respond_to: ServiceResponse<Vec<Order>, SalesError>,
    },
}
