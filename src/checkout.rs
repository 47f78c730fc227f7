use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::actors::{CartError, SalesError};
use crate::clients::{CartClient, SalesClient};
use crate::domain::{Order, RejectReason, SaleOutcome};

/// What one checkout pass did: which cart lines became orders and
/// which were skipped, with the reason. Partial success is the normal
/// case, never an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CheckoutReport {
    pub purchased: Vec<Order>,
    pub skipped: Vec<SkippedItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedItem {
    pub product_id: String,
    pub reason: RejectReason,
}

/// Checkout fails only when a store is unreachable. Per-item commits
/// made before the failure stay committed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("cart store unavailable: {0}")]
    Cart(#[from] CartError),
    #[error("sales service unavailable: {0}")]
    Sales(#[from] SalesError),
}

/// Orchestrates one checkout pass: snapshot the cart, try to commit
/// each line, then clear the cart unconditionally.
///
/// The snapshot already excludes dead and sold entries, but a product
/// can still sell between the snapshot and the per-line commit; those
/// lines land in `skipped` like any other refusal. Re-running a
/// checkout is safe: the cleared cart yields an empty snapshot and the
/// sales service never sells a product twice.
#[derive(Clone)]
pub struct CheckoutEngine {
    cart: CartClient,
    sales: SalesClient,
}

impl CheckoutEngine {
    pub fn new(cart: CartClient, sales: SalesClient) -> Self {
        Self { cart, sales }
    }

    #[instrument(skip(self))]
    pub async fn checkout(&self, buyer_id: String) -> Result<CheckoutReport, CheckoutError> {
        info!("Starting checkout pass");
        let view = self.cart.snapshot(buyer_id.clone()).await?;

        let mut report = CheckoutReport::default();
        for line in view.lines {
            let product_id = line.product.id;
            match self
                .sales
                .reserve_and_sell(product_id.clone(), buyer_id.clone())
                .await?
            {
                SaleOutcome::Completed(order) => report.purchased.push(order),
                SaleOutcome::Refused(reason) => report.skipped.push(SkippedItem { product_id, reason }),
            }
        }

        // Best-effort batch: the cart empties even when items were
        // skipped, so the buyer is never re-offered a dead line.
        self.cart.clear(buyer_id).await?;

        info!(
            purchased = report.purchased.len(),
            skipped = report.skipped.len(),
            "Checkout pass finished"
        );
        Ok(report)
    }
}
