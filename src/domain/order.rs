use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable record of a completed single-item sale.
///
/// At most one order may ever exist for a given product id; the sales
/// service enforces this across concurrent checkouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub buyer_id: String,
    pub product_id: String,
    pub ordered_at: DateTime<Utc>,
}

/// Why a sale attempt was turned down. These are normal business
/// outcomes, not errors, and are reported back to the buyer as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    NotFound,
    AlreadySold,
    SelfPurchase,
}

/// Result of asking the sales service to commit one product to a buyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SaleOutcome {
    Completed(Order),
    Refused(RejectReason),
}
