use crate::domain::{Product, RejectReason};

/// Custom actions for product listings.
///
/// `MarkSold` is the only way the availability flag ever flips. It runs
/// inside the catalog actor's message turn, so the check and the flip
/// are atomic with respect to every concurrent caller for the same id.
#[derive(Debug, Clone)]
pub enum ProductAction {
    MarkSold { buyer_id: String },
}

/// Results from ProductActions - variants match 1:1 with ProductAction.
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    MarkSold(SaleDecision),
}

/// Outcome of one `MarkSold` attempt. A refusal is a normal value; the
/// listing is left untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum SaleDecision {
    /// The flag flipped in this call; the returned record is the
    /// post-flip product.
    Sold(Product),
    Refused(RejectReason),
}
