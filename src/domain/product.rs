use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Physical condition of a listed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    LikeNew,
    Used,
}

/// Whether a product can still be bought.
///
/// The transition `Available -> Sold` is one-way; nothing ever flips a
/// product back to `Available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Sold,
}

/// A single unique unit offered by one seller.
///
/// Products are edited only by their seller; the availability flag is
/// flipped only by the sales service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub seller_id: String,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    /// Price in the smallest currency unit (cents).
    pub price_cents: u64,
    pub condition: Condition,
    pub availability: Availability,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn is_available(&self) -> bool {
        self.availability == Availability::Available
    }
}

/// Parameters for creating a new listing.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub seller_id: String,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub price_cents: u64,
    pub condition: Condition,
}

/// Seller edit of an existing listing. `seller_id` identifies the
/// caller and must match the listing's seller.
#[derive(Debug, Clone)]
pub struct ProductPatch {
    pub seller_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<u64>,
    pub condition: Option<Condition>,
}

/// Browse/search filter.
///
/// Without a `seller_id` this is the public browse view and only
/// available products match. With one it is the seller's own listing
/// page, which includes sold items.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on title or description.
    pub query: Option<String>,
    pub category: Option<String>,
    pub seller_id: Option<String>,
}
