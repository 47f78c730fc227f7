use chrono::Utc;

use super::actions::{ProductAction, ProductActionResult, SaleDecision};
use super::error::CatalogError;
use crate::actor_framework::Entity;
use crate::domain::{Availability, Product, ProductCreate, ProductFilter, ProductPatch, RejectReason};

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type Patch = ProductPatch;
    /// The id of the caller; deletion is seller-only.
    type DeleteParams = String;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Filter = ProductFilter;
    type Error = CatalogError;

    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, CatalogError> {
        if params.title.trim().is_empty() {
            return Err(CatalogError::Validation("title cannot be empty".into()));
        }
        if params.price_cents == 0 {
            return Err(CatalogError::Validation("price must be positive".into()));
        }
        Ok(Self {
            id,
            seller_id: params.seller_id,
            title: params.title,
            description: params.description,
            category: params.category,
            price_cents: params.price_cents,
            condition: params.condition,
            availability: Availability::Available,
            created_at: Utc::now(),
        })
    }

    /// Apply a seller edit. Refused for anyone but the seller and for
    /// listings that have already been sold.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), CatalogError> {
        if patch.seller_id != self.seller_id {
            return Err(CatalogError::NotSeller {
                product_id: self.id.clone(),
                caller: patch.seller_id,
            });
        }
        if self.availability == Availability::Sold {
            return Err(CatalogError::ListingSold(self.id.clone()));
        }
        if let Some(title) = patch.title {
            if title.trim().is_empty() {
                return Err(CatalogError::Validation("title cannot be empty".into()));
            }
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
        if let Some(price_cents) = patch.price_cents {
            if price_cents == 0 {
                return Err(CatalogError::Validation("price must be positive".into()));
            }
            self.price_cents = price_cents;
        }
        if let Some(condition) = patch.condition {
            self.condition = condition;
        }
        Ok(())
    }

    fn on_delete(&self, caller: &String) -> Result<(), CatalogError> {
        if *caller != self.seller_id {
            return Err(CatalogError::NotSeller {
                product_id: self.id.clone(),
                caller: caller.clone(),
            });
        }
        Ok(())
    }

    /// The conditional sale transition: "set sold where not sold".
    ///
    /// Refusals leave the listing untouched. Once this returns
    /// `Sold`, no later call can ever return `Sold` for the same id.
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, CatalogError> {
        match action {
            ProductAction::MarkSold { buyer_id } => {
                if buyer_id == self.seller_id {
                    return Ok(ProductActionResult::MarkSold(SaleDecision::Refused(
                        RejectReason::SelfPurchase,
                    )));
                }
                if self.availability == Availability::Sold {
                    return Ok(ProductActionResult::MarkSold(SaleDecision::Refused(
                        RejectReason::AlreadySold,
                    )));
                }
                self.availability = Availability::Sold;
                Ok(ProductActionResult::MarkSold(SaleDecision::Sold(self.clone())))
            }
        }
    }

    /// Browse filter with optional text and category narrowing. The
    /// public view hides sold products; a seller-scoped query keeps
    /// them so sellers can see their full history.
    fn matches(&self, filter: &ProductFilter) -> bool {
        if let Some(seller_id) = &filter.seller_id {
            if self.seller_id != *seller_id {
                return false;
            }
        } else if !self.is_available() {
            return false;
        }
        if let Some(category) = &filter.category {
            if self.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(query) = &filter.query {
            let needle = query.to_lowercase();
            let in_title = self.title.to_lowercase().contains(&needle);
            let in_description = self.description.to_lowercase().contains(&needle);
            if !in_title && !in_description {
                return false;
            }
        }
        true
    }
}
