use tracing::{debug, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::catalog::{CatalogError, ProductAction, ProductActionResult, SaleDecision};
use crate::domain::{Product, ProductCreate, ProductFilter, ProductPatch, RejectReason};

/// Handle for the catalog actor.
///
/// Wraps the generic resource client with domain-shaped methods and
/// flattens framework failures into [`CatalogError`].
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<Product>,
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    fn flatten(err: FrameworkError<CatalogError>) -> CatalogError {
        match err {
            FrameworkError::NotFound(id) => CatalogError::NotFound(id),
            FrameworkError::Entity(e) => e,
            other => CatalogError::ActorCommunication(other.to_string()),
        }
    }

    #[instrument(skip(self, draft), fields(seller_id = %draft.seller_id))]
    pub async fn create_listing(&self, draft: ProductCreate) -> Result<String, CatalogError> {
        debug!("Sending request");
        self.inner.create(draft).await.map_err(Self::flatten)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: String) -> Result<Option<Product>, CatalogError> {
        debug!("Sending request");
        self.inner.get(id).await.map_err(Self::flatten)
    }

    #[instrument(skip(self, patch), fields(caller = %patch.seller_id))]
    pub async fn edit_listing(&self, id: String, patch: ProductPatch) -> Result<Product, CatalogError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(Self::flatten)
    }

    #[instrument(skip(self))]
    pub async fn delete_listing(&self, id: String, seller_id: String) -> Result<(), CatalogError> {
        debug!("Sending request");
        self.inner.delete(id, seller_id).await.map_err(Self::flatten)
    }

    /// Available products matching the filter, newest first.
    #[instrument(skip(self))]
    pub async fn list_available(&self, filter: ProductFilter) -> Result<Vec<Product>, CatalogError> {
        debug!("Sending request");
        let mut products = self.inner.query(filter).await.map_err(Self::flatten)?;
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    /// One seller's listings, sold included, newest first.
    #[instrument(skip(self))]
    pub async fn list_by_seller(&self, seller_id: String) -> Result<Vec<Product>, CatalogError> {
        debug!("Sending request");
        let filter = ProductFilter {
            seller_id: Some(seller_id),
            ..ProductFilter::default()
        };
        let mut products = self.inner.query(filter).await.map_err(Self::flatten)?;
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    /// Attempt the one-way `available -> sold` transition.
    ///
    /// Used only by the sales service. A missing product is folded
    /// into the refusal taxonomy rather than surfaced as an error.
    #[instrument(skip(self))]
    pub async fn mark_sold(&self, id: String, buyer_id: String) -> Result<SaleDecision, CatalogError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::MarkSold { buyer_id }).await {
            Ok(ProductActionResult::MarkSold(decision)) => Ok(decision),
            Err(FrameworkError::NotFound(_)) => Ok(SaleDecision::Refused(RejectReason::NotFound)),
            Err(other) => Err(Self::flatten(other)),
        }
    }
}
