use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Caller {caller} is not the seller of product {product_id}")]
    NotSeller { product_id: String, caller: String },
    #[error("Listing is already sold: {0}")]
    ListingSold(String),
    #[error("Listing validation error: {0}")]
    Validation(String),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}
