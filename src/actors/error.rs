use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

/// Errors that can occur during sales operations. Business refusals
/// are not errors; they travel as `SaleOutcome::Refused`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SalesError {
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}
