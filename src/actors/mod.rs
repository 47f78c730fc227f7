//! Bespoke actors: the cart service and the sales service. Both follow
//! the same shape as the generic resource actor - a tokio task owning
//! its state, one request at a time off an mpsc mailbox.

mod cart_service;
mod error;
mod sales_service;

pub use cart_service::*;
pub use error::*;
pub use sales_service::*;
