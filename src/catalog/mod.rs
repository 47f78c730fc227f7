//! Catalog-specific domain logic: listing rules and the one-way
//! `available -> sold` transition.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
