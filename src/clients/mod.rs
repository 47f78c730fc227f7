mod macros;

mod cart_client;
mod catalog_client;
mod sales_client;

pub use cart_client::*;
pub use catalog_client::*;
pub use sales_client::*;
