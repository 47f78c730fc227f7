pub mod product;
pub mod cart;
pub mod order;

pub use product::*;
pub use cart::*;
pub use order::*;
