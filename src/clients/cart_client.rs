use tokio::sync::mpsc;

use super::macros::client_method;
use crate::actors::CartError;
use crate::domain::{CartEntry, CartView};
use crate::messages::CartRequest;

/// Handle for the cart actor.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }
}

client_method!(CartClient => fn add(buyer_id: String, product_id: String) -> Vec<CartEntry> as CartRequest::Add, Error = CartError);
client_method!(CartClient => fn remove(buyer_id: String, product_id: String) -> Vec<CartEntry> as CartRequest::Remove, Error = CartError);
client_method!(CartClient => fn snapshot(buyer_id: String) -> CartView as CartRequest::Snapshot, Error = CartError);
client_method!(CartClient => fn clear(buyer_id: String) -> () as CartRequest::Clear, Error = CartError);
