//! # Mock Framework
//!
//! Utilities for testing orchestration logic in isolation.
//!
//! Instead of spinning up real actors, tests get a client whose
//! mailbox they control: they inspect each request arriving on the
//! receiver and script the response, which makes success, refusal,
//! and failure paths deterministic.

use tokio::sync::mpsc;

use crate::actors::{CartError, SalesError};
use crate::clients::{CartClient, SalesClient};
use crate::domain::{CartView, SaleOutcome};
use crate::messages::{CartRequest, SaleRequest, ServiceResponse};

/// A cart client wired to a channel the test controls.
pub fn create_mock_cart_client(buffer_size: usize) -> (CartClient, mpsc::Receiver<CartRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CartClient::new(sender), receiver)
}

/// A sales client wired to a channel the test controls.
pub fn create_mock_sales_client(buffer_size: usize) -> (SalesClient, mpsc::Receiver<SaleRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (SalesClient::new(sender), receiver)
}

/// Assert the next cart request is a Snapshot; hand back its responder.
pub async fn expect_snapshot(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(String, ServiceResponse<CartView, CartError>)> {
    match receiver.recv().await {
        Some(CartRequest::Snapshot { buyer_id, respond_to }) => Some((buyer_id, respond_to)),
        _ => None,
    }
}

/// Assert the next cart request is a Clear; hand back its responder.
pub async fn expect_clear(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(String, ServiceResponse<(), CartError>)> {
    match receiver.recv().await {
        Some(CartRequest::Clear { buyer_id, respond_to }) => Some((buyer_id, respond_to)),
        _ => None,
    }
}

/// Assert the next sales request is a ReserveAndSell; hand back its
/// responder.
pub async fn expect_reserve(
    receiver: &mut mpsc::Receiver<SaleRequest>,
) -> Option<(String, String, ServiceResponse<SaleOutcome, SalesError>)> {
    match receiver.recv().await {
        Some(SaleRequest::ReserveAndSell { product_id, buyer_id, respond_to }) => {
            Some((product_id, buyer_id, respond_to))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_client_scripts_a_response() {
        let (client, mut receiver) = create_mock_cart_client(10);

        let task = tokio::spawn(async move { client.snapshot("buyer_1".to_string()).await });

        let (buyer, responder) = expect_snapshot(&mut receiver).await.expect("expected Snapshot");
        assert_eq!(buyer, "buyer_1");
        responder.send(Ok(CartView::default())).unwrap();

        let view = task.await.unwrap().unwrap();
        assert!(view.is_empty());
    }
}
