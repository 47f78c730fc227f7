//! End-to-end scenarios over a fully wired [`MarketSystem`]: real
//! actors, real mailboxes, no mocks. These exercise the guarantees the
//! per-actor unit tests can only show in isolation, in particular that
//! a product is sold at most once no matter how many checkouts race
//! for it.

use crate::app_system::MarketSystem;
use crate::catalog::CatalogError;
use crate::domain::{
    Condition, ProductCreate, ProductFilter, ProductPatch, RejectReason, SaleOutcome,
};

fn listing(seller: &str, title: &str, price_cents: u64) -> ProductCreate {
    ProductCreate {
        seller_id: seller.to_string(),
        title: title.to_string(),
        description: format!("{} in good shape", title),
        category: None,
        price_cents,
        condition: Condition::Used,
    }
}

async fn seed(system: &MarketSystem, seller: &str, title: &str, price_cents: u64) -> String {
    system
        .catalog_client
        .create_listing(listing(seller, title, price_cents))
        .await
        .unwrap()
}

#[tokio::test]
async fn concurrent_sales_produce_exactly_one_order() {
    let system = MarketSystem::new();
    let product_id = seed(&system, "seller_1", "Turntable", 12_000).await;

    let mut tasks = Vec::new();
    for n in 0..16 {
        let sales = system.sales_client.clone();
        let product_id = product_id.clone();
        tasks.push(tokio::spawn(async move {
            sales.reserve_and_sell(product_id, format!("buyer_{}", n)).await.unwrap()
        }));
    }

    let mut completed = 0;
    let mut refused = 0;
    for task in tasks {
        match task.await.unwrap() {
            SaleOutcome::Completed(order) => {
                completed += 1;
                assert_eq!(order.product_id, product_id);
            }
            SaleOutcome::Refused(RejectReason::AlreadySold) => refused += 1,
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
    assert_eq!(completed, 1);
    assert_eq!(refused, 15);

    // The flag flipped and the listing left the browse view.
    let product = system.catalog_client.get_product(product_id).await.unwrap().unwrap();
    assert!(!product.is_available());
    assert!(system
        .catalog_client
        .list_available(ProductFilter::default())
        .await
        .unwrap()
        .is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn racing_checkouts_sell_a_shared_cart_item_once() {
    let system = MarketSystem::new();
    let product_id = seed(&system, "seller_1", "Armchair", 9_000).await;

    for buyer in ["alice", "bob"] {
        system
            .cart_client
            .add(buyer.to_string(), product_id.clone())
            .await
            .unwrap();
    }

    let a = {
        let engine = system.checkout.clone();
        tokio::spawn(async move { engine.checkout("alice".to_string()).await.unwrap() })
    };
    let b = {
        let engine = system.checkout.clone();
        tokio::spawn(async move { engine.checkout("bob".to_string()).await.unwrap() })
    };
    let (report_a, report_b) = (a.await.unwrap(), b.await.unwrap());

    let purchased = report_a.purchased.len() + report_b.purchased.len();
    assert_eq!(purchased, 1, "exactly one checkout may win the item");

    // The loser either saw the item pruned from its snapshot or got an
    // already_sold refusal; both leave its report without a purchase.
    let loser = if report_a.purchased.is_empty() { &report_a } else { &report_b };
    for skipped in &loser.skipped {
        assert_eq!(skipped.reason, RejectReason::AlreadySold);
    }

    // Both carts are empty afterwards either way.
    assert!(system.cart_client.snapshot("alice".to_string()).await.unwrap().is_empty());
    assert!(system.cart_client.snapshot("bob".to_string()).await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn checkout_commits_live_lines_and_reports_the_dead_one() {
    let system = MarketSystem::new();
    let a = seed(&system, "seller_1", "Bookshelf", 4_000).await;
    let b = seed(&system, "seller_1", "Kettle", 2_500).await;
    let c = seed(&system, "seller_2", "Monitor", 15_000).await;

    for id in [&a, &b, &c] {
        system.cart_client.add("carol".to_string(), id.clone()).await.unwrap();
    }

    // The monitor sells to someone else while carol's cart sits idle.
    let outcome = system
        .sales_client
        .reserve_and_sell(c.clone(), "dave".to_string())
        .await
        .unwrap();
    assert!(matches!(outcome, SaleOutcome::Completed(_)));

    let report = system.checkout.checkout("carol".to_string()).await.unwrap();

    let mut purchased: Vec<_> = report.purchased.iter().map(|o| o.product_id.clone()).collect();
    purchased.sort();
    assert_eq!(purchased, vec![a.clone(), b.clone()]);
    // The sold line was pruned at snapshot time, so it is not even
    // reported as skipped.
    assert!(report.skipped.is_empty());

    assert!(system.cart_client.snapshot("carol".to_string()).await.unwrap().is_empty());

    let orders = system.sales_client.list_orders("carol".to_string()).await.unwrap();
    let mut ordered: Vec<_> = orders.iter().map(|o| o.product_id.clone()).collect();
    ordered.sort();
    assert_eq!(ordered, vec![a, b]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn item_sold_between_snapshot_and_commit_is_skipped() {
    let system = MarketSystem::new();
    let product_id = seed(&system, "seller_1", "Record crate", 3_000).await;

    system.cart_client.add("erin".to_string(), product_id.clone()).await.unwrap();

    // Someone else completes the sale after erin's cart was filled but
    // without touching her stored entry; the per-line commit is where
    // her checkout finds out.
    system
        .sales_client
        .reserve_and_sell(product_id.clone(), "frank".to_string())
        .await
        .unwrap();

    // Second buy attempt through the sales path is refused, never an
    // error and never a second order.
    let again = system
        .sales_client
        .reserve_and_sell(product_id.clone(), "erin".to_string())
        .await
        .unwrap();
    assert_eq!(again, SaleOutcome::Refused(RejectReason::AlreadySold));

    let frank_orders = system.sales_client.list_orders("frank".to_string()).await.unwrap();
    assert_eq!(frank_orders.len(), 1);
    let erin_orders = system.sales_client.list_orders("erin".to_string()).await.unwrap();
    assert!(erin_orders.is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn double_submitted_checkout_yields_a_single_order() {
    let system = MarketSystem::new();
    let product_id = seed(&system, "seller_1", "Typewriter", 6_500).await;

    system.cart_client.add("nora".to_string(), product_id.clone()).await.unwrap();

    // Double-click: the same buyer submits twice before the first
    // pass finishes.
    let first = {
        let engine = system.checkout.clone();
        tokio::spawn(async move { engine.checkout("nora".to_string()).await.unwrap() })
    };
    let second = {
        let engine = system.checkout.clone();
        tokio::spawn(async move { engine.checkout("nora".to_string()).await.unwrap() })
    };
    let (report_a, report_b) = (first.await.unwrap(), second.await.unwrap());

    // Exactly one pass commits the item; the other saw an empty
    // snapshot or an already_sold refusal, never a second purchase.
    assert_eq!(report_a.purchased.len() + report_b.purchased.len(), 1);
    for skipped in report_a.skipped.iter().chain(&report_b.skipped) {
        assert_eq!(skipped.reason, RejectReason::AlreadySold);
    }

    let orders = system.sales_client.list_orders("nora".to_string()).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].product_id, product_id);

    assert!(system.cart_client.snapshot("nora".to_string()).await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn repeated_checkout_never_duplicates_orders() {
    let system = MarketSystem::new();
    let product_id = seed(&system, "seller_1", "Tent", 11_000).await;

    system.cart_client.add("gina".to_string(), product_id.clone()).await.unwrap();

    let first = system.checkout.checkout("gina".to_string()).await.unwrap();
    assert_eq!(first.purchased.len(), 1);

    // The cart was cleared, so a second pass is a no-op.
    let second = system.checkout.checkout("gina".to_string()).await.unwrap();
    assert!(second.purchased.is_empty());
    assert!(second.skipped.is_empty());

    let orders = system.sales_client.list_orders("gina".to_string()).await.unwrap();
    assert_eq!(orders.len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn empty_cart_checkout_is_a_harmless_no_op() {
    let system = MarketSystem::new();

    let report = system.checkout.checkout("nobody".to_string()).await.unwrap();
    assert!(report.purchased.is_empty());
    assert!(report.skipped.is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn sellers_cannot_buy_their_own_listing_through_checkout() {
    let system = MarketSystem::new();
    let product_id = seed(&system, "hank", "Skis", 7_500).await;

    system.cart_client.add("hank".to_string(), product_id.clone()).await.unwrap();

    let report = system.checkout.checkout("hank".to_string()).await.unwrap();
    assert!(report.purchased.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].reason, RejectReason::SelfPurchase);

    // The refused listing stays available for everyone else.
    let product = system.catalog_client.get_product(product_id).await.unwrap().unwrap();
    assert!(product.is_available());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn cart_traffic_never_affects_availability() {
    let system = MarketSystem::new();
    let product_id = seed(&system, "seller_1", "Espresso machine", 22_000).await;

    for _ in 0..5 {
        system.cart_client.add("ivy".to_string(), product_id.clone()).await.unwrap();
        system.cart_client.snapshot("ivy".to_string()).await.unwrap();
        system.cart_client.remove("ivy".to_string(), product_id.clone()).await.unwrap();
    }

    let product = system.catalog_client.get_product(product_id).await.unwrap().unwrap();
    assert!(product.is_available());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn listing_management_is_seller_only_and_stops_at_the_sale() {
    let system = MarketSystem::new();
    let product_id = seed(&system, "lena", "Guitar", 30_000).await;

    fn patch(caller: &str, price_cents: u64) -> ProductPatch {
        ProductPatch {
            seller_id: caller.to_string(),
            title: None,
            description: None,
            category: None,
            price_cents: Some(price_cents),
            condition: None,
        }
    }

    // The seller can reprice their own listing.
    let updated = system
        .catalog_client
        .edit_listing(product_id.clone(), patch("lena", 27_000))
        .await
        .unwrap();
    assert_eq!(updated.price_cents, 27_000);

    // Anyone else is refused.
    let err = system
        .catalog_client
        .edit_listing(product_id.clone(), patch("mara", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotSeller { .. }));
    let err = system
        .catalog_client
        .delete_listing(product_id.clone(), "mara".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotSeller { .. }));

    // Once sold, even the seller can no longer edit.
    system
        .sales_client
        .reserve_and_sell(product_id.clone(), "mara".to_string())
        .await
        .unwrap();
    let err = system
        .catalog_client
        .edit_listing(product_id.clone(), patch("lena", 25_000))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::ListingSold(_)));

    // The sold guitar is gone from browse but still on lena's page.
    assert!(system
        .catalog_client
        .list_available(ProductFilter::default())
        .await
        .unwrap()
        .is_empty());
    let mine = system.catalog_client.list_by_seller("lena".to_string()).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, product_id);
    assert!(!mine[0].is_available());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn orders_come_back_newest_first_per_buyer() {
    let system = MarketSystem::new();
    let first = seed(&system, "seller_1", "Chair", 1_000).await;
    let second = seed(&system, "seller_1", "Table", 2_000).await;

    system
        .sales_client
        .reserve_and_sell(first.clone(), "jack".to_string())
        .await
        .unwrap();
    system
        .sales_client
        .reserve_and_sell(second.clone(), "jack".to_string())
        .await
        .unwrap();
    system
        .sales_client
        .reserve_and_sell(seed(&system, "seller_1", "Rug", 3_000).await, "kira".to_string())
        .await
        .unwrap();

    let orders = system.sales_client.list_orders("jack".to_string()).await.unwrap();
    assert_eq!(orders.len(), 2);
    assert!(orders[0].ordered_at >= orders[1].ordered_at);
    assert!(orders.iter().all(|o| o.buyer_id == "jack"));
    assert!(orders.iter().any(|o| o.product_id == first));
    assert!(orders.iter().any(|o| o.product_id == second));

    system.shutdown().await.unwrap();
}
