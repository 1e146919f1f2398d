//! Integration tests for the order write transaction and order store.

use assert_matches::assert_matches;
use chrono::Utc;
use sqlx::SqlitePool;
use watchstore_core::checkout::{CheckoutRequest, LineEntry};
use watchstore_core::order_status::OrderStatus;
use watchstore_db::models::order::{CreateOrder, CreateOrderItem};
use watchstore_db::models::product::CreateProduct;
use watchstore_db::repositories::{AnalyticsRepo, OrderRepo, ProductRepo};
use watchstore_db::DbPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn item(name: &str, price: f64, quantity: i32) -> CreateOrderItem {
    CreateOrderItem {
        product_id: None,
        name: name.to_string(),
        price,
        image: None,
        quantity,
    }
}

fn new_order(items: Vec<CreateOrderItem>) -> CreateOrder {
    let total = items.iter().map(|i| i.price * f64::from(i.quantity)).sum();
    CreateOrder {
        customer: "Mohamed".to_string(),
        phone: "+222 36 12 34 56".to_string(),
        email: None,
        city: "Nouakchott".to_string(),
        address: "Tevragh Zeina".to_string(),
        notes: None,
        total,
        placed_at: Utc::now(),
        items,
    }
}

async fn row_counts(pool: &SqlitePool) -> (i64, i64) {
    let orders: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await
        .unwrap();
    let items: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM order_items")
        .fetch_one(pool)
        .await
        .unwrap();
    (orders.0, items.0)
}

fn product(name: &str, price: f64) -> CreateProduct {
    CreateProduct {
        name: Some(name.to_string()),
        category: Some("luxury".to_string()),
        price: Some(price),
        description: Some("watch".to_string()),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Write transaction
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "migrations/sqlite")]
async fn checkout_persists_header_and_items(pool: SqlitePool) {
    let db = DbPool::Sqlite(pool.clone());
    let a = ProductRepo::create(&db, &product("A", 100.0)).await.unwrap();
    let b = ProductRepo::create(&db, &product("B", 50.0)).await.unwrap();

    let request = CheckoutRequest {
        customer: Some("Fatima".into()),
        phone: Some("22334455".into()),
        city: Some("Nouadhibou".into()),
        address: Some("Centre".into()),
        items: vec![
            LineEntry {
                product_id: Some(a.id),
                name: Some(a.name.clone()),
                price: a.price,
                quantity: 2,
                image: None,
            },
            LineEntry {
                product_id: Some(b.id),
                name: Some(b.name.clone()),
                price: b.price,
                quantity: 1,
                image: None,
            },
        ],
        ..Default::default()
    };
    let created = OrderRepo::create(&db, &CreateOrder::from_checkout(&request, Utc::now()))
        .await
        .unwrap();

    assert_eq!(created.order.total, 250.0);
    assert_eq!(created.order.status, OrderStatus::Pending);
    assert_eq!(created.items.len(), 2);
    assert!(created.items.iter().all(|i| i.order_id == created.order.id));
    assert_eq!(row_counts(&pool).await, (1, 2));

    let fetched = OrderRepo::find_by_id(&db, created.order.id)
        .await
        .unwrap()
        .expect("order should exist");
    assert_eq!(fetched.items[0].name, "A");
    assert_eq!(fetched.items[0].quantity, 2);
}

#[sqlx::test(migrations = "migrations/sqlite")]
async fn failing_item_rolls_back_whole_order(pool: SqlitePool) {
    let db = DbPool::Sqlite(pool.clone());
    // The second item violates the quantity check after the header and
    // first item have been written inside the transaction.
    let input = new_order(vec![item("A", 100.0, 1), item("B", 50.0, 0)]);

    let result = OrderRepo::create(&db, &input).await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));
    assert_eq!(row_counts(&pool).await, (0, 0));
    assert!(OrderRepo::list(&db).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "migrations/sqlite")]
async fn order_items_keep_copies_after_product_changes(pool: SqlitePool) {
    let db = DbPool::Sqlite(pool);
    let watch = ProductRepo::create(&db, &product("Tank", 380.0)).await.unwrap();
    let created = OrderRepo::create(
        &db,
        &new_order(vec![CreateOrderItem {
            product_id: Some(watch.id),
            ..item("Tank", 380.0, 1)
        }]),
    )
    .await
    .unwrap();

    assert!(ProductRepo::delete(&db, watch.id).await.unwrap());

    let fetched = OrderRepo::find_by_id(&db, created.order.id)
        .await
        .unwrap()
        .expect("order should survive product deletion");
    assert_eq!(fetched.items.len(), 1);
    assert_eq!(fetched.items[0].name, "Tank");
    assert_eq!(fetched.items[0].price, 380.0);
    assert_eq!(fetched.items[0].product_id, Some(watch.id));
}

// ---------------------------------------------------------------------------
// Order store
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "migrations/sqlite")]
async fn list_returns_newest_first_with_items(pool: SqlitePool) {
    let db = DbPool::Sqlite(pool);
    let older = OrderRepo::create(&db, &new_order(vec![item("A", 10.0, 1)]))
        .await
        .unwrap();
    let newer = OrderRepo::create(
        &db,
        &new_order(vec![item("B", 20.0, 1), item("C", 5.0, 3)]),
    )
    .await
    .unwrap();

    let listed = OrderRepo::list(&db).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].order.id, newer.order.id);
    assert_eq!(listed[0].items.len(), 2);
    assert_eq!(listed[1].order.id, older.order.id);
    assert_eq!(listed[1].items.len(), 1);
}

#[sqlx::test(migrations = "migrations/sqlite")]
async fn status_transitions_are_unrestricted(pool: SqlitePool) {
    let db = DbPool::Sqlite(pool);
    let created = OrderRepo::create(&db, &new_order(vec![item("A", 10.0, 1)]))
        .await
        .unwrap();
    let id = created.order.id;

    for status in [
        OrderStatus::OutForDelivery,
        OrderStatus::Completed,
        OrderStatus::Pending,
        OrderStatus::Cancelled,
    ] {
        let updated = OrderRepo::update_status(&db, id, status)
            .await
            .unwrap()
            .expect("order should exist");
        assert_eq!(updated.order.status, status);
        assert_eq!(updated.items.len(), 1);
    }

    assert_matches!(
        OrderRepo::update_status(&db, 9999, OrderStatus::Completed).await.unwrap(),
        None
    );
}

#[sqlx::test(migrations = "migrations/sqlite")]
async fn completing_an_order_adds_its_total_to_revenue(pool: SqlitePool) {
    let db = DbPool::Sqlite(pool);
    let before = AnalyticsRepo::dashboard_stats(&db).await.unwrap();
    assert_eq!(before.total_revenue, 0.0);

    let created = OrderRepo::create(
        &db,
        &new_order(vec![item("A", 100.0, 2), item("B", 50.0, 1)]),
    )
    .await
    .unwrap();
    let pending = AnalyticsRepo::dashboard_stats(&db).await.unwrap();
    assert_eq!(pending.total_orders, 1);
    assert_eq!(pending.pending_orders, 1);
    assert_eq!(pending.total_revenue, 0.0);

    OrderRepo::update_status(&db, created.order.id, OrderStatus::Completed)
        .await
        .unwrap();
    let after = AnalyticsRepo::dashboard_stats(&db).await.unwrap();
    assert_eq!(after.total_revenue - before.total_revenue, 250.0);
    assert_eq!(after.pending_orders, 0);
}

#[sqlx::test(migrations = "migrations/sqlite")]
async fn delete_cascades_to_items(pool: SqlitePool) {
    let db = DbPool::Sqlite(pool.clone());
    let created = OrderRepo::create(&db, &new_order(vec![item("A", 10.0, 1), item("B", 1.0, 4)]))
        .await
        .unwrap();

    assert!(OrderRepo::delete(&db, created.order.id).await.unwrap());
    assert_eq!(row_counts(&pool).await, (0, 0));
    assert!(!OrderRepo::delete(&db, created.order.id).await.unwrap());
}
