//! Repository for the `orders` and `order_items` tables.

use std::collections::HashMap;

use chrono::Utc;
use watchstore_core::order_status::OrderStatus;
use watchstore_core::types::DbId;

use crate::models::order::{CreateOrder, Order, OrderItem, OrderWithItems};
use crate::DbPool;

/// Column list for the `orders` table.
const COLUMNS: &str = "id, customer, phone, email, city, address, notes, total, status, \
    created_at, updated_at";

/// Column list for the `order_items` table.
const ITEM_COLUMNS: &str = "id, order_id, product_id, name, price, image, quantity";

/// Provides the checkout write path and admin reads/updates for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert the order header and all of its items in one transaction.
    ///
    /// Status is always the initial status. If any insert fails the
    /// transaction is dropped uncommitted, so neither the header nor any
    /// item becomes visible.
    pub async fn create(pool: &DbPool, input: &CreateOrder) -> Result<OrderWithItems, sqlx::Error> {
        let header_query = format!(
            "INSERT INTO orders \
                (customer, phone, email, city, address, notes, total, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9) \
             RETURNING {COLUMNS}"
        );
        let item_query = format!(
            "INSERT INTO order_items (order_id, product_id, name, price, image, quantity) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {ITEM_COLUMNS}"
        );

        with_pool!(pool, p => {
            let mut tx = p.begin().await?;

            let order = sqlx::query_as::<_, Order>(&header_query)
                .bind(&input.customer)
                .bind(&input.phone)
                .bind(&input.email)
                .bind(&input.city)
                .bind(&input.address)
                .bind(&input.notes)
                .bind(input.total)
                .bind(OrderStatus::INITIAL.as_str())
                .bind(input.placed_at)
                .fetch_one(&mut *tx)
                .await?;

            let mut items = Vec::with_capacity(input.items.len());
            for item in &input.items {
                let row = sqlx::query_as::<_, OrderItem>(&item_query)
                    .bind(order.id)
                    .bind(item.product_id)
                    .bind(&item.name)
                    .bind(item.price)
                    .bind(&item.image)
                    .bind(item.quantity)
                    .fetch_one(&mut *tx)
                    .await?;
                items.push(row);
            }

            tx.commit().await?;

            tracing::debug!(order_id = order.id, items = items.len(), "Order persisted");
            Ok(OrderWithItems { order, items })
        })
    }

    /// Find an order and its items by the order's internal ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<OrderWithItems>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        let order = with_pool!(pool, p => {
            sqlx::query_as::<_, Order>(&query)
                .bind(id)
                .fetch_optional(p)
                .await?
        });

        match order {
            Some(order) => {
                let items = Self::items_for_order(pool, order.id).await?;
                Ok(Some(OrderWithItems { order, items }))
            }
            None => Ok(None),
        }
    }

    /// List all orders with their items, most recently created first.
    pub async fn list(pool: &DbPool) -> Result<Vec<OrderWithItems>, sqlx::Error> {
        let order_query =
            format!("SELECT {COLUMNS} FROM orders ORDER BY created_at DESC, id DESC");
        let item_query = format!("SELECT {ITEM_COLUMNS} FROM order_items ORDER BY order_id, id");

        let (orders, items) = with_pool!(pool, p => {
            let orders = sqlx::query_as::<_, Order>(&order_query).fetch_all(p).await?;
            let items = sqlx::query_as::<_, OrderItem>(&item_query).fetch_all(p).await?;
            (orders, items)
        });

        let mut by_order: HashMap<DbId, Vec<OrderItem>> = HashMap::new();
        for item in items {
            by_order.entry(item.order_id).or_default().push(item);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = by_order.remove(&order.id).unwrap_or_default();
                OrderWithItems { order, items }
            })
            .collect())
    }

    /// Items of one order in insertion order.
    pub async fn items_for_order(pool: &DbPool, order_id: DbId) -> Result<Vec<OrderItem>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY id");
        with_pool!(pool, p => {
            sqlx::query_as::<_, OrderItem>(&query)
                .bind(order_id)
                .fetch_all(p)
                .await
        })
    }

    /// Overwrite an order's status. Any status may replace any other.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        pool: &DbPool,
        id: DbId,
        status: OrderStatus,
    ) -> Result<Option<OrderWithItems>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET status = $2, updated_at = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let now = Utc::now();
        let order = with_pool!(pool, p => {
            sqlx::query_as::<_, Order>(&query)
                .bind(id)
                .bind(status.as_str())
                .bind(now)
                .fetch_optional(p)
                .await?
        });

        match order {
            Some(order) => {
                let items = Self::items_for_order(pool, order.id).await?;
                Ok(Some(OrderWithItems { order, items }))
            }
            None => Ok(None),
        }
    }

    /// Delete an order; its items go with it via `ON DELETE CASCADE`.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = with_pool!(pool, p => {
            sqlx::query("DELETE FROM orders WHERE id = $1")
                .bind(id)
                .execute(p)
                .await?
                .rows_affected()
        });
        Ok(result > 0)
    }

    /// Total number of orders, optionally restricted to one status.
    pub async fn count(pool: &DbPool, status: Option<OrderStatus>) -> Result<i64, sqlx::Error> {
        let status = status.map(OrderStatus::as_str);
        with_pool!(pool, p => {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE ($1 IS NULL OR status = $1)")
                .bind(status)
                .fetch_one(p)
                .await
        })
    }
}
