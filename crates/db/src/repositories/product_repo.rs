//! Repository for the `products` table.

use chrono::Utc;
use sqlx::types::Json;
use watchstore_core::catalog::{ProductFilter, ProductSort};
use watchstore_core::types::DbId;

use crate::models::product::{CreateProduct, Product, UpdateProduct};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, name_en, brand, category, price, old_price, description, \
    features, images, in_stock, featured, rating, created_at, updated_at";

/// Provides CRUD operations for catalog products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    ///
    /// `in_stock`, `featured`, `rating`, `features` and `images` fall back to
    /// their column defaults when omitted.
    pub async fn create(pool: &DbPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products \
                (name, name_en, brand, category, price, old_price, description, \
                 features, images, in_stock, featured, rating, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, \
                 COALESCE($8, '[]'), COALESCE($9, '[]'), COALESCE($10, TRUE), \
                 COALESCE($11, FALSE), COALESCE($12, 0), $13, $13) \
             RETURNING {COLUMNS}"
        );
        let now = Utc::now();
        let features = input.features.clone().map(Json);
        let images = input.images.clone().map(Json);

        with_pool!(pool, p => {
            sqlx::query_as::<_, Product>(&query)
                .bind(&input.name)
                .bind(&input.name_en)
                .bind(&input.brand)
                .bind(&input.category)
                .bind(input.price)
                .bind(input.old_price)
                .bind(&input.description)
                .bind(&features)
                .bind(&images)
                .bind(input.in_stock)
                .bind(input.featured)
                .bind(input.rating)
                .bind(now)
                .fetch_one(p)
                .await
        })
    }

    /// Find a product by its internal ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        with_pool!(pool, p => {
            sqlx::query_as::<_, Product>(&query)
                .bind(id)
                .fetch_optional(p)
                .await
        })
    }

    /// List products matching `filter`.
    ///
    /// The default filter returns every product, newest first.
    pub async fn list(pool: &DbPool, filter: &ProductFilter) -> Result<Vec<Product>, sqlx::Error> {
        let order_by = match filter.sort {
            ProductSort::Newest => "created_at DESC, id DESC",
            ProductSort::PriceAsc => "price ASC, id DESC",
            ProductSort::PriceDesc => "price DESC, id DESC",
            ProductSort::Rating => "rating DESC, id DESC",
        };
        let query = format!(
            "SELECT {COLUMNS} FROM products \
             WHERE ($1 IS NULL OR category = $1) \
               AND ($2 IS NULL OR price >= $2) \
               AND ($3 IS NULL OR price <= $3) \
             ORDER BY {order_by}"
        );
        let category = filter.category();

        with_pool!(pool, p => {
            sqlx::query_as::<_, Product>(&query)
                .bind(category)
                .bind(filter.min_price)
                .bind(filter.max_price)
                .fetch_all(p)
                .await
        })
    }

    /// List featured products, newest first.
    pub async fn list_featured(pool: &DbPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products WHERE featured = TRUE ORDER BY created_at DESC, id DESC"
        );
        with_pool!(pool, p => sqlx::query_as::<_, Product>(&query).fetch_all(p).await)
    }

    /// Distinct category labels in alphabetical order.
    pub async fn list_categories(pool: &DbPool) -> Result<Vec<String>, sqlx::Error> {
        with_pool!(pool, p => {
            sqlx::query_scalar::<_, String>(
                "SELECT DISTINCT category FROM products ORDER BY category",
            )
            .fetch_all(p)
            .await
        })
    }

    /// Update a product. Only non-`None` fields in `input` are applied;
    /// `Some(None)` clears `name_en`, `brand` or `old_price`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                name = COALESCE($2, name), \
                name_en = CASE WHEN $15 THEN $3 ELSE name_en END, \
                brand = CASE WHEN $16 THEN $4 ELSE brand END, \
                category = COALESCE($5, category), \
                price = COALESCE($6, price), \
                old_price = CASE WHEN $17 THEN $7 ELSE old_price END, \
                description = COALESCE($8, description), \
                features = COALESCE($9, features), \
                images = COALESCE($10, images), \
                in_stock = COALESCE($11, in_stock), \
                featured = COALESCE($12, featured), \
                rating = COALESCE($13, rating), \
                updated_at = $14 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let now = Utc::now();
        let features = input.features.clone().map(Json);
        let images = input.images.clone().map(Json);
        let name_en = input.name_en.as_ref().and_then(Option::as_deref);
        let brand = input.brand.as_ref().and_then(Option::as_deref);
        let old_price = input.old_price.flatten();

        with_pool!(pool, p => {
            sqlx::query_as::<_, Product>(&query)
                .bind(id)
                .bind(&input.name)
                .bind(name_en)
                .bind(brand)
                .bind(&input.category)
                .bind(input.price)
                .bind(old_price)
                .bind(&input.description)
                .bind(&features)
                .bind(&images)
                .bind(input.in_stock)
                .bind(input.featured)
                .bind(input.rating)
                .bind(now)
                .bind(input.name_en.is_some())
                .bind(input.brand.is_some())
                .bind(input.old_price.is_some())
                .fetch_optional(p)
                .await
        })
    }

    /// Permanently delete a product by ID. Returns `true` if a row was removed.
    ///
    /// Order items that reference the product keep their copied fields.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = with_pool!(pool, p => {
            sqlx::query("DELETE FROM products WHERE id = $1")
                .bind(id)
                .execute(p)
                .await?
                .rows_affected()
        });
        Ok(result > 0)
    }

    /// Total number of products.
    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        with_pool!(pool, p => {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
                .fetch_one(p)
                .await
        })
    }
}
