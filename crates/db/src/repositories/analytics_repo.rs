//! Read-only aggregation queries behind the admin dashboard.
//!
//! Grouping happens in SQL; labelling and placeholders happen in
//! [`watchstore_core::analytics`]. Only the date-part expressions vary by
//! engine and come from the pool's [`SalesDialect`](crate::dialect::SalesDialect).

use watchstore_core::analytics::{
    self, daily_window_start, monthly_window_start, AnalyticsReport, DashboardStats, LabelCount,
    MonthTotal, WeekdayTotal,
};
use watchstore_core::locale::Locale;
use watchstore_core::order_status::OrderStatus;
use watchstore_core::types::Timestamp;

use crate::repositories::{OrderRepo, ProductRepo};
use crate::DbPool;

/// Provides the dashboard and analytics aggregations.
pub struct AnalyticsRepo;

impl AnalyticsRepo {
    /// Product count, order count, pending count and completed revenue.
    pub async fn dashboard_stats(pool: &DbPool) -> Result<DashboardStats, sqlx::Error> {
        let total_products = ProductRepo::count(pool).await?;
        let total_orders = OrderRepo::count(pool, None).await?;
        let pending_orders = OrderRepo::count(pool, Some(OrderStatus::Pending)).await?;
        let total_revenue = Self::revenue_for_status(pool, OrderStatus::Completed).await?;

        Ok(DashboardStats {
            total_products,
            total_orders,
            total_revenue,
            pending_orders,
        })
    }

    /// Sum of `total` over orders with the given status, 0 when there are none.
    pub async fn revenue_for_status(pool: &DbPool, status: OrderStatus) -> Result<f64, sqlx::Error> {
        with_pool!(pool, p => {
            sqlx::query_scalar::<_, f64>(
                "SELECT COALESCE(SUM(total), 0.0) FROM orders WHERE status = $1",
            )
            .bind(status.as_str())
            .fetch_one(p)
            .await
        })
    }

    /// Non-cancelled revenue created at or after `since`, per calendar month.
    pub async fn monthly_sales(pool: &DbPool, since: Timestamp) -> Result<Vec<MonthTotal>, sqlx::Error> {
        let dialect = pool.dialect();
        let query = format!(
            "SELECT {month} AS month, COALESCE(SUM(total), 0.0) AS total \
             FROM orders \
             WHERE status <> $2 AND {since} \
             GROUP BY 1 ORDER BY 1",
            month = dialect.month_of("created_at"),
            since = dialect.at_or_after("created_at", "$1"),
        );

        let rows: Vec<(i64, f64)> = with_pool!(pool, p => {
            sqlx::query_as(&query)
                .bind(since)
                .bind(OrderStatus::Cancelled.as_str())
                .fetch_all(p)
                .await?
        });

        Ok(rows
            .into_iter()
            .filter_map(|(month, total)| {
                let month = u32::try_from(month).ok().filter(|m| (1..=12).contains(m))?;
                Some(MonthTotal { month, total })
            })
            .collect())
    }

    /// Non-cancelled revenue created at or after `since`, per weekday (0 = Sunday).
    pub async fn daily_revenue(pool: &DbPool, since: Timestamp) -> Result<Vec<WeekdayTotal>, sqlx::Error> {
        let dialect = pool.dialect();
        let query = format!(
            "SELECT {weekday} AS weekday, COALESCE(SUM(total), 0.0) AS total \
             FROM orders \
             WHERE status <> $2 AND {since} \
             GROUP BY 1 ORDER BY 1",
            weekday = dialect.weekday_of("created_at"),
            since = dialect.at_or_after("created_at", "$1"),
        );

        let rows: Vec<(i64, f64)> = with_pool!(pool, p => {
            sqlx::query_as(&query)
                .bind(since)
                .bind(OrderStatus::Cancelled.as_str())
                .fetch_all(p)
                .await?
        });

        Ok(rows
            .into_iter()
            .filter_map(|(raw, total)| {
                let weekday = dialect.normalize_weekday(raw)?;
                Some(WeekdayTotal { weekday, total })
            })
            .collect())
    }

    /// Number of products per category label.
    pub async fn category_distribution(pool: &DbPool) -> Result<Vec<LabelCount>, sqlx::Error> {
        let rows: Vec<(String, i64)> = with_pool!(pool, p => {
            sqlx::query_as(
                "SELECT category, COUNT(*) FROM products GROUP BY category ORDER BY category",
            )
            .fetch_all(p)
            .await?
        });
        Ok(rows
            .into_iter()
            .map(|(label, count)| LabelCount { label, count })
            .collect())
    }

    /// Number of orders per status label.
    pub async fn order_status_distribution(pool: &DbPool) -> Result<Vec<LabelCount>, sqlx::Error> {
        let rows: Vec<(String, i64)> = with_pool!(pool, p => {
            sqlx::query_as("SELECT status, COUNT(*) FROM orders GROUP BY status ORDER BY status")
                .fetch_all(p)
                .await?
        });
        Ok(rows
            .into_iter()
            .map(|(label, count)| LabelCount { label, count })
            .collect())
    }

    /// Run every aggregation and fold the results into chart series.
    pub async fn report(
        pool: &DbPool,
        locale: Locale,
        now: Timestamp,
    ) -> Result<AnalyticsReport, sqlx::Error> {
        let monthly = Self::monthly_sales(pool, monthly_window_start(now)).await?;
        let daily = Self::daily_revenue(pool, daily_window_start(now)).await?;
        let categories = Self::category_distribution(pool).await?;
        let statuses = Self::order_status_distribution(pool).await?;

        Ok(AnalyticsReport {
            monthly_sales: analytics::monthly_series(&monthly, locale, now),
            daily_revenue: analytics::daily_series(&daily, locale),
            category_distribution: analytics::count_series(&categories),
            order_status: analytics::count_series(&statuses),
        })
    }
}
