//! Folding aggregated rows into labelled chart series.
//!
//! The `db` crate runs the grouping queries and hands back raw buckets with
//! engine-neutral indexes (month 1..=12, weekday 0 = Sunday). This module
//! orders them, attaches localized labels and fills the empty-data
//! placeholders.

use chrono::{Datelike, Duration, Months};
use serde::Serialize;

use crate::locale::Locale;
use crate::types::Timestamp;

/// Length of the monthly sales window.
pub const MONTHLY_WINDOW_MONTHS: u32 = 6;

/// Length of the daily revenue window.
pub const DAILY_WINDOW_DAYS: i64 = 7;

/// Revenue summed over one calendar month (1 = January).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthTotal {
    pub month: u32,
    pub total: f64,
}

/// Revenue summed over one weekday (0 = Sunday).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekdayTotal {
    pub weekday: u32,
    pub total: f64,
}

/// Number of rows sharing a label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCount {
    pub label: String,
    pub count: i64,
}

/// Parallel label/value arrays, the shape chart widgets consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series<T> {
    pub labels: Vec<String>,
    pub data: Vec<T>,
}

impl<T> Default for Series<T> {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            data: Vec::new(),
        }
    }
}

impl<T> Series<T> {
    fn push(&mut self, label: impl Into<String>, value: T) {
        self.labels.push(label.into());
        self.data.push(value);
    }
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: i64,
    pub total_orders: i64,
    /// Sum of `total` over completed orders.
    pub total_revenue: f64,
    pub pending_orders: i64,
}

/// Everything the analytics page charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub monthly_sales: Series<f64>,
    pub daily_revenue: Series<f64>,
    pub category_distribution: Series<i64>,
    pub order_status: Series<i64>,
}

/// Start of the trailing monthly window.
pub fn monthly_window_start(now: Timestamp) -> Timestamp {
    now.checked_sub_months(Months::new(MONTHLY_WINDOW_MONTHS))
        .unwrap_or(now)
}

/// Start of the trailing daily window.
pub fn daily_window_start(now: Timestamp) -> Timestamp {
    now - Duration::days(DAILY_WINDOW_DAYS)
}

/// Convert an ISO-8601 weekday (1 = Monday .. 7 = Sunday) to 0 = Sunday.
pub fn weekday_from_iso(iso: i64) -> Option<u32> {
    match iso {
        1..=7 => u32::try_from(iso % 7).ok(),
        _ => None,
    }
}

/// Validate a weekday that is already 0 = Sunday .. 6 = Saturday.
pub fn weekday_from_sunday_zero(raw: i64) -> Option<u32> {
    match raw {
        0..=6 => u32::try_from(raw).ok(),
        _ => None,
    }
}

/// Monthly sales ordered by month number.
///
/// With no buckets, a single zero bucket labelled with `now`'s month is
/// emitted so the chart is never empty.
pub fn monthly_series(buckets: &[MonthTotal], locale: Locale, now: Timestamp) -> Series<f64> {
    let mut sorted: Vec<MonthTotal> = buckets.to_vec();
    sorted.sort_by_key(|b| b.month);

    let mut series = Series::default();
    for bucket in sorted {
        if let Some(label) = locale.month_name(bucket.month) {
            series.push(label, bucket.total);
        }
    }

    if series.labels.is_empty() {
        let label = locale.month_name(now.month()).unwrap_or_default();
        series.push(label, 0.0);
    }
    series
}

/// Daily revenue ordered Sunday first.
///
/// With no buckets, all seven weekdays are emitted with zero values.
pub fn daily_series(buckets: &[WeekdayTotal], locale: Locale) -> Series<f64> {
    let mut sorted: Vec<WeekdayTotal> = buckets.to_vec();
    sorted.sort_by_key(|b| b.weekday);

    let mut series = Series::default();
    for bucket in sorted {
        if let Some(label) = locale.weekday_name(bucket.weekday) {
            series.push(label, bucket.total);
        }
    }

    if series.labels.is_empty() {
        for weekday in 0..7 {
            if let Some(label) = locale.weekday_name(weekday) {
                series.push(label, 0.0);
            }
        }
    }
    series
}

/// Categorical counts in the order given.
pub fn count_series(buckets: &[LabelCount]) -> Series<i64> {
    let mut series = Series::default();
    for bucket in buckets {
        series.push(bucket.label.clone(), bucket.count);
    }
    series
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn at(y: i32, m: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_monthly_series_has_one_zero_bucket() {
        let series = monthly_series(&[], Locale::En, at(2026, 10, 17));
        assert_eq!(series.labels, vec!["October"]);
        assert_eq!(series.data, vec![0.0]);
    }

    #[test]
    fn empty_daily_series_has_seven_zero_buckets() {
        let series = daily_series(&[], Locale::En);
        assert_eq!(series.labels.len(), 7);
        assert_eq!(series.labels[0], "Sunday");
        assert_eq!(series.labels[6], "Saturday");
        assert!(series.data.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn monthly_series_is_sorted_by_month_number() {
        let buckets = [
            MonthTotal { month: 9, total: 30.0 },
            MonthTotal { month: 5, total: 10.0 },
            MonthTotal { month: 7, total: 20.0 },
        ];
        let series = monthly_series(&buckets, Locale::En, at(2026, 10, 17));
        assert_eq!(series.labels, vec!["May", "July", "September"]);
        assert_eq!(series.data, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn daily_series_only_contains_days_with_data() {
        let buckets = [
            WeekdayTotal { weekday: 3, total: 5.0 },
            WeekdayTotal { weekday: 0, total: 7.5 },
        ];
        let series = daily_series(&buckets, Locale::Ar);
        assert_eq!(series.labels, vec!["الأحد", "الأربعاء"]);
        assert_eq!(series.data, vec![7.5, 5.0]);
    }

    #[test]
    fn out_of_range_buckets_are_dropped() {
        let buckets = [MonthTotal { month: 13, total: 1.0 }];
        let series = monthly_series(&buckets, Locale::En, at(2026, 2, 1));
        assert_eq!(series.labels, vec!["February"]);
        assert_eq!(series.data, vec![0.0]);
    }

    #[test]
    fn iso_weekdays_normalize_to_sunday_zero() {
        assert_eq!(weekday_from_iso(7), Some(0));
        assert_eq!(weekday_from_iso(1), Some(1));
        assert_eq!(weekday_from_iso(6), Some(6));
        assert_eq!(weekday_from_iso(0), None);
        assert_eq!(weekday_from_iso(8), None);
    }

    #[test]
    fn sunday_zero_weekdays_pass_through() {
        assert_eq!(weekday_from_sunday_zero(0), Some(0));
        assert_eq!(weekday_from_sunday_zero(6), Some(6));
        assert_eq!(weekday_from_sunday_zero(7), None);
        assert_eq!(weekday_from_sunday_zero(-1), None);
    }

    #[test]
    fn windows_reach_back_six_months_and_seven_days() {
        let now = at(2026, 10, 17);
        assert_eq!(monthly_window_start(now), at(2026, 4, 17));
        assert_eq!(daily_window_start(now), at(2026, 10, 10));
    }

    #[test]
    fn stats_serialize_in_camel_case() {
        let stats = DashboardStats {
            total_products: 2,
            total_orders: 1,
            total_revenue: 250.0,
            pending_orders: 0,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalProducts"], 2);
        assert_eq!(json["totalRevenue"], 250.0);
        assert_eq!(json["pendingOrders"], 0);
    }
}
