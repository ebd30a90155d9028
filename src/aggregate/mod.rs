//! Aggregation engines
//!
//! Pure, synchronous transforms from the canonical collections to derived
//! datasets:
//! - Join utilities (orders for an item, customers for an item)
//! - Binning and bucketing (price histograms, age groups)
//! - Time-series aggregation (monthly revenue, monthly top products)
//! - Ranking and per-entity metrics (volume, sales value, CLV)
//! - Categorical grouping (orders by source, products by category)
//!
//! Every function here takes its inputs explicitly and holds no state, so
//! aggregations may run repeatedly or concurrently as data refreshes.

pub mod binning;
pub mod grouping;
pub mod join;
pub mod ranking;
pub mod timeseries;

pub use binning::{age_on, bin_values, bucket_ages, AgeBucket, AgeDistribution, Bin};
pub use grouping::{items_by_category, orders_by_source, UNCATEGORIZED};
pub use join::{customers_for_item, orders_for_customer, orders_for_item};
pub use ranking::{
    cmp_by_total_sales, customer_lifetime_value, most_common_age_group_among_buyers,
    most_popular_item, rank_by_total_sales, top_customers_by_clv, total_quantity_sold,
    total_sales_value, CustomerValue, SalesRow, SortDirection,
};
pub use timeseries::{
    monthly_revenue, monthly_top_products, Period, PeriodRevenue, PeriodTopProducts,
    ProductSales, MIN_PERIODS,
};

use once_cell::sync::Lazy;
use regex::Regex;

static INTEGER_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").unwrap());

/// Parse a string-encoded order quantity, substituting `fallback` for
/// missing or non-numeric values.
///
/// The fallback differs by call site and the difference is intentional:
/// volume metrics treat an unparseable quantity as 0 (the order sold
/// nothing countable), while revenue treats it as 1 (the order's total is
/// real money and should not vanish from the series).
pub fn parse_quantity(quantity: Option<&str>, fallback: i64) -> i64 {
    match quantity {
        Some(text) if INTEGER_LITERAL.is_match(text) => text.parse().unwrap_or(fallback),
        _ => fallback,
    }
}
