//! Time-series aggregation
//!
//! Buckets orders into calendar-month periods between the earliest and
//! latest order, with no gaps, then pads the series forward to a minimum
//! length so sparse stores still chart as a line rather than a dot.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::parse_quantity;
use crate::types::{CatalogItem, Order};

/// Minimum number of periods any non-empty series carries. Shorter series
/// are padded forward with zero-valued periods; a display-stability policy,
/// not a correctness requirement.
pub const MIN_PERIODS: usize = 9;

/// A calendar-month bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year: i32,
    /// 1-based month
    pub month: u32,
}

impl Period {
    /// The period a timestamp falls into
    pub fn of(timestamp: DateTime<Utc>) -> Period {
        Period {
            year: timestamp.year(),
            month: timestamp.month(),
        }
    }

    /// The following calendar month
    pub fn next(self) -> Period {
        if self.month == 12 {
            Period {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Period {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("invalid period: {s}"))?;
        let year = year.parse().map_err(|_| format!("invalid period: {s}"))?;
        let month: u32 = month.parse().map_err(|_| format!("invalid period: {s}"))?;
        if !(1..=12).contains(&month) {
            return Err(format!("invalid period: {s}"));
        }
        Ok(Period { year, month })
    }
}

impl Serialize for Period {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Revenue earned during one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRevenue {
    pub period: Period,
    pub revenue: f64,
}

/// Units sold for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    /// Catalog item title, or `"-"` when the variation resolves to no item
    pub title: String,
    pub units_sold: i64,
}

/// The best-selling products of one period, most popular first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTopProducts {
    pub period: Period,
    pub top: Vec<ProductSales>,
}

/// Gap-free month spine from the earliest to the latest dated order.
/// Undated orders contribute nothing; no dated orders means no spine.
fn period_spine(orders: &[Order]) -> Vec<Period> {
    let periods: Vec<Period> = orders
        .iter()
        .filter_map(|order| order.created_at)
        .map(Period::of)
        .collect();

    let Some(first) = periods.iter().min().copied() else {
        return Vec::new();
    };
    let last = periods.iter().max().copied().unwrap_or(first);

    let mut spine = Vec::new();
    let mut current = first;
    while current <= last {
        spine.push(current);
        current = current.next();
    }
    spine
}

fn orders_in_period<'a>(orders: &'a [Order], period: Period) -> impl Iterator<Item = &'a Order> {
    orders.iter().filter(move |order| {
        order
            .created_at
            .map_or(false, |created| Period::of(created) == period)
    })
}

/// Revenue per calendar month across the full order history.
///
/// Per-period revenue is `Σ amount × quantity` over the period's orders,
/// with a missing order total contributing 0 and an unparseable quantity
/// contributing a multiplier of 1 (the order still counts once). Returns at
/// least [`MIN_PERIODS`] periods for any input with a dated order; an input
/// with none yields an empty series.
pub fn monthly_revenue(orders: &[Order]) -> Vec<PeriodRevenue> {
    let spine = period_spine(orders);
    let mut series: Vec<PeriodRevenue> = spine
        .into_iter()
        .map(|period| {
            let revenue = orders_in_period(orders, period)
                .map(|order| {
                    let amount = order.money.as_ref().map_or(0.0, |m| m.amount);
                    amount * parse_quantity(order.item_quantity.as_deref(), 1) as f64
                })
                .sum();
            PeriodRevenue { period, revenue }
        })
        .collect();

    while !series.is_empty() && series.len() < MIN_PERIODS {
        let period = series[series.len() - 1].period.next();
        series.push(PeriodRevenue {
            period,
            revenue: 0.0,
        });
    }

    debug!(periods = series.len(), "aggregated monthly revenue");
    series
}

/// The `top_n` best-selling products per calendar month.
///
/// Within a period, orders group by variation id in first-encounter order
/// and quantities sum with an unparseable quantity contributing 0. The
/// descending sort is stable, so ties keep their encounter order. Variation
/// ids are resolved to item titles through the catalog; a dangling id
/// displays as `"-"`.
pub fn monthly_top_products(
    orders: &[Order],
    catalog: &[CatalogItem],
    top_n: usize,
) -> Vec<PeriodTopProducts> {
    let spine = period_spine(orders);
    let mut series: Vec<PeriodTopProducts> = spine
        .into_iter()
        .map(|period| {
            let mut volumes: Vec<(&str, i64)> = Vec::new();
            for order in orders_in_period(orders, period) {
                let Some(variation_id) = order.item_id.as_deref() else {
                    continue;
                };
                let sold = parse_quantity(order.item_quantity.as_deref(), 0);
                match volumes.iter_mut().find(|(id, _)| *id == variation_id) {
                    Some(entry) => entry.1 += sold,
                    None => volumes.push((variation_id, sold)),
                }
            }

            volumes.sort_by(|a, b| b.1.cmp(&a.1));
            let top = volumes
                .into_iter()
                .take(top_n)
                .map(|(variation_id, units_sold)| ProductSales {
                    title: resolve_title(catalog, variation_id),
                    units_sold,
                })
                .collect();

            PeriodTopProducts { period, top }
        })
        .collect();

    while !series.is_empty() && series.len() < MIN_PERIODS {
        let period = series[series.len() - 1].period.next();
        series.push(PeriodTopProducts {
            period,
            top: Vec::new(),
        });
    }

    series
}

fn resolve_title(catalog: &[CatalogItem], variation_id: &str) -> String {
    catalog
        .iter()
        .find(|item| item.variation_ids.iter().any(|id| id == variation_id))
        .map(|item| item.title.clone())
        .unwrap_or_else(|| "-".to_string())
}
