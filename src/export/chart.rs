//! Chart-ready series builders
//!
//! Each builder projects one aggregation into the `{labels, datasets}`
//! shape bar/line/pie renderers consume. Colors, gradients and layout stay
//! with the rendering layer; these series carry labels and numbers only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::binning::{bin_values, bucket_ages};
use crate::aggregate::grouping::{items_by_category, orders_by_source};
use crate::aggregate::ranking::top_customers_by_clv;
use crate::aggregate::timeseries::{monthly_revenue, monthly_top_products};
use crate::types::{CatalogItem, Customer, Order};

/// Number of requested price-histogram bins. The histogram itself carries
/// one extra terminal bucket (see [`bin_values`]).
pub const PRICE_HISTOGRAM_BINS: usize = 5;

/// How many products the popularity chart tracks per period
const TOP_PRODUCTS_PER_PERIOD: usize = 3;

/// How many customers the CLV chart shows
const TOP_CUSTOMERS: usize = 10;

/// One labelled data series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

/// A chart-ready dataset collection: one label per x position, any number
/// of datasets aligned to those labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Customer-count bar per age group
pub fn age_distribution_chart(customers: &[Customer], as_of: NaiveDate) -> ChartSeries {
    let birthdays: Vec<NaiveDate> = customers
        .iter()
        .filter_map(|customer| customer.birthday)
        .collect();
    let distribution = bucket_ages(&birthdays, as_of);

    ChartSeries {
        labels: distribution
            .counts()
            .map(|(bucket, _)| bucket.label().to_string())
            .collect(),
        datasets: vec![Dataset {
            label: "Customers".to_string(),
            data: distribution.counts().map(|(_, count)| count as f64).collect(),
        }],
    }
}

/// Product-count bar per price range
pub fn price_distribution_chart(catalog: &[CatalogItem]) -> ChartSeries {
    let prices: Vec<f64> = catalog
        .iter()
        .filter_map(|item| item.unit_price.as_ref().map(|m| m.amount))
        .collect();
    let bins = bin_values(&prices, PRICE_HISTOGRAM_BINS);

    ChartSeries {
        labels: bins
            .iter()
            .map(|bin| format!("$ {:.2} - {:.2}", bin.range.0, bin.range.1))
            .collect(),
        datasets: vec![Dataset {
            label: "Products".to_string(),
            data: bins.iter().map(|bin| bin.count as f64).collect(),
        }],
    }
}

/// Revenue line across the monthly period spine
pub fn revenue_chart(orders: &[Order]) -> ChartSeries {
    let series = monthly_revenue(orders);

    ChartSeries {
        labels: series.iter().map(|entry| entry.period.to_string()).collect(),
        datasets: vec![Dataset {
            label: "Sales Volume".to_string(),
            data: series.iter().map(|entry| entry.revenue).collect(),
        }],
    }
}

/// Units-sold lines for the top products of each month, one dataset per
/// product, aligned to the period labels with 0.0 where a product did not
/// chart that month
pub fn product_popularity_chart(orders: &[Order], catalog: &[CatalogItem]) -> ChartSeries {
    let series = monthly_top_products(orders, catalog, TOP_PRODUCTS_PER_PERIOD);
    let labels: Vec<String> = series.iter().map(|entry| entry.period.to_string()).collect();

    let mut datasets: Vec<Dataset> = Vec::new();
    for (position, entry) in series.iter().enumerate() {
        for product in &entry.top {
            let index = match datasets.iter().position(|d| d.label == product.title) {
                Some(index) => index,
                None => {
                    datasets.push(Dataset {
                        label: product.title.clone(),
                        data: vec![0.0; series.len()],
                    });
                    datasets.len() - 1
                }
            };
            datasets[index].data[position] = product.units_sold as f64;
        }
    }

    ChartSeries { labels, datasets }
}

/// Order-count pie per sales channel
pub fn order_source_chart(orders: &[Order]) -> ChartSeries {
    let groups = orders_by_source(orders);

    ChartSeries {
        labels: groups.iter().map(|(label, _)| label.clone()).collect(),
        datasets: vec![Dataset {
            label: "# of Orders".to_string(),
            data: groups.iter().map(|&(_, count)| count as f64).collect(),
        }],
    }
}

/// Product-count pie per category
pub fn category_chart(catalog: &[CatalogItem]) -> ChartSeries {
    let groups = items_by_category(catalog);

    ChartSeries {
        labels: groups.iter().map(|(label, _)| label.clone()).collect(),
        datasets: vec![Dataset {
            label: "# of Products".to_string(),
            data: groups.iter().map(|&(_, count)| count as f64).collect(),
        }],
    }
}

/// Lifetime-value line for the top customers, labelled by given name
pub fn clv_chart(customers: &[Customer], orders: &[Order]) -> ChartSeries {
    let top = top_customers_by_clv(customers, orders, TOP_CUSTOMERS);

    ChartSeries {
        labels: top
            .iter()
            .map(|entry| {
                entry
                    .customer
                    .given_name
                    .clone()
                    .unwrap_or_else(|| "-".to_string())
            })
            .collect(),
        datasets: vec![Dataset {
            label: "Customer Lifetime Value".to_string(),
            data: top.iter().map(|entry| entry.clv).collect(),
        }],
    }
}
