//! Categorical grouping
//!
//! Count records per category label for the pie charts: orders by sales
//! channel and products by catalog category. Records without a label fall
//! into [`UNCATEGORIZED`]. Groups keep first-encounter order.

use crate::types::{CatalogItem, Order};

/// Label for records with no source/category
pub const UNCATEGORIZED: &str = "Uncategorized";

fn count_by<'a, T>(
    records: impl Iterator<Item = &'a T>,
    label_of: impl Fn(&'a T) -> Option<&'a str>,
) -> Vec<(String, usize)>
where
    T: 'a,
{
    let mut groups: Vec<(String, usize)> = Vec::new();
    for record in records {
        let label = label_of(record).unwrap_or(UNCATEGORIZED);
        match groups.iter_mut().find(|(name, _)| name == label) {
            Some(group) => group.1 += 1,
            None => groups.push((label.to_string(), 1)),
        }
    }
    groups
}

/// Number of orders per sales channel
pub fn orders_by_source(orders: &[Order]) -> Vec<(String, usize)> {
    count_by(orders.iter(), |order| order.source.as_deref())
}

/// Number of products per catalog category
pub fn items_by_category(catalog: &[CatalogItem]) -> Vec<(String, usize)> {
    count_by(catalog.iter(), |item| item.category.as_deref())
}
