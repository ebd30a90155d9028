//! Join utilities
//!
//! Resolve the relationships between the three collections: orders
//! reference catalog items through variation ids, and customers through
//! customer ids. Dangling references never error; an order that resolves to
//! nothing is simply excluded from the join.

use std::collections::HashSet;

use crate::types::{CatalogItem, Customer, Order};

/// Every order whose `item_id` is one of the item's variations, in input
/// order. Orders without an `item_id` never match.
pub fn orders_for_item<'a>(item: &CatalogItem, orders: &'a [Order]) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|order| {
            order
                .item_id
                .as_ref()
                .map_or(false, |id| item.variation_ids.contains(id))
        })
        .collect()
}

/// Every order placed by the customer, in input order
pub fn orders_for_customer<'a>(customer: &Customer, orders: &'a [Order]) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|order| order.customer_id.as_deref() == Some(customer.id.as_str()))
        .collect()
}

/// The customers who purchased the item, one entry per customer no matter
/// how many qualifying orders they placed. Output follows the customer
/// collection's own order, which keeps the result stable across calls.
pub fn customers_for_item<'a>(
    item: &CatalogItem,
    orders: &[Order],
    customers: &'a [Customer],
) -> Vec<&'a Customer> {
    let buyer_ids: HashSet<&str> = orders_for_item(item, orders)
        .iter()
        .filter_map(|order| order.customer_id.as_deref())
        .collect();

    customers
        .iter()
        .filter(|customer| buyer_ids.contains(customer.id.as_str()))
        .collect()
}
