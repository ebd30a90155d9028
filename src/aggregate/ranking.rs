//! Ranking and per-entity metrics
//!
//! Derived metrics over single entities (volume sold, sales value, customer
//! lifetime value) and the rankings built from them.

use std::cmp::Ordering;

use chrono::NaiveDate;
use tracing::trace;

use crate::aggregate::binning::{bucket_ages, AgeBucket};
use crate::aggregate::join::{customers_for_item, orders_for_customer, orders_for_item};
use crate::aggregate::parse_quantity;
use crate::types::{CatalogItem, Customer, Order};

/// Total units sold across every order joined to the item. An unparseable
/// quantity contributes 0.
pub fn total_quantity_sold(item: &CatalogItem, orders: &[Order]) -> i64 {
    orders_for_item(item, orders)
        .iter()
        .map(|order| parse_quantity(order.item_quantity.as_deref(), 0))
        .sum()
}

/// Units sold multiplied by the item's unit price; 0.0 for unpriced items
pub fn total_sales_value(item: &CatalogItem, orders: &[Order]) -> f64 {
    let unit_price = item.unit_price.as_ref().map_or(0.0, |m| m.amount);
    total_quantity_sold(item, orders) as f64 * unit_price
}

/// The catalog item with the highest total quantity sold.
///
/// Ties resolve to whichever item appears later in the catalog collection:
/// the ranking is an ascending stable sort by volume and the last entry
/// wins. Callers depend on that tie-break; do not swap in a max-by scan.
pub fn most_popular_item<'a>(
    catalog: &'a [CatalogItem],
    orders: &[Order],
) -> Option<&'a CatalogItem> {
    let mut ranked: Vec<(&CatalogItem, i64)> = catalog
        .iter()
        .map(|item| (item, total_quantity_sold(item, orders)))
        .collect();

    ranked.sort_by_key(|&(_, volume)| volume);
    let winner = ranked.last().map(|&(item, _)| item);
    if let Some(item) = winner {
        trace!(item = %item.id, "selected most popular item");
    }
    winner
}

/// Average order revenue for the customer.
///
/// A customer with no orders divides by zero and yields NaN; callers
/// ranking by CLV must filter zero-order customers first (see
/// [`top_customers_by_clv`]).
pub fn customer_lifetime_value(customer: &Customer, orders: &[Order]) -> f64 {
    let customer_orders = orders_for_customer(customer, orders);
    let revenue: f64 = customer_orders
        .iter()
        .map(|order| order.money.as_ref().map_or(0.0, |m| m.amount))
        .sum();
    revenue / customer_orders.len() as f64
}

/// A customer paired with their lifetime value
#[derive(Debug, Clone)]
pub struct CustomerValue<'a> {
    pub customer: &'a Customer,
    pub clv: f64,
}

/// The `limit` customers with the highest lifetime value, descending.
/// Customers without orders are excluded before ranking so NaN never
/// reaches the comparator.
pub fn top_customers_by_clv<'a>(
    customers: &'a [Customer],
    orders: &[Order],
    limit: usize,
) -> Vec<CustomerValue<'a>> {
    let mut ranked: Vec<CustomerValue<'a>> = customers
        .iter()
        .filter(|customer| !orders_for_customer(customer, orders).is_empty())
        .map(|customer| CustomerValue {
            customer,
            clv: customer_lifetime_value(customer, orders),
        })
        .collect();

    ranked.sort_by(|a, b| b.clv.partial_cmp(&a.clv).unwrap_or(Ordering::Equal));
    ranked.truncate(limit);
    ranked
}

/// The age group most of the item's buyers fall into, as of the supplied
/// date. Ties resolve to the first label reaching the maximum in display
/// order; `None` when no buyer has a recorded birthday.
pub fn most_common_age_group_among_buyers(
    item: &CatalogItem,
    orders: &[Order],
    customers: &[Customer],
    as_of: NaiveDate,
) -> Option<AgeBucket> {
    let birthdays: Vec<NaiveDate> = customers_for_item(item, orders, customers)
        .iter()
        .filter_map(|customer| customer.birthday)
        .collect();

    bucket_ages(&birthdays, as_of).most_common()
}

/// Sort direction for ranking tables; ascending unless toggled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Comparator for the total-sales ranking column: equal values compare as
/// equal so the surrounding stable sort keeps their input order.
pub fn cmp_by_total_sales(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// One row of the catalog ranking table
#[derive(Debug, Clone)]
pub struct SalesRow<'a> {
    pub item: &'a CatalogItem,
    pub units_sold: i64,
    pub sales_value: f64,
}

/// Catalog rows ranked by total sales value. Ascending by default, with a
/// descending toggle; the sort is stable in both directions.
pub fn rank_by_total_sales<'a>(
    catalog: &'a [CatalogItem],
    orders: &[Order],
    direction: SortDirection,
) -> Vec<SalesRow<'a>> {
    let mut rows: Vec<SalesRow<'a>> = catalog
        .iter()
        .map(|item| SalesRow {
            item,
            units_sold: total_quantity_sold(item, orders),
            sales_value: total_sales_value(item, orders),
        })
        .collect();

    rows.sort_by(|a, b| {
        let ordering = cmp_by_total_sales(a.sales_value, b.sales_value);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Money;

    fn item(id: &str, price: f64, variation_ids: &[&str]) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            title: format!("Item {id}"),
            color_hex: "#60a5fa".to_string(),
            unit_price: Some(Money {
                amount: price,
                currency: "USD".to_string(),
            }),
            description: String::new(),
            variation_ids: variation_ids.iter().map(|s| s.to_string()).collect(),
            category: None,
        }
    }

    fn order(id: &str, item_id: &str, quantity: &str) -> Order {
        Order {
            id: id.to_string(),
            created_at: None,
            updated_at: None,
            customer_id: None,
            item_id: Some(item_id.to_string()),
            item_name: None,
            item_quantity: Some(quantity.to_string()),
            money: None,
            source: None,
        }
    }

    fn paid_order(id: &str, customer_id: &str, amount: f64) -> Order {
        Order {
            id: id.to_string(),
            created_at: None,
            updated_at: None,
            customer_id: Some(customer_id.to_string()),
            item_id: None,
            item_name: None,
            item_quantity: None,
            money: Some(Money {
                amount,
                currency: "USD".to_string(),
            }),
            source: None,
        }
    }

    fn customer(id: &str, birthday: Option<NaiveDate>) -> Customer {
        Customer {
            id: id.to_string(),
            given_name: Some(format!("Name-{id}")),
            family_name: None,
            birthday,
            created_at: None,
            email: format!("{id}@example.com"),
            address: None,
            locality: None,
            postal_code: None,
            country: None,
        }
    }

    #[test]
    fn quantity_and_sales_value_follow_the_scenario() {
        let a = item("A", 10.0, &["v1"]);
        let b = item("B", 5.0, &["v2"]);
        let orders = vec![order("o1", "v1", "3"), order("o2", "v2", "10")];

        assert_eq!(total_quantity_sold(&a, &orders), 3);
        assert_eq!(total_quantity_sold(&b, &orders), 10);
        assert_eq!(total_sales_value(&a, &orders), 30.0);
        assert_eq!(total_sales_value(&b, &orders), 50.0);

        let catalog = [a, b];
        let popular = most_popular_item(&catalog, &orders).unwrap();
        assert_eq!(popular.id, "B");
    }

    #[test]
    fn unparseable_quantity_contributes_zero_volume() {
        let a = item("A", 10.0, &["v1"]);
        let orders = vec![order("o1", "v1", "abc"), order("o2", "v1", "2")];
        assert_eq!(total_quantity_sold(&a, &orders), 2);
    }

    #[test]
    fn popularity_tie_goes_to_the_later_item() {
        let a = item("A", 10.0, &["v1"]);
        let b = item("B", 5.0, &["v2"]);
        let orders = vec![order("o1", "v1", "4"), order("o2", "v2", "4")];

        let catalog = [a.clone(), b.clone()];
        let popular = most_popular_item(&catalog, &orders).unwrap();
        assert_eq!(popular.id, "B");

        // reversing the catalog flips the winner
        let catalog = [b, a];
        let popular = most_popular_item(&catalog, &orders).unwrap();
        assert_eq!(popular.id, "A");
    }

    #[test]
    fn empty_catalog_has_no_popular_item() {
        assert!(most_popular_item(&[], &[]).is_none());
    }

    #[test]
    fn clv_is_average_order_revenue() {
        let c = customer("c1", None);
        let orders = vec![
            paid_order("o1", "c1", 10.0),
            paid_order("o2", "c1", 20.0),
            paid_order("o3", "c2", 99.0),
        ];
        assert_eq!(customer_lifetime_value(&c, &orders), 15.0);
    }

    #[test]
    fn clv_of_zero_order_customer_is_nan() {
        let c = customer("c1", None);
        assert!(customer_lifetime_value(&c, &[]).is_nan());
    }

    #[test]
    fn top_customers_exclude_zero_order_customers() {
        let customers = vec![
            customer("c1", None),
            customer("c2", None),
            customer("c3", None),
        ];
        let orders = vec![
            paid_order("o1", "c1", 10.0),
            paid_order("o2", "c3", 50.0),
        ];

        let top = top_customers_by_clv(&customers, &orders, 10);
        let ids: Vec<&str> = top.iter().map(|entry| entry.customer.id.as_str()).collect();
        assert_eq!(ids, vec!["c3", "c1"]);

        let top = top_customers_by_clv(&customers, &orders, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].clv, 50.0);
    }

    #[test]
    fn buyer_age_group_joins_item_to_customers() {
        let a = item("A", 10.0, &["v1"]);
        let birthday = NaiveDate::from_ymd_opt(1994, 3, 1).unwrap();
        let customers = vec![
            customer("c1", Some(birthday)),
            customer("c2", None),
        ];
        let mut o1 = order("o1", "v1", "1");
        o1.customer_id = Some("c1".to_string());
        let mut o2 = order("o2", "v1", "1");
        o2.customer_id = Some("c2".to_string());

        let as_of = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bucket = most_common_age_group_among_buyers(&a, &[o1, o2], &customers, as_of);
        assert_eq!(bucket, Some(AgeBucket::From25To34));

        let none = most_common_age_group_among_buyers(&a, &[], &customers, as_of);
        assert_eq!(none, None);
    }

    #[test]
    fn sales_ranking_is_stable_in_both_directions() {
        let a = item("A", 1.0, &["v1"]);
        let b = item("B", 1.0, &["v2"]);
        let c = item("C", 2.0, &["v3"]);
        let catalog = vec![a, b, c];
        let orders = vec![
            order("o1", "v1", "2"),
            order("o2", "v2", "2"),
            order("o3", "v3", "2"),
        ];

        let ascending = rank_by_total_sales(&catalog, &orders, SortDirection::Ascending);
        let ids: Vec<&str> = ascending.iter().map(|row| row.item.id.as_str()).collect();
        // A and B tie at 2.0 and keep input order
        assert_eq!(ids, vec!["A", "B", "C"]);

        let descending = rank_by_total_sales(&catalog, &orders, SortDirection::Descending);
        let ids: Vec<&str> = descending.iter().map(|row| row.item.id.as_str()).collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }
}
