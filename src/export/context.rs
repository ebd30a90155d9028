//! Flattened context serialization
//!
//! Renders the three collections as a compact pipe-delimited text block for
//! inclusion in assistant prompts. Each section is capped so a large store
//! cannot blow out the prompt budget; missing optional fields render as
//! `-` rather than disappearing, keeping columns aligned.

use crate::types::{CatalogItem, Customer, Order};

/// Default per-section record cap
pub const DEFAULT_CONTEXT_LIMIT: usize = 15;

fn opt(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Serialize catalog, customers and orders into the assistant context
/// block. Each section carries a header naming its fields followed by at
/// most `limit` pipe-delimited rows.
pub fn build_context(
    catalog: &[CatalogItem],
    customers: &[Customer],
    orders: &[Order],
    limit: usize,
) -> String {
    let mut out = String::new();

    out.push_str(
        "List of store products with fields {id, variationIds, title, description, price, category}:\n",
    );
    for item in catalog.iter().take(limit) {
        let price = item
            .unit_price
            .as_ref()
            .map(|money| money.display())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{} | {} | {} | {} | {} | {}\n",
            item.id,
            item.variation_ids.join(","),
            item.title,
            item.description,
            price,
            opt(item.category.as_deref()),
        ));
    }

    out.push_str(
        "List of store customers with fields {id, givenName, familyName, birthday, email, address, locality, country, postalCode}:\n",
    );
    for customer in customers.iter().take(limit) {
        let birthday = customer
            .birthday
            .map(|date| date.to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{} | {} | {} | {} | {} | {} | {} | {} | {}\n",
            customer.id,
            opt(customer.given_name.as_deref()),
            opt(customer.family_name.as_deref()),
            birthday,
            customer.email,
            opt(customer.address.as_deref()),
            opt(customer.locality.as_deref()),
            opt(customer.country.as_deref()),
            opt(customer.postal_code.as_deref()),
        ));
    }

    out.push_str(
        "List of store orders with fields {createdAt, customerId, itemId, itemName, itemQuantity, price, source}:\n",
    );
    for order in orders.iter().take(limit) {
        let created_at = order
            .created_at
            .map(|ts| ts.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());
        let price = order
            .money
            .as_ref()
            .map(|money| money.display())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{} | {} | {} | {} | {} | {} | {}\n",
            created_at,
            opt(order.customer_id.as_deref()),
            opt(order.item_id.as_deref()),
            opt(order.item_name.as_deref()),
            opt(order.item_quantity.as_deref()),
            price,
            opt(order.source.as_deref()),
        ));
    }

    out
}
