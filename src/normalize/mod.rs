//! Record Normalizer
//!
//! Converts raw provider payloads into the three canonical collections.
//! Normalization is partial-failure tolerant at the collection level and
//! fail-fast at the record level: a record missing its required id becomes
//! a [`RejectedRecord`] and never reaches the output, while every other
//! record normalizes independently.
//!
//! Minor-unit amounts (cents) convert to major-unit floats here, once, so
//! downstream arithmetic never sees provider units. Missing optional fields
//! stay `None`; "no data" is distinguishable from "zero value".

pub mod raw;

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::error::StorelensError;
use crate::types::{CatalogItem, Customer, Money, Order};

use raw::{
    RawCatalogResponse, RawCustomersResponse, RawMoney, RawObjectType, RawOrdersResponse,
};

/// Outcome of normalizing one collection: the records that normalized
/// cleanly plus the ones that were rejected.
#[derive(Debug)]
pub struct Normalized<T> {
    /// Successfully normalized records, in provider order
    pub records: Vec<T>,
    /// Records rejected during normalization
    pub rejects: Vec<RejectedRecord>,
}

/// A record that failed normalization, with its position in the raw payload
#[derive(Debug)]
pub struct RejectedRecord {
    /// Index of the record in the provider's list
    pub index: usize,
    /// Why the record was rejected
    pub error: StorelensError,
}

fn reject(kind: &'static str, index: usize) -> RejectedRecord {
    RejectedRecord {
        index,
        error: StorelensError::MalformedRecord {
            kind,
            index,
            field: "id",
        },
    }
}

/// Convert a provider minor-unit amount to major units
fn to_major_units(raw: &RawMoney) -> Money {
    Money {
        amount: raw.amount as f64 / 100.0,
        currency: raw.currency.clone(),
    }
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_birthday(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

fn missing_id(id: &Option<String>) -> bool {
    id.as_deref().map_or(true, |s| s.is_empty())
}

/// Normalize a catalog list response into [`CatalogItem`] records.
///
/// Runs the provider's three-way split in order: category names are
/// collected first, then items are built (the first variation's price
/// becomes the unit price), then standalone variation objects attach to
/// their owning items in payload order. Variation objects without an id or
/// an owning item id are dangling references and are skipped.
pub fn normalize_catalog(response: &RawCatalogResponse) -> Normalized<CatalogItem> {
    let mut records: Vec<CatalogItem> = Vec::new();
    let mut rejects = Vec::new();

    let mut categories: HashMap<&str, &str> = HashMap::new();
    for object in &response.objects {
        if object.object_type == RawObjectType::Category {
            if let (Some(id), Some(data)) = (object.id.as_deref(), object.category_data.as_ref()) {
                categories.insert(id, &data.name);
            }
        }
    }

    let mut variations: Vec<(&str, &str)> = Vec::new();

    for (index, object) in response.objects.iter().enumerate() {
        match object.object_type {
            RawObjectType::Item => {
                let Some(data) = object.item_data.as_ref() else {
                    continue;
                };
                if missing_id(&object.id) {
                    rejects.push(reject("catalog item", index));
                    continue;
                }

                let unit_price = data
                    .variations
                    .first()
                    .and_then(|v| v.item_variation_data.as_ref())
                    .and_then(|v| v.price_money.as_ref())
                    .map(to_major_units);

                let category = data
                    .category_id
                    .as_deref()
                    .and_then(|id| categories.get(id))
                    .map(|name| name.to_string());

                records.push(CatalogItem {
                    id: object.id.clone().unwrap_or_default(),
                    title: data.name.clone().unwrap_or_default(),
                    color_hex: format!("#{}", data.label_color.as_deref().unwrap_or_default()),
                    unit_price,
                    description: data.description_plaintext.clone().unwrap_or_default(),
                    variation_ids: Vec::new(),
                    category,
                });
            }
            RawObjectType::ItemVariation => {
                let item_id = object
                    .item_variation_data
                    .as_ref()
                    .and_then(|v| v.item_id.as_deref());
                if let (Some(variation_id), Some(item_id)) = (object.id.as_deref(), item_id) {
                    variations.push((variation_id, item_id));
                }
            }
            RawObjectType::Category | RawObjectType::Other => {}
        }
    }

    // Attach after the scan so a variation listed ahead of its item still
    // resolves; variations referencing no known item are dangling and skipped
    for (variation_id, item_id) in variations {
        if let Some(item) = records.iter_mut().find(|item| item.id == item_id) {
            item.variation_ids.push(variation_id.to_string());
        }
    }

    debug!(
        items = records.len(),
        rejected = rejects.len(),
        "normalized catalog"
    );
    Normalized { records, rejects }
}

/// Normalize an orders search response into [`Order`] records.
///
/// Only the first line item contributes the item reference, name and
/// quantity; the order-level total becomes the order's money.
pub fn normalize_orders(response: &RawOrdersResponse) -> Normalized<Order> {
    let mut records = Vec::new();
    let mut rejects = Vec::new();

    for (index, raw) in response.orders.iter().enumerate() {
        if missing_id(&raw.id) {
            rejects.push(reject("order", index));
            continue;
        }

        let first_line = raw.line_items.first();

        records.push(Order {
            id: raw.id.clone().unwrap_or_default(),
            created_at: parse_timestamp(raw.created_at.as_deref()),
            updated_at: parse_timestamp(raw.updated_at.as_deref()),
            customer_id: raw.customer_id.clone(),
            item_id: first_line.and_then(|line| line.catalog_object_id.clone()),
            item_name: first_line.and_then(|line| line.name.clone()),
            item_quantity: first_line.and_then(|line| line.quantity.clone()),
            money: raw.total_money.as_ref().map(to_major_units),
            source: raw.source.as_ref().and_then(|s| s.name.clone()),
        });
    }

    debug!(
        orders = records.len(),
        rejected = rejects.len(),
        "normalized orders"
    );
    Normalized { records, rejects }
}

/// Normalize a customers list response into [`Customer`] records.
///
/// A birthday that is not a valid `YYYY-MM-DD` date normalizes to `None`;
/// absence of data, not an error.
pub fn normalize_customers(response: &RawCustomersResponse) -> Normalized<Customer> {
    let mut records = Vec::new();
    let mut rejects = Vec::new();

    for (index, raw) in response.customers.iter().enumerate() {
        if missing_id(&raw.id) {
            rejects.push(reject("customer", index));
            continue;
        }

        records.push(Customer {
            id: raw.id.clone().unwrap_or_default(),
            given_name: raw.given_name.clone(),
            family_name: raw.family_name.clone(),
            birthday: parse_birthday(raw.birthday.as_deref()),
            created_at: parse_timestamp(raw.created_at.as_deref()),
            email: raw.email_address.clone().unwrap_or_default(),
            address: raw.address.as_ref().and_then(|a| a.address_line_1.clone()),
            locality: raw.address.as_ref().and_then(|a| a.locality.clone()),
            postal_code: raw.address.as_ref().and_then(|a| a.postal_code.clone()),
            country: raw.address.as_ref().and_then(|a| a.country.clone()),
        });
    }

    debug!(
        customers = records.len(),
        rejected = rejects.len(),
        "normalized customers"
    );
    Normalized { records, rejects }
}
