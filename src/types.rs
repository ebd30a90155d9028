//! Core record types for Storelens
//!
//! The three canonical collections (catalog items, orders, customers) are
//! immutable snapshots: the fetch layer replaces them wholesale on every
//! refresh, and every derived dataset is recomputed from scratch.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a catalog item
pub type ItemId = String;

/// Unique identifier for an order
pub type OrderId = String;

/// Unique identifier for a customer
pub type CustomerId = String;

/// Provider-side sub-identifier of a catalog item (a specific SKU).
/// Orders reference variations, not items directly.
pub type VariationId = String;

/// A monetary amount in major units (e.g. dollars), already converted from
/// the provider's minor-unit integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in major units, kept as an exact float for downstream
    /// arithmetic
    pub amount: f64,
    /// ISO currency code (e.g. "USD")
    pub currency: String,
}

impl Money {
    /// Display string for tables and prompts, e.g. `"USD 12.50"`
    pub fn display(&self) -> String {
        format!("{} {:.2}", self.currency, self.amount)
    }
}

/// A product in the store catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique identifier
    pub id: ItemId,
    /// Product title
    pub title: String,
    /// Label color as a hex string (e.g. "#60a5fa")
    pub color_hex: String,
    /// Unit price taken from the item's first variation, if priced
    pub unit_price: Option<Money>,
    /// Plain-text description
    pub description: String,
    /// Variation ids belonging to this item, in provider order.
    /// A variation belongs to at most one item.
    #[serde(default)]
    pub variation_ids: Vec<VariationId>,
    /// Category name, when the item is categorized
    pub category: Option<String>,
}

/// A single order placed against the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier
    pub id: OrderId,
    /// When the order was created. Orders without a creation time are
    /// excluded from all time-series buckets.
    pub created_at: Option<DateTime<Utc>>,
    /// When the order was last updated
    pub updated_at: Option<DateTime<Utc>>,
    /// The purchasing customer, when known
    pub customer_id: Option<CustomerId>,
    /// The purchased variation id. This is a variation id, not a catalog
    /// item id; a dangling reference degrades to "unattributed".
    pub item_id: Option<VariationId>,
    /// Line-item name as recorded by the provider
    pub item_name: Option<String>,
    /// String-encoded quantity. Non-numeric values are substituted per call
    /// site, never an error.
    pub item_quantity: Option<String>,
    /// Order total
    pub money: Option<Money>,
    /// Sales channel (e.g. "Online Store")
    pub source: Option<String>,
}

/// A store customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: CustomerId,
    /// First name
    pub given_name: Option<String>,
    /// Last name
    pub family_name: Option<String>,
    /// Date of birth; assumed to be in the past when present
    pub birthday: Option<NaiveDate>,
    /// When the customer record was created
    pub created_at: Option<DateTime<Utc>>,
    /// Contact email
    pub email: String,
    /// Street address
    pub address: Option<String>,
    /// City or town
    pub locality: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// Country code
    pub country: Option<String>,
}
