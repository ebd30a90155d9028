//! Raw provider payload shapes
//!
//! Serde mirrors of the commerce provider's JSON responses, kept separate
//! from the canonical types so the aggregation engines never see provider
//! field names or minor-unit amounts. Every field the provider may omit is
//! optional here; the normalizer decides what absence means.

use serde::Deserialize;

use crate::error::Result;

/// A minor-unit money value as the provider sends it (e.g. cents)
#[derive(Debug, Clone, Deserialize)]
pub struct RawMoney {
    pub amount: i64,
    pub currency: String,
}

/// Catalog list response: a flat list of typed objects
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCatalogResponse {
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub objects: Vec<RawCatalogObject>,
}

impl RawCatalogResponse {
    /// Parse a catalog list response from its JSON body
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Discriminator for catalog list entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RawObjectType {
    #[serde(rename = "ITEM")]
    Item,
    #[serde(rename = "ITEM_VARIATION")]
    ItemVariation,
    #[serde(rename = "CATEGORY")]
    Category,
    #[serde(other)]
    Other,
}

/// One entry of the catalog list. Which payload field is populated depends
/// on `object_type`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCatalogObject {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub object_type: RawObjectType,
    #[serde(default)]
    pub item_data: Option<RawItemData>,
    #[serde(default)]
    pub item_variation_data: Option<RawItemVariationData>,
    #[serde(default)]
    pub category_data: Option<RawCategoryData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawItemData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub label_color: Option<String>,
    #[serde(default)]
    pub description_plaintext: Option<String>,
    #[serde(default)]
    pub variations: Vec<RawItemVariation>,
}

/// A variation nested inside an `ITEM` object
#[derive(Debug, Clone, Deserialize)]
pub struct RawItemVariation {
    #[serde(default)]
    pub item_variation_data: Option<RawItemVariationData>,
}

/// Variation payload, nested in items and in standalone `ITEM_VARIATION`
/// objects
#[derive(Debug, Clone, Deserialize)]
pub struct RawItemVariationData {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub price_money: Option<RawMoney>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCategoryData {
    pub name: String,
}

/// Orders search response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOrdersResponse {
    #[serde(default)]
    pub orders: Vec<RawOrder>,
}

impl RawOrdersResponse {
    /// Parse an orders search response from its JSON body
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOrder {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub source: Option<RawOrderSource>,
    #[serde(default)]
    pub line_items: Vec<RawLineItem>,
    #[serde(default)]
    pub total_money: Option<RawMoney>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOrderSource {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLineItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub catalog_object_id: Option<String>,
}

/// Customers list response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCustomersResponse {
    #[serde(default)]
    pub customers: Vec<RawCustomer>,
}

impl RawCustomersResponse {
    /// Parse a customers list response from its JSON body
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCustomer {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub address: Option<RawAddress>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAddress {
    #[serde(default)]
    pub address_line_1: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}
