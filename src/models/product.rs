use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Demo product served by `GET /product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// A store deal as scraped into the products table. Price is kept as the
/// store's display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: String,
    pub store: String,
    pub image: String,
    pub category: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub carousel: Vec<String>,
}
