//! Product records as served by the catalog API.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A purchasable product.
///
/// Field names follow the catalog API's JSON. `cost` accepts a JSON number or
/// a numeric string. A missing or null `description` reads as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub product_id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Unit cost in the store currency.
    pub cost: Decimal,
    /// Image path relative to the asset host.
    #[serde(default)]
    pub image_filename: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Product {
    /// Unit price for display.
    #[must_use]
    pub fn price(&self) -> Price {
        Price::usd(self.cost)
    }
}
