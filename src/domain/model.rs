use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use url::Url;

/// One unit of a product in the basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "_id", alias = "productId", default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    #[serde(rename = "price", alias = "unitPrice", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<serde_json::Value>,

    /// Fields the checkout never reads, passed back to the session API as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl LineItem {
    pub fn new(product_id: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            product_id: Some(product_id.into()),
            unit_price,
            title: None,
            image: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn key(&self) -> ProductKey {
        match self.product_id.as_deref() {
            Some(id) if !id.is_empty() => ProductKey::Id(id.to_string()),
            _ => ProductKey::Missing,
        }
    }
}

/// Grouping key of a line item.
///
/// An absent `_id` and an empty one are both `Missing` and land in one group:
/// neither names a product, so the bag shows them as a single "undefined" line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProductKey {
    Id(String),
    Missing,
}

impl ProductKey {
    pub fn as_str(&self) -> &str {
        match self {
            ProductKey::Id(id) => id,
            ProductKey::Missing => "undefined",
        }
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ProductKey {
    fn from(id: &str) -> Self {
        if id.is_empty() {
            ProductKey::Missing
        } else {
            ProductKey::Id(id.to_string())
        }
    }
}

impl Serialize for ProductKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProductKey::Id(id) => serializer.serialize_some(id),
            ProductKey::Missing => serializer.serialize_none(),
        }
    }
}

/// Line items bucketed by product, groups kept in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedBasket {
    groups: Vec<(ProductKey, Vec<LineItem>)>,
    index: HashMap<ProductKey, usize>,
}

impl GroupedBasket {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, item: &LineItem) {
        let key = item.key();
        match self.index.get(&key) {
            Some(&slot) => self.groups[slot].1.push(item.clone()),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push((key, vec![item.clone()]));
            }
        }
    }

    pub fn get(&self, key: &ProductKey) -> Option<&[LineItem]> {
        self.index
            .get(key)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &ProductKey> {
        self.groups.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductKey, &[LineItem])> {
        self.groups.iter().map(|(key, items)| (key, items.as_slice()))
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of line items across all groups.
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|(_, items)| items.len()).sum()
    }
}

/// Opaque handle for one initiated payment attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Where the user is sent to pay for a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedirectTarget {
    pub session_id: String,
    pub url: Url,
}
