use crate::domain::model::LineItem;
use crate::domain::ports::BasketSource;
use crate::utils::error::Result;
use crate::utils::validation::validate_line_items;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize)]
#[serde(untagged)]
enum BasketSnapshot {
    Items(Vec<LineItem>),
    Wrapped { items: Vec<LineItem> },
}

/// Basket snapshot stored as JSON on local disk: either a bare array of line
/// items or an object with an `items` array.
#[derive(Debug, Clone)]
pub struct LocalBasketFile {
    path: PathBuf,
}

impl LocalBasketFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse(data: &[u8]) -> Result<Vec<LineItem>> {
        let items = match serde_json::from_slice::<BasketSnapshot>(data) {
            Ok(BasketSnapshot::Items(items)) | Ok(BasketSnapshot::Wrapped { items }) => items,
            // Re-parse as a bare array so the error names the offending field.
            Err(_) => serde_json::from_slice::<Vec<LineItem>>(data)?,
        };
        validate_line_items(&items)?;
        Ok(items)
    }
}

impl BasketSource for LocalBasketFile {
    async fn load(&self) -> Result<Vec<LineItem>> {
        tracing::debug!("Loading basket from {}", self.path.display());
        let data = tokio::fs::read(&self.path).await?;
        let items = Self::parse(&data)?;
        tracing::debug!("Loaded {} line item(s)", items.len());
        Ok(items)
    }
}
