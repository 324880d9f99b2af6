use crate::core::aggregator::{compute_total, group_by_product};
use crate::domain::model::{LineItem, ProductKey};
use crate::utils::formatting::{format_currency, format_unknown_amount};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write;

pub const HEADLINE_WITH_ITEMS: &str = "Review your bag.";
pub const HEADLINE_EMPTY: &str = "Your bag is empty.";
pub const SUBTITLE: &str = "Free delivery and free returns.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutAvailability {
    Available,
    /// Empty bag: offer "Continue Shopping" instead of checkout.
    Disabled,
}

/// One displayed row of the bag: every unit of a product collapsed into a
/// quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductLine {
    pub product_id: ProductKey,
    pub title: Option<String>,
    pub image: Option<serde_json::Value>,
    pub quantity: usize,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// View model of the checkout page for one basket snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BagReview {
    pub headline: &'static str,
    pub subtitle: &'static str,
    pub lines: Vec<ProductLine>,
    pub item_count: usize,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub checkout: CheckoutAvailability,
}

impl BagReview {
    pub fn from_items(items: &[LineItem]) -> Self {
        let grouped = group_by_product(items);
        let lines = grouped
            .iter()
            .filter_map(|(key, group)| {
                let first = group.first()?;
                Some(ProductLine {
                    product_id: key.clone(),
                    title: first.title.clone(),
                    image: first.image.clone(),
                    quantity: group.len(),
                    unit_price: first.unit_price,
                    line_total: compute_total(group),
                })
            })
            .collect();

        let subtotal = compute_total(items);
        let (headline, checkout) = if items.is_empty() {
            (HEADLINE_EMPTY, CheckoutAvailability::Disabled)
        } else {
            (HEADLINE_WITH_ITEMS, CheckoutAvailability::Available)
        };

        Self {
            headline,
            subtitle: SUBTITLE,
            lines,
            item_count: items.len(),
            subtotal,
            // Shipping is free and tax is not estimated.
            total: subtotal,
            checkout,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    pub fn checkout_enabled(&self) -> bool {
        self.checkout == CheckoutAvailability::Available
    }

    /// Plain-text rendering of the bag for terminals.
    pub fn render_text(&self, currency: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.headline);
        let _ = writeln!(out, "{}", self.subtitle);

        if self.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "[Continue Shopping]");
            return out;
        }

        let _ = writeln!(out);
        for line in &self.lines {
            let name = line.title.as_deref().unwrap_or(line.product_id.as_str());
            let _ = writeln!(
                out,
                "{} x{}  {}",
                name,
                line.quantity,
                format_currency(line.line_total, currency)
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Subtotal  {}", format_currency(self.subtotal, currency));
        let _ = writeln!(out, "Shipping  FREE");
        let _ = writeln!(out, "Estimated tax  {}", format_unknown_amount(currency));
        let _ = writeln!(out, "Total  {}", format_currency(self.total, currency));
        out
    }
}
