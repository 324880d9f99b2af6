use crate::domain::model::{GroupedBasket, LineItem};
use rust_decimal::Decimal;

/// Buckets items by product in a single ordered pass.
///
/// Groups appear in first-occurrence order and keep the input order of their
/// items. Items without a product id all land in the `ProductKey::Missing`
/// group.
pub fn group_by_product(items: &[LineItem]) -> GroupedBasket {
    let mut grouped = GroupedBasket::new();
    for item in items {
        grouped.push(item);
    }
    grouped
}

/// Exact sum of unit prices; zero for an empty basket.
///
/// Saturates at `Decimal::MAX` instead of overflowing. Snapshots read through
/// `LocalBasketFile` are rejected before they can get there.
pub fn compute_total(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |total, item| total.saturating_add(item.unit_price))
}
