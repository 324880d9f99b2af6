use crate::core::review::BagReview;
use crate::domain::model::{LineItem, ProductKey};
use std::sync::Arc;
use tokio::sync::watch;

/// Basket contents, one entry per unit added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Basket {
    items: Vec<LineItem>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<LineItem>) -> Self {
        Self { items }
    }

    pub fn add(&mut self, item: LineItem) {
        self.items.push(item);
    }

    /// Removes the first unit of `product_id`. Returns false, leaving the
    /// basket untouched, when no such unit exists.
    pub fn remove_one(&mut self, product_id: &str) -> bool {
        let key = ProductKey::from(product_id);
        match self.items.iter().position(|item| item.key() == key) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => {
                tracing::warn!(
                    "Can't remove product (id: {}) as it's not in basket!",
                    product_id
                );
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Shared basket state that publishes a fresh snapshot after every change.
pub struct BasketStore {
    basket: std::sync::Mutex<Basket>,
    sender: watch::Sender<Arc<[LineItem]>>,
}

impl BasketStore {
    pub fn new(basket: Basket) -> Self {
        let (sender, _) = watch::channel(Arc::from(basket.items()));
        Self {
            basket: std::sync::Mutex::new(basket),
            sender,
        }
    }

    /// Applies `change` and publishes the resulting snapshot.
    pub fn update<R>(&self, change: impl FnOnce(&mut Basket) -> R) -> R {
        let mut basket = self
            .basket
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let result = change(&mut *basket);
        let snapshot: Arc<[LineItem]> = Arc::from(basket.items());
        tracing::debug!("Basket changed, {} item(s)", snapshot.len());
        self.sender.send_replace(snapshot);
        result
    }

    pub fn snapshot(&self) -> Arc<[LineItem]> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<[LineItem]>> {
        self.sender.subscribe()
    }
}

impl Default for BasketStore {
    fn default() -> Self {
        Self::new(Basket::new())
    }
}

/// Recomputes the bag review for every snapshot published on `receiver`,
/// starting with the current one. Returns once the store is dropped.
pub async fn watch_reviews<F>(mut receiver: watch::Receiver<Arc<[LineItem]>>, mut on_review: F)
where
    F: FnMut(BagReview),
{
    loop {
        let snapshot = receiver.borrow_and_update().clone();
        on_review(BagReview::from_items(&snapshot));
        if receiver.changed().await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_remove_one_takes_first_matching_unit() {
        let mut basket = Basket::new();
        basket.add(LineItem::new("A", dec!(10)).with_title("first"));
        basket.add(LineItem::new("B", dec!(5)));
        basket.add(LineItem::new("A", dec!(10)).with_title("second"));

        assert!(basket.remove_one("A"));

        assert_eq!(basket.len(), 2);
        assert_eq!(basket.items()[0].product_id.as_deref(), Some("B"));
        assert_eq!(basket.items()[1].title.as_deref(), Some("second"));
    }

    #[test]
    fn test_remove_unknown_product_leaves_basket_unchanged() {
        let mut basket = Basket::from_items(vec![LineItem::new("A", dec!(10))]);
        let before = basket.clone();

        assert!(!basket.remove_one("Z"));
        assert_eq!(basket, before);
    }

    #[test]
    fn test_store_publishes_snapshots() {
        let store = BasketStore::default();
        let mut receiver = store.subscribe();
        assert!(store.snapshot().is_empty());

        store.update(|basket| basket.add(LineItem::new("A", dec!(1))));

        assert!(receiver.has_changed().unwrap());
        assert_eq!(receiver.borrow_and_update().len(), 1);
        assert_eq!(store.snapshot().len(), 1);

        let removed = store.update(|basket| basket.remove_one("A"));
        assert!(removed);
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_watch_reviews_follows_each_snapshot() {
        let store = BasketStore::default();
        let receiver = store.subscribe();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        let watcher = tokio::spawn(watch_reviews(receiver, move |review| {
            let _ = tx.send(review.total);
        }));

        assert_eq!(rx.recv().await, Some(dec!(0)));

        store.update(|basket| {
            basket.add(LineItem::new("A", dec!(10)));
            basket.add(LineItem::new("A", dec!(10)));
        });
        assert_eq!(rx.recv().await, Some(dec!(20)));

        drop(store);
        watcher.await.unwrap();
    }
}
