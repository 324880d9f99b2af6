use bag_checkout::{
    compute_total, group_by_product, BagReview, Basket, BasketStore, CheckoutAvailability,
    LineItem, ProductKey,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn item(id: &str, price: Decimal) -> LineItem {
    LineItem::new(id, price)
}

#[test]
fn test_two_products_three_units() {
    let items = vec![item("A", dec!(10.00)), item("B", dec!(5.00)), item("A", dec!(10.00))];

    let grouped = group_by_product(&items);
    let a = grouped.get(&ProductKey::from("A")).unwrap();
    let b = grouped.get(&ProductKey::from("B")).unwrap();

    assert_eq!(a.len(), 2);
    assert_eq!(b, &items[1..2]);
    assert_eq!(compute_total(&items), dec!(25.00));
}

#[test]
fn test_group_sizes_add_up_for_many_shapes() {
    let shapes: Vec<Vec<&str>> = vec![
        vec![],
        vec!["A"],
        vec!["A", "A", "A"],
        vec!["A", "B", "C"],
        vec!["B", "A", "B", "", "A", "C", ""],
    ];

    for ids in shapes {
        let items: Vec<LineItem> = ids.iter().map(|id| item(id, dec!(1.25))).collect();
        let grouped = group_by_product(&items);

        let sizes: usize = grouped.iter().map(|(_, group)| group.len()).sum();
        assert_eq!(sizes, items.len());
        assert!(grouped.iter().all(|(_, group)| !group.is_empty()));
        assert_eq!(compute_total(&items), dec!(1.25) * Decimal::from(items.len()));
    }
}

#[test]
fn test_bag_follows_basket_changes() {
    let store = BasketStore::new(Basket::from_items(vec![item("A", dec!(10))]));

    let review = BagReview::from_items(&store.snapshot());
    assert_eq!(review.checkout, CheckoutAvailability::Available);
    assert_eq!(review.total, dec!(10));

    store.update(|basket| basket.remove_one("A"));

    let review = BagReview::from_items(&store.snapshot());
    assert_eq!(review.checkout, CheckoutAvailability::Disabled);
    assert_eq!(review.headline, "Your bag is empty.");
    assert!(review.lines.is_empty());
}

#[test]
fn test_json_review_of_missing_id_uses_null_key() {
    let mut anonymous = item("x", dec!(2));
    anonymous.product_id = None;

    let review = BagReview::from_items(&[anonymous]);
    let json = serde_json::to_value(&review).unwrap();

    assert!(json["lines"][0]["product_id"].is_null());
    assert_eq!(json["lines"][0]["quantity"], 1);
}
