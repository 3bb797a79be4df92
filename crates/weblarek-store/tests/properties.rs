use proptest::prelude::*;
use std::rc::Rc;

use weblarek_core::shared_bus;
use weblarek_store::{AppState, CatalogItem};

#[derive(Debug, Clone)]
enum BasketOp {
    Add(usize),
    Remove(usize),
}

fn catalog() -> Vec<CatalogItem> {
    [Some(750), Some(2500), None, Some(0), Some(1450), None]
        .into_iter()
        .enumerate()
        .map(|(i, price)| CatalogItem {
            id: format!("item-{}", i),
            title: format!("Item {}", i),
            description: String::new(),
            category: "софт-скил".to_string(),
            image: format!("/{}.svg", i),
            price,
        })
        .collect()
}

fn op_strategy(len: usize) -> impl Strategy<Value = BasketOp> {
    prop_oneof![
        (0..len).prop_map(BasketOp::Add),
        (0..len).prop_map(BasketOp::Remove),
    ]
}

proptest! {
    #[test]
    fn prop_total_depends_only_on_contents(ops in prop::collection::vec(op_strategy(6), 0..40)) {
        let items = catalog();
        let state = AppState::new(shared_bus());
        state.load_catalog(items.clone()).unwrap();

        for op in ops {
            match op {
                BasketOp::Add(i) => {
                    state.add_to_basket(items[i].clone()).unwrap();
                    prop_assert!(state.is_selected(&items[i]));
                }
                BasketOp::Remove(i) => {
                    state.remove_from_basket(&items[i].id).unwrap();
                    prop_assert!(!state.is_selected(&items[i]));
                }
            }

            let basket = state.basket();
            let expected: u64 = basket.iter().filter_map(|item| item.price).sum();
            prop_assert_eq!(state.basket_total(), expected);
            prop_assert_eq!(state.order().total, expected);
        }

        // Rebuilding the same contents from scratch gives the same total
        let rebuilt = AppState::new(Rc::new(weblarek_core::EventBus::new()));
        for entry in state.basket() {
            rebuilt.add_to_basket(entry).unwrap();
        }
        prop_assert_eq!(rebuilt.basket_total(), state.basket_total());

        let order = state.finalize_order_draft();
        prop_assert_eq!(order.total, state.basket_total());
        prop_assert!(order
            .items
            .iter()
            .all(|id| items.iter().any(|item| &item.id == id && item.price.is_some())));
    }
}
