use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use weblarek_core::{shared_bus, Error, Result, StateError, TransportError};
use weblarek_store::checkout::{cancel_checkout, load_catalog, submit_order};
use weblarek_store::events::{BASKET_CHANGED, FORM_ERRORS_CHANGED};
use weblarek_store::{AppState, CatalogItem, CheckoutStage, OrderDraft, OrderResult, StoreApi};

fn item(id: &str, price: Option<u64>) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        title: format!("Item {}", id),
        description: String::new(),
        category: "хард-скил".to_string(),
        image: format!("/{}.svg", id),
        price,
    }
}

/// In-process stand-in for the HTTP client
struct FakeApi {
    catalog: Vec<CatalogItem>,
    fail_orders: Cell<bool>,
    sent: RefCell<Vec<OrderDraft>>,
}

impl FakeApi {
    fn new(catalog: Vec<CatalogItem>) -> Self {
        Self {
            catalog,
            fail_orders: Cell::new(false),
            sent: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl StoreApi for FakeApi {
    async fn get_items(&self) -> Result<Vec<CatalogItem>> {
        Ok(self.catalog.clone())
    }

    async fn get_item(&self, id: &str) -> Result<CatalogItem> {
        self.catalog
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| {
                TransportError::Rejected {
                    status: 404,
                    message: "NotFound".to_string(),
                }
                .into()
            })
    }

    async fn send_order(&self, order: &OrderDraft) -> Result<OrderResult> {
        self.sent.borrow_mut().push(order.clone());
        if self.fail_orders.get() {
            return Err(TransportError::RequestFailed {
                endpoint: "/order".to_string(),
                reason: "connection reset".to_string(),
            }
            .into());
        }
        Ok(OrderResult {
            id: "28c57cb4-3002-4445-8aa1-2a06a5055ae5".to_string(),
            total: order.total,
        })
    }
}

fn fill_form(state: &AppState) {
    state.set_payment_method("online").expect("set");
    state.set_address("Spb Vosstania 1").expect("set");
    state.set_contact_field("email", "test@test.ru").expect("set");
    state.set_contact_field("phone", "+71234567890").expect("set");
}

#[tokio::test]
async fn test_load_catalog_from_api() {
    let api = FakeApi::new(vec![item("a", Some(100)), item("b", None)]);
    let state = AppState::new(shared_bus());

    let count = load_catalog(&api, &state).await.expect("load");
    assert_eq!(count, 2);
    assert_eq!(state.catalog().len(), 2);

    let single = api.get_item("b").await.expect("item");
    assert_eq!(single.price, None);
    assert!(api.get_item("zzz").await.unwrap_err().is_transport_error());
}

#[tokio::test]
async fn test_submit_order_success_clears_state() {
    let api = FakeApi::new(vec![item("a", Some(100)), item("b", None)]);
    let state = AppState::new(shared_bus());
    load_catalog(&api, &state).await.expect("load");
    state.add_to_basket(item("a", Some(100))).expect("add");
    state.add_to_basket(item("b", None)).expect("add");
    fill_form(&state);
    assert_eq!(state.checkout_stage(), CheckoutStage::Ready);

    let result = submit_order(&api, &state).await.expect("submit");
    assert_eq!(result.total, 100);

    let sent = api.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].items, vec!["a".to_string()]);
    assert_eq!(sent[0].email, "test@test.ru");

    assert_eq!(state.basket_len(), 0);
    assert_eq!(state.order(), OrderDraft::default());
    assert_eq!(state.checkout_stage(), CheckoutStage::Idle);
}

#[tokio::test]
async fn test_submit_order_failure_keeps_draft() {
    let api = FakeApi::new(vec![item("a", Some(100))]);
    api.fail_orders.set(true);
    let state = AppState::new(shared_bus());
    state.add_to_basket(item("a", Some(100))).expect("add");
    fill_form(&state);

    let err = submit_order(&api, &state).await.unwrap_err();
    assert!(err.is_transport_error());
    assert_eq!(state.basket_len(), 1);
    assert_eq!(state.order().address, "Spb Vosstania 1");
    assert_eq!(state.order().phone, "+71234567890");

    // The caller may simply try again
    api.fail_orders.set(false);
    submit_order(&api, &state).await.expect("retry");
    assert_eq!(api.sent.borrow().len(), 2);
    assert_eq!(state.basket_len(), 0);
}

#[tokio::test]
async fn test_accepted_order_survives_failing_basket_observer() {
    let bus = shared_bus();
    let api = FakeApi::new(vec![item("a", Some(100))]);
    let state = AppState::new(Rc::clone(&bus));
    state.add_to_basket(item("a", Some(100))).expect("add");
    fill_form(&state);

    bus.subscribe(BASKET_CHANGED, |_| Err(Error::other("basket view gone")));

    let result = submit_order(&api, &state).await.expect("submit");
    assert_eq!(result.total, 100);
    assert_eq!(api.sent.borrow().len(), 1);
    assert_eq!(state.basket_len(), 0);
    assert!(state.order().is_empty());
}

#[tokio::test]
async fn test_submit_incomplete_form_is_refused() {
    let bus = shared_bus();
    let api = FakeApi::new(vec![item("a", Some(100))]);
    let state = AppState::new(Rc::clone(&bus));
    let announcements = Rc::new(Cell::new(0));
    let counter = Rc::clone(&announcements);
    bus.subscribe(FORM_ERRORS_CHANGED, move |_| {
        counter.set(counter.get() + 1);
        Ok(())
    });
    state.add_to_basket(item("a", Some(100))).expect("add");
    state.set_payment_method("card").expect("set");

    let err = submit_order(&api, &state).await.unwrap_err();
    match err {
        Error::State(StateError::OrderNotReady { reason }) => {
            assert!(reason.contains("Delivery address is required"));
            assert!(reason.contains("Email is required"));
        }
        other => panic!("unexpected error: {other}"),
    }
    // One from the setter, one per validated step
    assert_eq!(announcements.get(), 3);
    assert!(api.sent.borrow().is_empty());
    assert_eq!(state.basket_len(), 1);
}

#[tokio::test]
async fn test_submit_priceless_only_basket_is_refused() {
    let api = FakeApi::new(vec![item("b", None)]);
    let state = AppState::new(shared_bus());
    state.add_to_basket(item("b", None)).expect("add");
    fill_form(&state);

    let err = submit_order(&api, &state).await.unwrap_err();
    assert!(matches!(err, Error::State(StateError::EmptyOrder)));
    assert!(api.sent.borrow().is_empty());
    assert_eq!(state.basket_len(), 1);
}

#[test]
fn test_cancel_checkout() {
    let state = AppState::new(shared_bus());
    state.add_to_basket(item("a", Some(1))).expect("add");
    fill_form(&state);

    cancel_checkout(&state).expect("cancel");
    assert_eq!(state.basket_len(), 0);
    assert!(state.order().is_empty());
}
