//! Routing of view intents to state operations.
//!
//! Views only emit intents; this module subscribes the application state to
//! them. Form inputs are routed by pattern, one pattern per form step, so
//! new inputs need no new subscriptions.

use serde::Deserialize;
use std::rc::{Rc, Weak};

use weblarek_core::{Observable, Result, StateError, SubscriptionId};
use weblarek_store::{AppState, CatalogItem, OrderField};

/// Intent names and patterns emitted by the views
pub mod intents {
    /// A catalog card was clicked; payload: the item
    pub const CARD_SELECT: &str = "card:select";
    /// "Add to basket" in the detail view; payload: the item
    pub const CARD_ADD: &str = "card:add";
    /// Delete button of a basket row; payload: the item
    pub const CARD_REMOVE: &str = "card:remove";
    /// Payment method button toggled; payload: `{ "value": ... }`
    pub const PAYMENT_CHANGE: &str = "payment:change";
    /// Inputs of the payment step, e.g. `order.address:change`
    pub const ORDER_FIELD_PATTERN: &str = r"^order\..*:change";
    /// Inputs of the contacts step, e.g. `contacts.email:change`
    pub const CONTACTS_FIELD_PATTERN: &str = r"^contacts\..*:change";
}

/// Payload of a form input intent
#[derive(Debug, Clone, Deserialize)]
pub struct FieldChange {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
struct ValueChange {
    value: String,
}

#[derive(Debug, Deserialize)]
struct ItemRef {
    id: String,
}

/// Subscribe `state` to every view intent on its own bus.
///
/// Handlers keep only a weak reference, so the bus does not keep the state
/// alive; intents arriving after the state is dropped are ignored.
pub fn wire_intents(state: &Rc<AppState>) -> Result<Vec<SubscriptionId>> {
    let bus = Rc::clone(state.events());
    let mut ids = Vec::with_capacity(6);

    let weak = Rc::downgrade(state);
    ids.push(bus.on(intents::CARD_SELECT, move |item: CatalogItem| {
        with_state(&weak, |state| state.select_for_preview(&item))
    }));

    let weak = Rc::downgrade(state);
    ids.push(bus.on(intents::CARD_ADD, move |item: CatalogItem| {
        with_state(&weak, |state| state.add_to_basket(item))
    }));

    let weak = Rc::downgrade(state);
    ids.push(bus.on(intents::CARD_REMOVE, move |item: ItemRef| {
        with_state(&weak, |state| state.remove_from_basket(&item.id))
    }));

    let weak = Rc::downgrade(state);
    ids.push(bus.on(intents::PAYMENT_CHANGE, move |change: ValueChange| {
        with_state(&weak, |state| {
            state.set_payment_method(change.value).map(|_| ())
        })
    }));

    let weak = Rc::downgrade(state);
    let key = weblarek_core::EventKey::pattern(intents::ORDER_FIELD_PATTERN)?;
    ids.push(bus.on(key, move |change: FieldChange| {
        with_state(&weak, |state| set_order_field(state, change))
    }));

    let weak = Rc::downgrade(state);
    let key = weblarek_core::EventKey::pattern(intents::CONTACTS_FIELD_PATTERN)?;
    ids.push(bus.on(key, move |change: FieldChange| {
        with_state(&weak, |state| {
            state
                .set_contact_field(&change.field, change.value)
                .map(|_| ())
        })
    }));

    tracing::debug!("Wired {} intent subscription(s)", ids.len());
    Ok(ids)
}

fn set_order_field(state: &AppState, change: FieldChange) -> Result<()> {
    match change.field.parse::<OrderField>()? {
        OrderField::Address => state.set_address(change.value)?,
        OrderField::Payment => state.set_payment_method(change.value)?,
        OrderField::Email | OrderField::Phone => {
            return Err(StateError::UnknownField {
                field: format!("order.{}", change.field),
            }
            .into())
        }
    };
    Ok(())
}

fn with_state(weak: &Weak<AppState>, f: impl FnOnce(&AppState) -> Result<()>) -> Result<()> {
    match weak.upgrade() {
        Some(state) => f(&state),
        None => {
            tracing::trace!("Intent ignored, state dropped");
            Ok(())
        }
    }
}
