//! Checkout flow between the application state and the store API.
//!
//! A session moves Idle -> Editing -> Ready -> Submitted -> Idle. A failed
//! submission leaves the basket and the draft untouched, so the session is
//! back in Editing with everything the user typed. Nothing is retried.
//!
//! Like every state operation, `load_catalog` and `cancel_checkout` return
//! the error of a failing observer after the change has been applied.

use weblarek_core::{Result, StateError};

use crate::api::StoreApi;
use crate::app_state::AppState;
use crate::model::OrderResult;

/// Fetches the catalog and loads it into `state`.
///
/// Returns the number of items loaded.
pub async fn load_catalog<A: StoreApi + ?Sized>(api: &A, state: &AppState) -> Result<usize> {
    let items = api.get_items().await?;
    let count = items.len();
    state.load_catalog(items)?;
    Ok(count)
}

/// Validates, finalizes and submits the current order.
///
/// Both form steps are validated first, so the announced error map covers
/// every field. On success the basket and draft are cleared.
///
/// An `Err` always means the order was not accepted and the draft is kept.
/// Once the server has accepted the order the result is `Ok`, even when an
/// observer of the cleared basket fails; that failure is only logged.
pub async fn submit_order<A: StoreApi + ?Sized>(api: &A, state: &AppState) -> Result<OrderResult> {
    let payment_valid = state.validate_payment_form()?;
    let contacts_valid = state.validate_contact_form()?;
    if !(payment_valid && contacts_valid) {
        let reason = state
            .form_errors()
            .into_values()
            .collect::<Vec<_>>()
            .join("; ");
        return Err(StateError::OrderNotReady { reason }.into());
    }

    let order = state.finalize_order_draft();
    if order.items.is_empty() {
        return Err(StateError::EmptyOrder.into());
    }

    match api.send_order(&order).await {
        Ok(result) => {
            tracing::info!(
                "Order {} accepted: {} item(s), total {}",
                result.id,
                order.items.len(),
                result.total
            );
            if let Err(e) = state.clear_order() {
                tracing::warn!("Order {} accepted, basket observer failed: {}", result.id, e);
            }
            Ok(result)
        }
        Err(e) => {
            tracing::warn!("Order submission failed, draft kept: {}", e);
            Err(e)
        }
    }
}

/// Abandons the checkout session.
pub fn cancel_checkout(state: &AppState) -> Result<()> {
    state.clear_order()
}
