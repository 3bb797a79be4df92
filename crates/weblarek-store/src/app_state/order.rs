//! Order form fields, validation and finalization.
//!
//! Each field setter writes the field and then validates its step as one
//! operation; there is no way to change a field without the matching
//! `formErrors:change` announcement.

use weblarek_core::{Observable, Result};

use super::AppState;
use crate::events::FORM_ERRORS_CHANGED;
use crate::model::{ContactField, OrderDraft, OrderField};

impl AppState {
    /// Sets the delivery address and validates the payment step.
    pub fn set_address(&self, value: impl Into<String>) -> Result<bool> {
        self.write_field(OrderField::Address, value.into());
        self.validate_payment_form()
    }

    /// Sets the payment method and validates the payment step.
    pub fn set_payment_method(&self, value: impl Into<String>) -> Result<bool> {
        self.write_field(OrderField::Payment, value.into());
        self.validate_payment_form()
    }

    /// Sets a contact field by name and validates the contacts step.
    ///
    /// Names other than `email` and `phone` are rejected before anything
    /// is written.
    pub fn set_contact_field(&self, field: &str, value: impl Into<String>) -> Result<bool> {
        let field: ContactField = field.parse()?;
        self.set_contact(field, value)
    }

    /// Typed form of [`AppState::set_contact_field`].
    pub fn set_contact(&self, field: ContactField, value: impl Into<String>) -> Result<bool> {
        self.write_field(field.into(), value.into());
        self.validate_contact_form()
    }

    /// Recomputes the address and payment errors, announces the full error
    /// map and returns whether the payment step is valid.
    pub fn validate_payment_form(&self) -> Result<bool> {
        self.validate_step(&OrderField::PAYMENT_STEP)
    }

    /// Recomputes the email and phone errors, announces the full error map
    /// and returns whether the contacts step is valid.
    pub fn validate_contact_form(&self) -> Result<bool> {
        self.validate_step(&OrderField::CONTACTS_STEP)
    }

    /// Copies purchasable basket ids and the basket total into the draft
    /// and returns the resulting order. Nothing is announced.
    ///
    /// Basket operations keep both in step already; this is the point where
    /// the order leaves the state.
    pub fn finalize_order_draft(&self) -> OrderDraft {
        self.model.update(|data| {
            data.sync_order();
            data.order.clone()
        })
    }

    /// Clears every form field. Nothing is announced.
    ///
    /// `items` and `total` still describe the basket afterwards.
    pub fn reset_order_draft(&self) {
        self.model.update(|data| {
            data.order = OrderDraft::default();
            data.sync_order();
        });
    }

    fn write_field(&self, field: OrderField, value: String) {
        tracing::trace!("Order field {} updated", field);
        self.model.update(|data| data.order.set_field(field, value));
    }

    /// Replaces the error keys of `fields` only; keys of the other step are
    /// kept as they are.
    fn validate_step(&self, fields: &[OrderField]) -> Result<bool> {
        let errors = self.model.update(|data| {
            for field in fields {
                if data.order.field(*field).is_empty() {
                    data.form_errors
                        .insert(*field, field.required_message().to_string());
                } else {
                    data.form_errors.remove(field);
                }
            }
            data.form_errors.clone()
        });
        let valid = fields.iter().all(|field| !errors.contains_key(field));
        self.announce(FORM_ERRORS_CHANGED, &errors)?;
        Ok(valid)
    }
}
