//! Event names announced by the application state, and their payloads.
//!
//! Views subscribe to these names and re-render from the payload alone.

use serde::{Deserialize, Serialize};

use crate::model::{CatalogItem, FormErrors};

/// Catalog replaced; payload: [`CatalogChanged`]
pub const CATALOG_CHANGED: &str = "items:changed";
/// Item opened in the detail view; payload: [`CatalogItem`]
pub const PREVIEW_CHANGED: &str = "preview:changed";
/// Basket contents changed; payload: the full basket as `[CatalogItem]`
pub const BASKET_CHANGED: &str = "basket:changed";
/// Form errors recomputed; payload: the full [`FormErrors`] map
pub const FORM_ERRORS_CHANGED: &str = "formErrors:change";

/// Payload of [`CATALOG_CHANGED`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogChanged {
    pub catalog: Vec<CatalogItem>,
}

/// Payload of [`FORM_ERRORS_CHANGED`]
pub type FormErrorsChanged = FormErrors;
