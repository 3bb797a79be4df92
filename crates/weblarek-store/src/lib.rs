//! # Web-larek Store
//!
//! Catalog, basket and checkout state for the Web-larek storefront.
//!
//! [`AppState`] owns all storefront data and announces every change on the
//! event bus; [`checkout`] drives submission through a [`StoreApi`] client.

pub mod api;
pub mod app_state;
pub mod checkout;
pub mod events;
pub mod model;

pub use api::{with_cdn, ApiListResponse, StoreApi};
pub use app_state::{AppData, AppState, CheckoutStage};
pub use model::{
    CatalogItem, ContactField, FormErrors, OrderDraft, OrderField, OrderResult, Price,
};
