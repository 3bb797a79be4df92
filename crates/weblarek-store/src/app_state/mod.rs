//! Application state for the storefront.
//!
//! Holds the catalog, the basket, the order draft and the form errors, and
//! is the only place that decides what is purchasable and whether the
//! checkout form is valid.
//!
//! This module is split into submodules:
//! - `basket`: basket membership, totals and clearing
//! - `order`: order form fields, validation and finalization
//!
//! Every mutation ends by announcing on the bus. Accessors return clones,
//! so no caller can change the state without going through an operation.

mod basket;
mod order;

use serde::{Deserialize, Serialize};

use weblarek_core::{Model, Observable, Result, SharedBus};

use crate::events::{CatalogChanged, CATALOG_CHANGED, PREVIEW_CHANGED};
use crate::model::{CatalogItem, FormErrors, OrderDraft};

/// Plain data held by [`AppState`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppData {
    pub catalog: Vec<CatalogItem>,
    pub basket: Vec<CatalogItem>,
    pub order: OrderDraft,
    pub form_errors: FormErrors,
}

impl AppData {
    /// Recomputes the draft's `items` and `total` from the basket.
    pub(crate) fn sync_order(&mut self) {
        self.order.items = self
            .basket
            .iter()
            .filter(|item| item.is_purchasable())
            .map(|item| item.id.clone())
            .collect();
        self.order.total = basket::basket_total(&self.basket);
    }
}

/// Where the current checkout session stands, derived from the draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    /// Nothing entered yet
    Idle,
    /// Some fields entered, form not complete
    Editing,
    /// Every field filled in; submission may proceed
    Ready,
}

/// Observable application state
pub struct AppState {
    model: Model<AppData>,
}

impl AppState {
    /// Creates an empty state bound to `events`.
    pub fn new(events: SharedBus) -> Self {
        Self::with_data(AppData::default(), events)
    }

    /// Creates a state from an initial snapshot.
    ///
    /// The draft's `items` and `total` are recomputed from the basket.
    pub fn with_data(mut data: AppData, events: SharedBus) -> Self {
        data.sync_order();
        Self {
            model: Model::new(data, events),
        }
    }

    /// Replaces the catalog and announces it.
    ///
    /// Basket entries are left as they are, even when the new catalog no
    /// longer lists them.
    pub fn load_catalog(&self, items: Vec<CatalogItem>) -> Result<()> {
        tracing::debug!("Loading catalog of {} item(s)", items.len());
        let catalog = self.model.update(|data| {
            data.catalog = items;
            data.catalog.clone()
        });
        self.announce(CATALOG_CHANGED, &CatalogChanged { catalog })?;
        Ok(())
    }

    /// Announces `item` for the detail view without changing any state.
    pub fn select_for_preview(&self, item: &CatalogItem) -> Result<()> {
        self.announce(PREVIEW_CHANGED, item)?;
        Ok(())
    }

    /// Clone of the current catalog.
    pub fn catalog(&self) -> Vec<CatalogItem> {
        self.model.read(|data| data.catalog.clone())
    }

    /// Looks up a catalog item by id.
    pub fn find_item(&self, id: &str) -> Option<CatalogItem> {
        self.model
            .read(|data| data.catalog.iter().find(|item| item.id == id).cloned())
    }

    /// Clone of the basket, in insertion order.
    pub fn basket(&self) -> Vec<CatalogItem> {
        self.model.read(|data| data.basket.clone())
    }

    /// Number of basket entries, priceless ones included.
    pub fn basket_len(&self) -> usize {
        self.model.read(|data| data.basket.len())
    }

    /// Clone of the order draft.
    pub fn order(&self) -> OrderDraft {
        self.model.read(|data| data.order.clone())
    }

    /// Clone of the current validation errors.
    pub fn form_errors(&self) -> FormErrors {
        self.model.read(|data| data.form_errors.clone())
    }

    /// Clone of everything the state holds.
    pub fn snapshot(&self) -> AppData {
        self.model.snapshot()
    }

    /// Current checkout stage.
    pub fn checkout_stage(&self) -> CheckoutStage {
        self.model.read(|data| {
            if data.order.is_empty() {
                CheckoutStage::Idle
            } else if data.order.is_complete() {
                CheckoutStage::Ready
            } else {
                CheckoutStage::Editing
            }
        })
    }
}

impl Observable for AppState {
    fn events(&self) -> &SharedBus {
        self.model.events()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").field("model", &self.model).finish()
    }
}
