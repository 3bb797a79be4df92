//! Basket operations.

use weblarek_core::{Observable, Result};

use super::AppState;
use crate::events::BASKET_CHANGED;
use crate::model::{CatalogItem, OrderDraft, Price};

impl AppState {
    /// Appends `item` to the basket. No duplicate check is made here.
    pub fn add_to_basket(&self, item: CatalogItem) -> Result<()> {
        tracing::debug!("Adding {} to basket", item.id);
        let basket = self.model.update(|data| {
            data.basket.push(item);
            data.sync_order();
            data.basket.clone()
        });
        self.announce(BASKET_CHANGED, &basket)?;
        Ok(())
    }

    /// Removes every basket entry with `id`.
    ///
    /// The change is announced even when nothing matched.
    pub fn remove_from_basket(&self, id: &str) -> Result<()> {
        let basket = self.model.update(|data| {
            data.basket.retain(|item| item.id != id);
            data.sync_order();
            data.basket.clone()
        });
        self.announce(BASKET_CHANGED, &basket)?;
        Ok(())
    }

    /// Sum of basket prices; priceless items count as zero.
    pub fn basket_total(&self) -> Price {
        self.model.read(|data| basket_total(&data.basket))
    }

    /// Whether an item with the same id is in the basket.
    pub fn is_selected(&self, item: &CatalogItem) -> bool {
        self.model
            .read(|data| data.basket.iter().any(|entry| entry.id == item.id))
    }

    /// Empties the basket and resets the draft, then announces the empty
    /// basket once.
    ///
    /// Both resets happen before the announcement, so no observer can see
    /// an empty basket next to a stale draft.
    pub fn clear_order(&self) -> Result<()> {
        tracing::debug!("Clearing basket and order draft");
        self.model.update(|data| {
            data.basket.clear();
            data.order = OrderDraft::default();
        });
        self.announce(BASKET_CHANGED, &Vec::<CatalogItem>::new())?;
        Ok(())
    }
}

pub(super) fn basket_total(basket: &[CatalogItem]) -> Price {
    basket
        .iter()
        .filter_map(|item| item.price)
        .fold(0, Price::saturating_add)
}
