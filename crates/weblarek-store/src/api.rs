//! Store API interface.
//!
//! The HTTP client lives outside this crate; it only has to implement
//! [`StoreApi`]. Response shapes are shared here so every client decodes the
//! catalog the same way.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use weblarek_core::Result;

use crate::model::{CatalogItem, OrderDraft, OrderResult};

/// Client for the catalog and order endpoints
///
/// Futures are not required to be `Send`: the storefront runs on a single
/// thread and implementations may hold `Rc` state.
#[async_trait(?Send)]
pub trait StoreApi {
    /// Fetch the whole catalog, image paths already resolved
    async fn get_items(&self) -> Result<Vec<CatalogItem>>;

    /// Fetch a single catalog item
    async fn get_item(&self, id: &str) -> Result<CatalogItem>;

    /// Submit a finalized order
    async fn send_order(&self, order: &OrderDraft) -> Result<OrderResult>;
}

/// List envelope returned by the catalog endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiListResponse<T> {
    pub total: usize,
    pub items: Vec<T>,
}

impl ApiListResponse<CatalogItem> {
    /// Unwrap the items, prefixing every image path with `cdn_url`
    pub fn into_catalog(self, cdn_url: &str) -> Vec<CatalogItem> {
        if self.total != self.items.len() {
            tracing::warn!(
                "Catalog envelope reports {} item(s) but carries {}",
                self.total,
                self.items.len()
            );
        }
        self.items
            .into_iter()
            .map(|item| with_cdn(item, cdn_url))
            .collect()
    }
}

/// Resolve an item's image path against `cdn_url`
pub fn with_cdn(mut item: CatalogItem, cdn_url: &str) -> CatalogItem {
    item.image = format!("{}{}", cdn_url, item.image);
    item
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_catalog_prefixes_images() {
        let response: ApiListResponse<CatalogItem> = serde_json::from_value(json!({
            "total": 2,
            "items": [
                {
                    "id": "a",
                    "title": "Фреймворк куки судьбы",
                    "category": "дополнительное",
                    "image": "/Soft_Flower.svg",
                    "price": 2500
                },
                {
                    "id": "b",
                    "title": "Мамка-таймер",
                    "category": "софт-скил",
                    "image": "/Asterisk_2.svg",
                    "price": null
                }
            ]
        }))
        .expect("response");

        let catalog = response.into_catalog("https://larek-api.nomoreparties.co/content/weblarek");
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog[0].image,
            "https://larek-api.nomoreparties.co/content/weblarek/Soft_Flower.svg"
        );
        assert_eq!(catalog[1].price, None);
    }

    #[test]
    fn test_order_serializes_as_api_body() {
        let order = OrderDraft {
            payment: "online".to_string(),
            address: "Spb Vosstania 1".to_string(),
            email: "test@test.ru".to_string(),
            phone: "+71234567890".to_string(),
            items: vec!["a".to_string()],
            total: 2500,
        };
        assert_eq!(
            serde_json::to_value(&order).expect("json"),
            json!({
                "payment": "online",
                "address": "Spb Vosstania 1",
                "email": "test@test.ru",
                "phone": "+71234567890",
                "items": ["a"],
                "total": 2500
            })
        );
    }
}
