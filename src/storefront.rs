//! Assembly of the bus, the application state and the intent wiring.

use std::rc::Rc;

use weblarek_core::{shared_bus, SharedBus, SubscriptionId};
use weblarek_settings::Config;
use weblarek_store::{ApiListResponse, AppState, CatalogItem};

use crate::wiring::wire_intents;

/// A fully wired storefront core
///
/// Views subscribe to [`Storefront::events`] and emit their intents there;
/// the transport hands catalog responses to
/// [`Storefront::apply_catalog_response`] and drives checkout through
/// [`weblarek_store::checkout`] with [`Storefront::state`].
pub struct Storefront {
    config: Config,
    events: SharedBus,
    state: Rc<AppState>,
    subscriptions: Vec<SubscriptionId>,
}

impl Storefront {
    /// Build the storefront from a validated configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;

        let events = shared_bus();
        if config.events.log_all_events {
            events.log_all();
        }

        let state = Rc::new(AppState::new(Rc::clone(&events)));
        let subscriptions = wire_intents(&state)?;
        tracing::info!(
            "Storefront ready, {} intent subscription(s)",
            subscriptions.len()
        );

        Ok(Self {
            config,
            events,
            state,
            subscriptions,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn events(&self) -> &SharedBus {
        &self.events
    }

    pub fn state(&self) -> &Rc<AppState> {
        &self.state
    }

    /// Subscriptions created by the intent wiring
    pub fn subscriptions(&self) -> &[SubscriptionId] {
        &self.subscriptions
    }

    /// Resolve image paths against the configured CDN and load the catalog.
    pub fn apply_catalog_response(
        &self,
        response: ApiListResponse<CatalogItem>,
    ) -> weblarek_core::Result<()> {
        let catalog = response.into_catalog(&self.config.api.cdn_url);
        self.state.load_catalog(catalog)
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("events", &self.events)
            .field("basket_len", &self.state.basket_len())
            .finish()
    }
}
