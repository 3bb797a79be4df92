//! # Web-larek
//!
//! Reactive core of the Web-larek storefront:
//! - Synchronous event bus with exact, pattern and catch-all subscriptions
//! - Observable application state for catalog, basket and order draft
//! - Two-step checkout form validation and order submission
//!
//! ## Architecture
//!
//! Web-larek is organized as a workspace with multiple crates:
//!
//! 1. **weblarek-core** - Event bus, observable model base, errors
//! 2. **weblarek-store** - Catalog, basket, order draft, checkout flow
//! 3. **weblarek-settings** - Configuration files
//! 4. **weblarek** - Logging, intent wiring, storefront assembly

pub mod storefront;
pub mod wiring;

pub use storefront::Storefront;
pub use wiring::{intents, wire_intents, FieldChange};

pub use weblarek_core::{
    BusError, Error, Event, EventBus, EventKey, Model, Observable, Result, SharedBus, StateError,
    SubscriptionId, TransportError,
};

pub use weblarek_store::{
    checkout, events, ApiListResponse, AppData, AppState, CatalogItem, CheckoutStage,
    ContactField, FormErrors, OrderDraft, OrderField, OrderResult, Price, StoreApi,
};

pub use weblarek_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Console output
/// - RUST_LOG environment variable support, falling back to `default_level`
pub fn init_logging(default_level: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!("Logging initialized (weblarek {} built {})", VERSION, BUILD_DATE);
    Ok(())
}
