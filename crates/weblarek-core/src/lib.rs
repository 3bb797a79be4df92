//! # Web-larek Core
//!
//! Core types and abstractions for the Web-larek storefront.
//! Provides the event bus, the observable model base every state holder is
//! built on, and the error taxonomy shared by all crates.

pub mod error;
pub mod event_bus;
pub mod observable;
pub mod types;

pub use error::{BusError, Error, Result, StateError, TransportError};

// Re-export event bus for convenience
pub use event_bus::{merge_payload, Event, EventBus, EventKey, SubscriptionId};

pub use observable::{Model, Observable};

// Re-export type aliases for convenience
pub use types::{shared, shared_bus, Shared, SharedBus, Trigger};
