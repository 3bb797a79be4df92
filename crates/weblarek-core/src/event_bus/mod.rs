//! # Event Bus Module
//!
//! Provides the synchronous publish/subscribe dispatcher that decouples
//! state changes from the views that render them.
//!
//! ## Overview
//!
//! - Publishers emit named events carrying a JSON payload
//! - Subscribers listen to an exact name, a pattern, or everything
//! - Dispatch is synchronous, ordered and re-entrant
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use weblarek_core::event_bus::EventBus;
//!
//! let bus = Rc::new(EventBus::new());
//!
//! // Exact name
//! bus.subscribe("basket:changed", |payload| {
//!     println!("basket: {}", payload);
//!     Ok(())
//! });
//!
//! // Every field of the contacts form
//! bus.subscribe_pattern(r"^contacts\..*:change", |payload| {
//!     println!("contact field: {}", payload);
//!     Ok(())
//! })?;
//!
//! bus.emit("basket:changed", serde_json::json!([]))?;
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
