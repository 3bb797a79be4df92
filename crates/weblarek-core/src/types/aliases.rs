//! Type aliases for commonly used complex types.
//!
//! The storefront core is single-threaded: state is shared with `Rc` and
//! mutated through `RefCell`, never through locks.

use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::event_bus::EventBus;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// # Example
/// ```rust,ignore
/// let log: Shared<Vec<String>> = shared(Vec::new());
/// log.borrow_mut().push("basket:changed".into());
/// ```
pub type Shared<T> = Rc<RefCell<T>>;

/// The bus handle every observable component holds.
pub type SharedBus = Rc<EventBus>;

/// A bound emitter as returned by [`EventBus::create_trigger`].
pub type Trigger = Box<dyn Fn(Value) -> Result<usize>>;

/// Create a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Create a new `SharedBus` with an empty registry.
#[inline]
pub fn shared_bus() -> SharedBus {
    Rc::new(EventBus::new())
}
