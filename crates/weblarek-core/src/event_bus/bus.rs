//! Event Bus implementation.
//!
//! Provides the core EventBus struct. There is no global instance: the bus is
//! constructed once at startup and shared by `Rc` with every component that
//! publishes or subscribes.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

use super::events::{merge_payload, Event, EventKey};
use crate::error::{BusError, Result};

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Handler for named and pattern subscriptions
type EventHandler = Rc<dyn Fn(&Value) -> Result<()>>;

/// Handler for catch-all subscriptions
type CatchAllHandler = Rc<dyn Fn(&Event<'_>) -> Result<()>>;

struct Subscription {
    id: SubscriptionId,
    key: EventKey,
    handler: EventHandler,
}

#[derive(Default)]
struct Registry {
    /// Named and pattern subscriptions in registration order
    named: Vec<Subscription>,
    /// Catch-all subscriptions in registration order
    catch_all: Vec<(SubscriptionId, CatchAllHandler)>,
}

/// Synchronous publish/subscribe dispatcher
///
/// Dispatch order for one `emit`:
/// 1. exact-name subscribers, in registration order
/// 2. pattern subscribers whose pattern matches, in registration order
/// 3. catch-all subscribers, in registration order
///
/// Dispatch is re-entrant and depth-first: a handler may emit, and the nested
/// event is fully dispatched before the outer one continues. Handlers run
/// against a snapshot taken when `emit` starts, so subscribing or
/// unsubscribing from inside a handler takes effect from the next `emit`.
///
/// The first handler returning an error stops dispatch of that event and
/// the error is returned from `emit`. The registry is never borrowed while a
/// handler runs, so neither errors nor panics in handlers can corrupt it.
#[derive(Default)]
pub struct EventBus {
    registry: RefCell<Registry>,
}

impl EventBus {
    /// Create a new, empty event bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to an exact event name or a compiled pattern
    pub fn subscribe<K, F>(&self, key: K, handler: F) -> SubscriptionId
    where
        K: Into<EventKey>,
        F: Fn(&Value) -> Result<()> + 'static,
    {
        let id = SubscriptionId::new();
        let key = key.into();
        tracing::debug!("Subscription {} added for {}", id, key);
        self.registry.borrow_mut().named.push(Subscription {
            id,
            key,
            handler: Rc::new(handler),
        });
        id
    }

    /// Subscribe to every event name the regular expression matches
    pub fn subscribe_pattern<F>(&self, pattern: &str, handler: F) -> Result<SubscriptionId>
    where
        F: Fn(&Value) -> Result<()> + 'static,
    {
        let key = EventKey::pattern(pattern)?;
        Ok(self.subscribe(key, handler))
    }

    /// Subscribe with a handler that receives the payload decoded as `T`
    ///
    /// A payload that does not decode fails the dispatch with
    /// [`BusError::PayloadMismatch`].
    pub fn on<T, K, F>(&self, key: K, handler: F) -> SubscriptionId
    where
        T: DeserializeOwned,
        K: Into<EventKey>,
        F: Fn(T) -> Result<()> + 'static,
    {
        let key = key.into();
        let label = key.to_string();
        self.subscribe(key, move |payload| {
            let data = serde_json::from_value::<T>(payload.clone()).map_err(|e| {
                tracing::warn!("Undecodable payload for {}: {}", label, e);
                BusError::PayloadMismatch {
                    event: label.clone(),
                    reason: e.to_string(),
                }
            })?;
            handler(data)
        })
    }

    /// Subscribe to every event regardless of name
    pub fn subscribe_all<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&Event<'_>) -> Result<()> + 'static,
    {
        let id = SubscriptionId::new();
        tracing::debug!("Catch-all subscription {} added", id);
        self.registry
            .borrow_mut()
            .catch_all
            .push((id, Rc::new(handler)));
        id
    }

    /// Install a catch-all subscriber that logs every event
    pub fn log_all(&self) -> SubscriptionId {
        self.subscribe_all(|event| {
            tracing::info!("Event: {}", event.description());
            Ok(())
        })
    }

    /// Unsubscribe from events
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.borrow_mut();
        let before = registry.named.len() + registry.catch_all.len();
        registry.named.retain(|sub| sub.id != id);
        registry.catch_all.retain(|(sub_id, _)| *sub_id != id);
        let removed = registry.named.len() + registry.catch_all.len() != before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Remove every subscription
    pub fn unsubscribe_all(&self) {
        let mut registry = self.registry.borrow_mut();
        registry.named.clear();
        registry.catch_all.clear();
        tracing::debug!("All subscriptions removed");
    }

    /// Get the number of active subscriptions, catch-all ones included
    pub fn subscriber_count(&self) -> usize {
        let registry = self.registry.borrow();
        registry.named.len() + registry.catch_all.len()
    }

    /// Emit an event to all matching subscribers
    ///
    /// Returns the number of handlers invoked. The first failing handler
    /// stops dispatch and its error is returned; handlers that already ran
    /// are not undone.
    pub fn emit(&self, name: &str, payload: Value) -> Result<usize> {
        let (named, catch_all) = self.snapshot(name);
        tracing::trace!(
            "Dispatching {} to {} subscriber(s)",
            name,
            named.len() + catch_all.len()
        );

        for handler in &named {
            handler(&payload)?;
        }

        let event = Event {
            name,
            payload: &payload,
        };
        for handler in &catch_all {
            handler(&event)?;
        }

        Ok(named.len() + catch_all.len())
    }

    /// Emit an event with no payload
    pub fn emit_empty(&self, name: &str) -> Result<usize> {
        self.emit(name, Value::Null)
    }

    /// Serialize `data` and emit it as the payload
    pub fn emit_with<T: Serialize + ?Sized>(&self, name: &str, data: &T) -> Result<usize> {
        let payload = serde_json::to_value(data)?;
        self.emit(name, payload)
    }

    /// Bind an event name and default payload into a reusable emitter
    ///
    /// The returned closure emits `name` with its argument merged over
    /// `defaults`; pass `Value::Null` to emit the defaults alone.
    pub fn create_trigger(
        self: &Rc<Self>,
        name: impl Into<String>,
        defaults: Value,
    ) -> impl Fn(Value) -> Result<usize> {
        let bus = Rc::clone(self);
        let name = name.into();
        move |data| bus.emit(&name, merge_payload(&defaults, data))
    }

    /// Collect the handlers for `name`: exact first, then patterns
    fn snapshot(&self, name: &str) -> (Vec<EventHandler>, Vec<CatchAllHandler>) {
        let registry = self.registry.borrow();
        let exact = registry
            .named
            .iter()
            .filter(|sub| sub.key.is_exact() && sub.key.matches(name));
        let patterns = registry
            .named
            .iter()
            .filter(|sub| !sub.key.is_exact() && sub.key.matches(name));
        let named = exact
            .chain(patterns)
            .map(|sub| Rc::clone(&sub.handler))
            .collect();
        let catch_all = registry
            .catch_all
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        (named, catch_all)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
