//! Event keys and dispatched event views.
//!
//! Events are identified by name only; payloads are JSON values so that
//! producers and consumers agree on shape through serde rather than through
//! a shared enum.

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::error::BusError;

/// What a subscription listens to
#[derive(Debug, Clone)]
pub enum EventKey {
    /// Matches one event name exactly.
    Exact(String),
    /// Matches every event name the expression finds a match in.
    Pattern(Regex),
}

impl EventKey {
    /// Compile a pattern key.
    ///
    /// Compilation happens here, at subscription setup, never during dispatch.
    pub fn pattern(source: &str) -> Result<Self, BusError> {
        Regex::new(source)
            .map(EventKey::Pattern)
            .map_err(|e| BusError::InvalidPattern {
                pattern: source.to_string(),
                reason: e.to_string(),
            })
    }

    /// Check if an event name matches this key
    pub fn matches(&self, name: &str) -> bool {
        match self {
            EventKey::Exact(exact) => exact == name,
            EventKey::Pattern(re) => re.is_match(name),
        }
    }

    /// Whether this is an exact-name key
    pub fn is_exact(&self) -> bool {
        matches!(self, EventKey::Exact(_))
    }
}

impl std::fmt::Display for EventKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKey::Exact(name) => write!(f, "{}", name),
            EventKey::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

impl From<&str> for EventKey {
    fn from(name: &str) -> Self {
        EventKey::Exact(name.to_string())
    }
}

impl From<String> for EventKey {
    fn from(name: String) -> Self {
        EventKey::Exact(name)
    }
}

impl From<Regex> for EventKey {
    fn from(re: Regex) -> Self {
        EventKey::Pattern(re)
    }
}

/// An event as seen by catch-all subscribers
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Event<'a> {
    /// Event name.
    pub name: &'a str,
    /// Event payload, `Null` when emitted without data.
    pub payload: &'a Value,
}

impl Event<'_> {
    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        if self.payload.is_null() {
            self.name.to_string()
        } else {
            format!("{} {}", self.name, self.payload)
        }
    }
}

/// Merge `data` over `defaults`.
///
/// Two objects merge key by key with `data` winning; a `Null` argument
/// yields the defaults; any other argument replaces them.
pub fn merge_payload(defaults: &Value, data: Value) -> Value {
    match (defaults, data) {
        (Value::Object(base), Value::Object(over)) => {
            let mut merged = base.clone();
            merged.extend(over);
            Value::Object(merged)
        }
        (base, Value::Null) => base.clone(),
        (_, data) => data,
    }
}
