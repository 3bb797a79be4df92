//! Error handling for Web-larek
//!
//! Provides error types for every layer of the storefront core:
//! - Bus errors (subscription setup, payload decoding)
//! - State errors (invalid field writes, checkout preconditions)
//! - Transport errors (reported by the catalog/order client)
//!
//! Form validation failures are not errors: they are carried as data in
//! the form error map and never raised.

use thiserror::Error;

/// Event bus error type
///
/// Raised while setting up subscriptions or while decoding the payload of
/// a typed subscriber during dispatch.
#[derive(Error, Debug, Clone)]
pub enum BusError {
    /// Subscription pattern failed to compile
    #[error("Invalid event pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern source text.
        pattern: String,
        /// The compiler's explanation.
        reason: String,
    },

    /// Payload did not have the shape the subscriber expects
    #[error("Payload of '{event}' does not match the subscriber: {reason}")]
    PayloadMismatch {
        /// The event being dispatched.
        event: String,
        /// The decoding failure.
        reason: String,
    },
}

/// Application state error type
///
/// Programmer errors and checkout preconditions. None of these leave the
/// state partially updated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Write to a field that does not exist on the order form
    #[error("Unknown order field: {field}")]
    UnknownField {
        /// The rejected field name.
        field: String,
    },

    /// Submission attempted while the form still has errors
    #[error("Order is not ready: {reason}")]
    OrderNotReady {
        /// The joined form error messages.
        reason: String,
    },

    /// Submission attempted with no purchasable items
    #[error("Order has no purchasable items")]
    EmptyOrder,
}

/// Transport error type
///
/// Reported by implementations of the store API client.
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    /// Request could not be completed
    #[error("Request to {endpoint} failed: {reason}")]
    RequestFailed {
        /// The endpoint that was called.
        endpoint: String,
        /// The reason for the failure.
        reason: String,
    },

    /// Server answered with an error
    #[error("Server rejected request ({status}): {message}")]
    Rejected {
        /// The HTTP status code.
        status: u16,
        /// The server's error message.
        message: String,
    },

    /// Response body could not be understood
    #[error("Malformed response: {reason}")]
    MalformedResponse {
        /// The reason the body was rejected.
        reason: String,
    },
}

/// Main error type for Web-larek
///
/// A unified error type that can represent any error from all layers.
/// This is the type subscriber callbacks return.
#[derive(Error, Debug)]
pub enum Error {
    /// Event bus error
    #[error(transparent)]
    Bus(#[from] BusError),

    /// Application state error
    #[error(transparent)]
    State(#[from] StateError),

    /// Transport error
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Payload serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a state error
    pub fn is_state_error(&self) -> bool {
        matches!(self, Error::State(_))
    }

    /// Check if this is a transport error
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Check if this is an unknown field write
    pub fn is_unknown_field(&self) -> bool {
        matches!(self, Error::State(StateError::UnknownField { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BusError::InvalidPattern {
            pattern: "(".to_string(),
            reason: "unclosed group".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid event pattern '(': unclosed group");

        let err = StateError::UnknownField {
            field: "fax".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown order field: fax");

        let err = TransportError::Rejected {
            status: 400,
            message: "Неверная сумма заказа".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Server rejected request (400): Неверная сумма заказа"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = StateError::EmptyOrder.into();
        assert!(err.is_state_error());
        assert!(!err.is_unknown_field());

        let err: Error = StateError::UnknownField {
            field: "fax".to_string(),
        }
        .into();
        assert!(err.is_unknown_field());

        let err: Error = TransportError::MalformedResponse {
            reason: "eof".to_string(),
        }
        .into();
        assert!(err.is_transport_error());
        assert_eq!(err.to_string(), "Malformed response: eof");
    }
}
