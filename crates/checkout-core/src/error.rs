//! Error types for the checkout bridge protocol.
//!
//! Two failure families exist:
//!
//! - [`BridgeError::InvalidBridgeEvent`] – an inbound message could not be
//!   decoded.  This is always surfaced to the caller because it indicates a
//!   protocol mismatch between the host and the web content.
//! - [`BridgeError::UnencodableInstrumentation`] – an outbound telemetry record
//!   could not be serialized.  The transport recovers from this locally.
//!
//! Unrecognised event names are *not* errors; they decode to
//! [`crate::WebEvent::Unsupported`].

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors produced while moving messages across the bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The inbound envelope was malformed or a mandatory field was missing.
    #[error("invalid bridge event: {0}")]
    InvalidBridgeEvent(#[source] DecodeCause),

    /// An outbound instrumentation payload could not be serialized to JSON.
    #[error("unencodable instrumentation payload: {0}")]
    UnencodableInstrumentation(#[source] serde_json::Error),
}

impl BridgeError {
    /// Returns `true` for inbound decode failures.
    pub fn is_invalid_event(&self) -> bool {
        matches!(self, BridgeError::InvalidBridgeEvent(_))
    }
}

impl From<DecodeCause> for BridgeError {
    fn from(cause: DecodeCause) -> Self {
        BridgeError::InvalidBridgeEvent(cause)
    }
}

/// The precise reason an inbound message was rejected.
#[derive(Debug, Error)]
pub enum DecodeCause {
    /// The message channel delivered an empty string.
    #[error("message is empty")]
    EmptyMessage,

    /// The message channel delivered something other than a string.
    #[error("message is not a string (found {0})")]
    NonStringMessage(&'static str),

    /// The envelope was not valid UTF-8 JSON, was not an object, or lacked
    /// a string `name` / had a non-string `body`.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(#[source] serde_json::Error),

    /// A variant that requires a body was sent without one.
    #[error("event '{name}' requires a body")]
    MissingBody { name: String },

    /// The body of a recognised event could not be parsed into its mandatory shape.
    #[error("malformed body for event '{name}': {source}")]
    MalformedBody {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A boolean event body was neither `"true"` nor `"false"`.
    #[error("expected \"true\" or \"false\", got {0:?}")]
    InvalidBoolean(String),
}
