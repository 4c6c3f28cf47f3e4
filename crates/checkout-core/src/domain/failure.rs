//! Host-facing failure categories.
//!
//! A host typically funnels every checkout failure into a single callback.
//! [`CheckoutFailure`] keeps commerce failures (reported by the web content)
//! apart from bridge failures (the host could not understand the web content),
//! so the two can be presented and logged differently.

use thiserror::Error;

use crate::domain::checkout_error::CheckoutErrorPayload;
use crate::error::BridgeError;

/// A failure the host should surface to its own error handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutFailure {
    /// The checkout session expired or reported an unclassified error.
    #[error("checkout expired: {}", .0.message())]
    CheckoutExpired(CheckoutErrorPayload),

    /// The checkout cannot proceed in this session.
    #[error("checkout unavailable: {}", .0.message())]
    CheckoutUnavailable(CheckoutErrorPayload),

    /// The storefront or SDK configuration is invalid.
    #[error("checkout configuration error: {}", .0.message())]
    ConfigurationError(CheckoutErrorPayload),

    /// The host and web content disagree about the bridge protocol.
    #[error("checkout bridge failure: {0}")]
    BridgeFailure(String),
}

impl CheckoutFailure {
    /// Whether reloading the checkout has a chance of succeeding.
    ///
    /// Expired sessions and configuration errors need a new checkout URL or a
    /// code change; unavailable checkouts and bridge hiccups may clear up on
    /// reload.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CheckoutFailure::CheckoutUnavailable(_) | CheckoutFailure::BridgeFailure(_)
        )
    }

    /// The web-content error code, when there is one.
    pub fn code(&self) -> Option<&str> {
        match self {
            CheckoutFailure::CheckoutExpired(p)
            | CheckoutFailure::CheckoutUnavailable(p)
            | CheckoutFailure::ConfigurationError(p) => p.code.as_deref(),
            CheckoutFailure::BridgeFailure(_) => None,
        }
    }
}

impl From<&BridgeError> for CheckoutFailure {
    fn from(err: &BridgeError) -> Self {
        CheckoutFailure::BridgeFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeCause;

    #[test]
    fn test_bridge_error_becomes_bridge_failure() {
        let err = BridgeError::InvalidBridgeEvent(DecodeCause::EmptyMessage);

        let failure = CheckoutFailure::from(&err);

        assert!(matches!(failure, CheckoutFailure::BridgeFailure(ref m) if m.contains("empty")));
        assert!(failure.is_recoverable());
        assert_eq!(failure.code(), None);
    }

    #[test]
    fn test_expired_is_not_recoverable_and_keeps_code() {
        let failure = CheckoutFailure::CheckoutExpired(CheckoutErrorPayload {
            code: Some("cart_completed".into()),
            ..Default::default()
        });

        assert!(!failure.is_recoverable());
        assert_eq!(failure.code(), Some("cart_completed"));
        assert_eq!(failure.to_string(), "checkout expired: no reason given");
    }
}
