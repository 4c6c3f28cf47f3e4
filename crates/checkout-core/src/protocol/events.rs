//! The typed event model produced by the decoder.
//!
//! [`WebEvent`] is a closed set with one open arm: any envelope name the
//! decoder does not recognise becomes [`WebEvent::Unsupported`] so that newer
//! web content never breaks an older host.

use crate::domain::checkout_error::CheckoutErrorPayload;
use crate::domain::failure::CheckoutFailure;
use crate::domain::order::OrderPayload;
use crate::domain::pixel::PixelEvent;

/// Envelope names with a dedicated decode rule.
pub mod names {
    /// Readiness handshake.
    pub const INIT: &str = "init";
    /// Order placed.
    pub const COMPLETED: &str = "completed";
    /// Checkout error array.
    pub const ERROR: &str = "error";
    /// Modal overlay shown/hidden (body `"true"`/`"false"`).
    pub const CHECKOUT_BLOCKING: &str = "checkoutBlockingEvent";
    /// Pixel analytics.
    pub const WEB_PIXELS: &str = "webPixels";
}

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum WebEvent {
    /// The web content's message listener is attached.
    Init,
    /// The buyer placed an order.
    CheckoutComplete(OrderPayload),
    /// Error group `"expired"`, an unrecognised group, or no error details.
    CheckoutExpired(CheckoutErrorPayload),
    /// Error group `"unrecoverable"`.
    CheckoutUnavailable(CheckoutErrorPayload),
    /// Error group `"configuration"`.
    ConfigurationError(CheckoutErrorPayload),
    /// A modal overlay inside the checkout was shown or hidden.
    CheckoutModalToggled { visible: bool },
    /// A pixel analytics event.
    WebPixels(PixelEvent),
    /// An envelope this host does not understand.
    Unsupported { name: String },
}

impl WebEvent {
    /// Short variant label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            WebEvent::Init => "init",
            WebEvent::CheckoutComplete(_) => "checkout_complete",
            WebEvent::CheckoutExpired(_) => "checkout_expired",
            WebEvent::CheckoutUnavailable(_) => "checkout_unavailable",
            WebEvent::ConfigurationError(_) => "configuration_error",
            WebEvent::CheckoutModalToggled { .. } => "checkout_modal_toggled",
            WebEvent::WebPixels(_) => "web_pixels",
            WebEvent::Unsupported { .. } => "unsupported",
        }
    }

    /// The failure this event reports, if it is one of the error variants.
    pub fn failure(&self) -> Option<CheckoutFailure> {
        match self {
            WebEvent::CheckoutExpired(p) => Some(CheckoutFailure::CheckoutExpired(p.clone())),
            WebEvent::CheckoutUnavailable(p) => {
                Some(CheckoutFailure::CheckoutUnavailable(p.clone()))
            }
            WebEvent::ConfigurationError(p) => {
                Some(CheckoutFailure::ConfigurationError(p.clone()))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_variants_map_to_failures() {
        let payload = CheckoutErrorPayload {
            code: Some("x".into()),
            ..Default::default()
        };

        assert!(matches!(
            WebEvent::CheckoutUnavailable(payload.clone()).failure(),
            Some(CheckoutFailure::CheckoutUnavailable(_))
        ));
        assert!(matches!(
            WebEvent::ConfigurationError(payload.clone()).failure(),
            Some(CheckoutFailure::ConfigurationError(_))
        ));
        assert!(matches!(
            WebEvent::CheckoutExpired(payload).failure(),
            Some(CheckoutFailure::CheckoutExpired(_))
        ));
    }

    #[test]
    fn test_non_error_variants_have_no_failure() {
        assert!(WebEvent::Init.failure().is_none());
        assert!(WebEvent::CheckoutModalToggled { visible: true }
            .failure()
            .is_none());
        assert!(WebEvent::Unsupported { name: "x".into() }
            .failure()
            .is_none());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(WebEvent::Init.kind(), "init");
        assert_eq!(
            WebEvent::Unsupported { name: "foo".into() }.kind(),
            "unsupported"
        );
    }
}
