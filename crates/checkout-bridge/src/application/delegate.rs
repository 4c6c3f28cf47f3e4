//! Host callbacks for decoded events.
//!
//! Decoding and routing are separate steps: [`crate::BridgeTransport::decode`]
//! returns a [`WebEvent`], and [`route_event`] turns it into one delegate call.
//! Hosts that prefer matching on `WebEvent` themselves can skip this module.

use checkout_core::domain::order::OrderPayload;
use checkout_core::domain::pixel::PixelEvent;
use checkout_core::{CheckoutFailure, WebEvent};

/// Receives checkout lifecycle callbacks.
///
/// Every method has a no-op default so hosts implement only what they need.
pub trait CheckoutEventDelegate {
    /// The web content has announced its listener.
    fn on_checkout_ready(&mut self) {}

    fn on_checkout_completed(&mut self, _order: &OrderPayload) {}

    /// A checkout error, or a message the bridge could not decode.
    fn on_checkout_failed(&mut self, _failure: &CheckoutFailure) {}

    /// The checkout entered (`true`) or left (`false`) a blocking modal state.
    fn on_modal_toggled(&mut self, _visible: bool) {}

    fn on_web_pixel_event(&mut self, _event: &PixelEvent) {}

    /// A message with an unrecognised name, or an unrecognised pixel kind.
    fn on_unsupported_event(&mut self, _name: &str) {}
}

/// Invokes the delegate method matching `event`.
pub fn route_event(event: &WebEvent, delegate: &mut dyn CheckoutEventDelegate) {
    match event {
        WebEvent::Init => delegate.on_checkout_ready(),
        WebEvent::CheckoutComplete(order) => delegate.on_checkout_completed(order),
        WebEvent::CheckoutModalToggled { visible } => delegate.on_modal_toggled(*visible),
        WebEvent::WebPixels(pixel) => delegate.on_web_pixel_event(pixel),
        WebEvent::Unsupported { name } => delegate.on_unsupported_event(name),
        WebEvent::CheckoutExpired(_)
        | WebEvent::CheckoutUnavailable(_)
        | WebEvent::ConfigurationError(_) => {
            if let Some(failure) = event.failure() {
                delegate.on_checkout_failed(&failure);
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::decode_message;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl CheckoutEventDelegate for Recorder {
        fn on_checkout_ready(&mut self) {
            self.calls.push("ready".into());
        }
        fn on_checkout_completed(&mut self, order: &OrderPayload) {
            self.calls.push(format!("completed:{}", order.order_id()));
        }
        fn on_checkout_failed(&mut self, failure: &CheckoutFailure) {
            self.calls.push(format!(
                "failed:{}:{}",
                failure.code().unwrap_or("-"),
                failure.is_recoverable()
            ));
        }
        fn on_modal_toggled(&mut self, visible: bool) {
            self.calls.push(format!("modal:{visible}"));
        }
        fn on_web_pixel_event(&mut self, event: &PixelEvent) {
            self.calls.push(format!("pixel:{}", event.name()));
        }
        fn on_unsupported_event(&mut self, name: &str) {
            self.calls.push(format!("unsupported:{name}"));
        }
    }

    fn route(raw: &str) -> Vec<String> {
        let mut recorder = Recorder::default();
        route_event(&decode_message(raw).unwrap(), &mut recorder);
        recorder.calls
    }

    #[test]
    fn test_init_routes_to_ready() {
        assert_eq!(route(r#"{"name":"init"}"#), vec!["ready"]);
    }

    #[test]
    fn test_completed_routes_order() {
        let raw = r#"{"name":"completed","body":"{\"orderDetails\":{\"id\":\"gid://Order/7\"}}"}"#;
        assert_eq!(route(raw), vec!["completed:gid://Order/7"]);
    }

    #[test]
    fn test_unavailable_error_routes_as_recoverable_failure() {
        let raw = r#"{"name":"error","body":"[{\"group\":\"unrecoverable\",\"reason\":\"down\"}]"}"#;
        let calls = route(raw);
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("failed:"));
        assert!(calls[0].ends_with(":true"));
    }

    #[test]
    fn test_modal_toggle_routes_flag() {
        assert_eq!(
            route(r#"{"name":"checkoutBlockingEvent","body":"false"}"#),
            vec!["modal:false"]
        );
    }

    #[test]
    fn test_custom_pixel_routes_to_pixel_callback() {
        let raw = r#"{"name":"webPixels","body":"{\"name\":\"my_event\",\"event\":{\"type\":\"custom\",\"name\":\"my_event\",\"customData\":{\"a\":1}}}"}"#;
        assert_eq!(route(raw), vec!["pixel:my_event"]);
    }

    #[test]
    fn test_unknown_name_routes_to_unsupported() {
        assert_eq!(route(r#"{"name":"foo","body":"bar"}"#), vec!["unsupported:foo"]);
    }

    #[test]
    fn test_default_methods_are_no_ops() {
        struct Silent;
        impl CheckoutEventDelegate for Silent {}

        route_event(&WebEvent::Init, &mut Silent);
        route_event(
            &WebEvent::Unsupported { name: "x".into() },
            &mut Silent,
        );
    }
}
