//! Event decoder: inbound envelope → [`WebEvent`].
//!
//! Dispatch is purely on `envelope.name`:
//!
//! | name                    | body                    | result |
//! |-------------------------|-------------------------|--------|
//! | `init`                  | ignored                 | [`WebEvent::Init`] |
//! | `completed`             | JSON object             | [`WebEvent::CheckoutComplete`] |
//! | `error`                 | JSON array of objects   | expired / unavailable / configuration |
//! | `checkoutBlockingEvent` | `"true"` / `"false"`    | [`WebEvent::CheckoutModalToggled`] |
//! | `webPixels`             | JSON `{name, event}`    | [`WebEvent::WebPixels`] |
//! | anything else           | ignored                 | [`WebEvent::Unsupported`] |
//!
//! The decoder is a pure function.  The readiness side effect of `init`
//! belongs to the transport that calls it.

use serde::de::Error as _;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::checkout_error::{CheckoutErrorPayload, ErrorGroup};
use crate::domain::order::OrderPayload;
use crate::error::{BridgeError, DecodeCause};
use crate::protocol::envelope::MessageEnvelope;
use crate::protocol::events::{names, WebEvent};
use crate::protocol::pixels::decode_pixel_body;

/// Decodes one raw message string as delivered by the web content.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidBridgeEvent`] when the envelope cannot be
/// parsed or a recognised event's mandatory body is malformed.
///
/// # Examples
///
/// ```rust
/// use checkout_core::{decode_message, WebEvent};
///
/// let event = decode_message(r#"{"name":"checkoutBlockingEvent","body":"true"}"#).unwrap();
/// assert_eq!(event, WebEvent::CheckoutModalToggled { visible: true });
///
/// let event = decode_message(r#"{"name":"foo","body":"{}"}"#).unwrap();
/// assert_eq!(event, WebEvent::Unsupported { name: "foo".into() });
/// ```
pub fn decode_message(raw: &str) -> Result<WebEvent, BridgeError> {
    let envelope = MessageEnvelope::parse(raw)?;
    decode_envelope(&envelope)
}

/// Decodes a message body handed over by a script-message channel.
///
/// Web views deliver posted messages as loosely-typed values; the bridge
/// protocol only ever posts strings.
///
/// # Errors
///
/// Returns [`DecodeCause::NonStringMessage`] for non-string values, otherwise
/// the same errors as [`decode_message`].
pub fn decode_script_message(message: &Value) -> Result<WebEvent, BridgeError> {
    match message {
        Value::String(raw) => decode_message(raw),
        other => Err(DecodeCause::NonStringMessage(json_type(other)).into()),
    }
}

/// Decodes an already-parsed envelope.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidBridgeEvent`] when a recognised event's
/// mandatory body is missing or malformed.  Unrecognised names never fail.
pub fn decode_envelope(envelope: &MessageEnvelope) -> Result<WebEvent, BridgeError> {
    let name = envelope.name.as_str();
    let event = match name {
        names::INIT => WebEvent::Init,
        names::COMPLETED => decode_completed(envelope)?,
        names::ERROR => decode_error(envelope)?,
        names::CHECKOUT_BLOCKING => decode_modal_toggle(envelope)?,
        names::WEB_PIXELS => {
            let body = envelope.require_body()?;
            match decode_pixel_body(body).map_err(|e| malformed(name, e))? {
                Some(pixel) => WebEvent::WebPixels(pixel),
                None => WebEvent::Unsupported {
                    name: name.to_string(),
                },
            }
        }
        _ => {
            debug!(event = name, "unsupported bridge event");
            WebEvent::Unsupported {
                name: name.to_string(),
            }
        }
    };
    Ok(event)
}

// ── Per-event decoders ────────────────────────────────────────────────────────

fn decode_completed(envelope: &MessageEnvelope) -> Result<WebEvent, DecodeCause> {
    let body = envelope.require_body()?;
    let value: Value = serde_json::from_str(body).map_err(|e| malformed(&envelope.name, e))?;
    if !value.is_object() {
        return Err(malformed(
            &envelope.name,
            serde_json::Error::custom("expected a JSON object"),
        ));
    }

    // Leaf fields are all optional.  A body that is an object but still does
    // not fit the schema (e.g. a number where a string belongs) yields an
    // empty order rather than losing the completion signal.
    let order = serde_json::from_value::<OrderPayload>(value).unwrap_or_else(|e| {
        warn!(error = %e, "order payload did not match schema; reporting empty order");
        OrderPayload::default()
    });
    if !order.order_details.has_id() {
        debug!("completed event without order id");
    }
    Ok(WebEvent::CheckoutComplete(order))
}

fn decode_error(envelope: &MessageEnvelope) -> Result<WebEvent, DecodeCause> {
    let body = envelope.require_body()?;
    let errors: Vec<CheckoutErrorPayload> =
        serde_json::from_str(body).map_err(|e| malformed(&envelope.name, e))?;

    let first = errors.into_iter().next().unwrap_or_default();
    let event = match first.group() {
        ErrorGroup::Unrecoverable => WebEvent::CheckoutUnavailable(first),
        ErrorGroup::Configuration => WebEvent::ConfigurationError(first),
        ErrorGroup::Expired => WebEvent::CheckoutExpired(first),
    };
    Ok(event)
}

fn decode_modal_toggle(envelope: &MessageEnvelope) -> Result<WebEvent, DecodeCause> {
    let visible = match envelope.require_body()? {
        "true" => true,
        "false" => false,
        other => return Err(DecodeCause::InvalidBoolean(other.to_string())),
    };
    Ok(WebEvent::CheckoutModalToggled { visible })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn malformed(name: &str, source: serde_json::Error) -> DecodeCause {
    DecodeCause::MalformedBody {
        name: name.to_string(),
        source,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
