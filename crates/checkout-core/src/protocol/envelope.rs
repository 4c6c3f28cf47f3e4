//! The top-level message unit crossing the web/host boundary.
//!
//! Wire format (one JSON object per message):
//!
//! ```json
//! {"name":"completed","body":"{\"orderDetails\":{\"id\":\"gid://1\"}}"}
//! ```
//!
//! `body` is a JSON-*encoded string*, not a nested object.  Structured events
//! are therefore double-encoded; boolean events carry the bare literal
//! `"true"` or `"false"`.

use serde::{Deserialize, Serialize};

use crate::error::DecodeCause;

/// A raw inbound message before event-specific decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    /// Event discriminator.  Mandatory.
    pub name: String,

    /// Event payload as text.  Must be a string when present; some events
    /// (`init`, unsupported names) do not need one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl MessageEnvelope {
    /// Creates an envelope from its parts.
    pub fn new(name: impl Into<String>, body: Option<String>) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }

    /// Parses an envelope from raw bytes.
    ///
    /// The bytes must be UTF-8 JSON; `serde_json` rejects invalid UTF-8 inside
    /// strings as a syntax error, which surfaces as
    /// [`DecodeCause::MalformedEnvelope`].
    ///
    /// # Errors
    ///
    /// - [`DecodeCause::EmptyMessage`] for an empty (or whitespace-only) input.
    /// - [`DecodeCause::MalformedEnvelope`] when the JSON is invalid, `name` is
    ///   missing or not a string, or `body` is present but not a string.
    pub fn from_slice(raw: &[u8]) -> Result<Self, DecodeCause> {
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Err(DecodeCause::EmptyMessage);
        }
        serde_json::from_slice(raw).map_err(DecodeCause::MalformedEnvelope)
    }

    /// Parses an envelope from a string.  See [`MessageEnvelope::from_slice`].
    ///
    /// # Errors
    ///
    /// Same as [`MessageEnvelope::from_slice`].
    pub fn parse(raw: &str) -> Result<Self, DecodeCause> {
        Self::from_slice(raw.as_bytes())
    }

    /// Returns the body, or [`DecodeCause::MissingBody`] when it is absent.
    pub(crate) fn require_body(&self) -> Result<&str, DecodeCause> {
        self.body.as_deref().ok_or_else(|| DecodeCause::MissingBody {
            name: self.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_envelope_with_string_body() {
        let env = MessageEnvelope::parse(r#"{"name":"checkoutBlockingEvent","body":"true"}"#)
            .unwrap();

        assert_eq!(env.name, "checkoutBlockingEvent");
        assert_eq!(env.body.as_deref(), Some("true"));
    }

    #[test]
    fn test_parse_envelope_without_body() {
        let env = MessageEnvelope::parse(r#"{"name":"init"}"#).unwrap();
        assert_eq!(env.body, None);
    }

    #[test]
    fn test_numeric_body_is_rejected() {
        let result = MessageEnvelope::parse(r#"{"name":"completed","body":42}"#);
        assert!(matches!(result, Err(DecodeCause::MalformedEnvelope(_))));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let result = MessageEnvelope::parse(r#"{"body":"{}"}"#);
        assert!(matches!(result, Err(DecodeCause::MalformedEnvelope(_))));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(
            MessageEnvelope::parse(""),
            Err(DecodeCause::EmptyMessage)
        ));
        assert!(matches!(
            MessageEnvelope::parse("  \n"),
            Err(DecodeCause::EmptyMessage)
        ));
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        // 0xFF can never appear in UTF-8.
        let raw = b"{\"name\":\"init\",\"body\":\"\xFF\"}";
        assert!(matches!(
            MessageEnvelope::from_slice(raw),
            Err(DecodeCause::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_unknown_envelope_fields_are_ignored() {
        // Newer web content may add envelope fields; they must not break decode.
        let env = MessageEnvelope::parse(r#"{"name":"init","body":"","version":2}"#).unwrap();
        assert_eq!(env.name, "init");
    }
}
