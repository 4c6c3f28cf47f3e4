//! Error payloads reported by the web content in `error` envelopes.
//!
//! The body of an `error` envelope is a JSON array of error objects.  Only the
//! first element decides which event the host sees; its `group` field selects
//! the category:
//!
//! | `group`          | category          |
//! |------------------|-------------------|
//! | `"unrecoverable"`| [`ErrorGroup::Unrecoverable`] |
//! | `"configuration"`| [`ErrorGroup::Configuration`] |
//! | anything else    | [`ErrorGroup::Expired`]       |
//!
//! "Anything else" includes `"expired"`, unknown future groups, an absent
//! `group` and an empty array.

use serde::{Deserialize, Serialize};

/// One error object from an `error` envelope body.
///
/// Every field is optional so that `[{}]` decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutErrorPayload {
    /// Error family, e.g. `"expired"`, `"unrecoverable"`, `"configuration"`.
    pub group: Option<String>,
    /// Fine-grained error kind within the group (`type` on the wire).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Machine-readable error code, e.g. `"cart_completed"`.
    pub code: Option<String>,
    /// Human-readable reason.  For logging only.
    pub reason: Option<String>,
}

impl CheckoutErrorPayload {
    /// The group this payload belongs to.
    pub fn group(&self) -> ErrorGroup {
        ErrorGroup::classify(self.group.as_deref())
    }

    /// Reason text, or a generic fallback when the web content sent none.
    pub fn message(&self) -> &str {
        self.reason.as_deref().unwrap_or("no reason given")
    }
}

/// The three error categories the host distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorGroup {
    /// The checkout session is no longer valid (also the catch-all).
    Expired,
    /// The checkout cannot be completed in this session.
    Unrecoverable,
    /// The storefront or SDK is misconfigured.
    Configuration,
}

impl ErrorGroup {
    /// Maps a wire `group` value onto a category.
    ///
    /// Unrecognised and absent values fall through to [`ErrorGroup::Expired`],
    /// the same as `"expired"` itself.
    pub fn classify(group: Option<&str>) -> Self {
        match group {
            Some("unrecoverable") => ErrorGroup::Unrecoverable,
            Some("configuration") => ErrorGroup::Configuration,
            _ => ErrorGroup::Expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_groups() {
        assert_eq!(
            ErrorGroup::classify(Some("unrecoverable")),
            ErrorGroup::Unrecoverable
        );
        assert_eq!(
            ErrorGroup::classify(Some("configuration")),
            ErrorGroup::Configuration
        );
        assert_eq!(ErrorGroup::classify(Some("expired")), ErrorGroup::Expired);
    }

    #[test]
    fn test_classify_unknown_and_absent_groups_as_expired() {
        // Unknown groups share the "expired" path.  Kept as observed behaviour
        // until a distinct unsupported-error category is agreed on.
        assert_eq!(ErrorGroup::classify(Some("violation")), ErrorGroup::Expired);
        assert_eq!(ErrorGroup::classify(Some("")), ErrorGroup::Expired);
        assert_eq!(ErrorGroup::classify(None), ErrorGroup::Expired);
    }

    #[test]
    fn test_empty_object_deserializes() {
        let payload: CheckoutErrorPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload, CheckoutErrorPayload::default());
        assert_eq!(payload.message(), "no reason given");
    }

    #[test]
    fn test_type_field_maps_to_kind() {
        let payload: CheckoutErrorPayload = serde_json::from_str(
            r#"{"group":"unrecoverable","type":"inventory","code":"sold_out","reason":"Sold out"}"#,
        )
        .unwrap();

        assert_eq!(payload.kind.as_deref(), Some("inventory"));
        assert_eq!(payload.code.as_deref(), Some("sold_out"));
        assert_eq!(payload.message(), "Sold out");
        assert_eq!(payload.group(), ErrorGroup::Unrecoverable);
    }
}
