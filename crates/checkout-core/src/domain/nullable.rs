//! Serde helper for web-content payloads.
//!
//! JavaScript senders routinely write `null` for "no value".  `#[serde(default)]`
//! only covers a missing key, so non-`Option` fields that should default also
//! opt into [`null_as_default`].

use serde::{Deserialize, Deserializer};

/// Deserializes `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "null_as_default")]
        name: String,
        #[serde(deserialize_with = "null_as_default")]
        items: Vec<u32>,
    }

    #[test]
    fn test_null_and_missing_both_default() {
        let nulls: Sample = serde_json::from_str(r#"{"name":null,"items":null}"#).unwrap();
        let missing: Sample = serde_json::from_str("{}").unwrap();

        assert_eq!(nulls.name, "");
        assert!(nulls.items.is_empty());
        assert_eq!(missing.name, "");
    }

    #[test]
    fn test_present_values_are_kept() {
        let sample: Sample = serde_json::from_str(r#"{"name":"x","items":[1,2]}"#).unwrap();
        assert_eq!(sample.name, "x");
        assert_eq!(sample.items, vec![1, 2]);
    }

    #[test]
    fn test_wrong_type_still_fails() {
        assert!(serde_json::from_str::<Sample>(r#"{"items":"nope"}"#).is_err());
    }
}
