//! Telemetry records sent from the host to the web content.
//!
//! The web content forwards these to its own analytics pipeline.  On the wire
//! a record is wrapped in `{"detail": <record>}` and dispatched as an
//! `"instrumentation"` message.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How the receiving pipeline aggregates the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Counter,
    Histogram,
}

/// One telemetry record.
///
/// ```json
/// {"name":"checkout_preloaded","value":1,"type":"counter","tags":{"platform":"ios"}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentationPayload {
    pub name: String,
    pub value: i64,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl InstrumentationPayload {
    /// A counter record with no tags.
    pub fn counter(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            metric_type: MetricType::Counter,
            tags: BTreeMap::new(),
        }
    }

    /// A histogram record with no tags.
    pub fn histogram(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            metric_type: MetricType::Histogram,
            tags: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) a tag.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// The `{"detail": ...}` wrapper the web content expects.
#[derive(Debug, Serialize)]
pub(crate) struct InstrumentationEnvelope<'a, T: Serialize + ?Sized> {
    pub detail: &'a T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_serializes_with_type_field() {
        let metric = InstrumentationPayload::counter("checkout_presented", 1)
            .with_tag("platform", "ios");

        let json = serde_json::to_string(&metric).unwrap();

        assert_eq!(
            json,
            r#"{"name":"checkout_presented","value":1,"type":"counter","tags":{"platform":"ios"}}"#
        );
    }

    #[test]
    fn test_envelope_wraps_in_detail() {
        let metric = InstrumentationPayload::histogram("load_ms", 420);

        let json = serde_json::to_string(&InstrumentationEnvelope { detail: &metric }).unwrap();

        assert!(json.starts_with(r#"{"detail":{"name":"load_ms""#));
        assert!(json.contains(r#""type":"histogram""#));
    }

    #[test]
    fn test_tags_default_when_absent() {
        let metric: InstrumentationPayload =
            serde_json::from_str(r#"{"name":"n","value":2,"type":"counter"}"#).unwrap();
        assert!(metric.tags.is_empty());
    }
}
