//! Sub-decoder for the pixel event protocol nested in `webPixels` bodies.
//!
//! Mandatory: the body is a JSON object with an `event` object whose `type`
//! is a string.  Everything else is optional; typed sub-fields (`context`,
//! `data`) that do not match their schema are dropped with a warning rather
//! than failing the whole event.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;
use tracing::{debug, warn};

use crate::domain::pixel::{
    Alert, AlertDisplayedEvent, CustomEvent, EventMetadata, GenericStandardEvent, PixelEvent,
    StandardEvent, UiExtensionError, UiExtensionErroredEvent, ALERT_DISPLAYED,
    UI_EXTENSION_ERRORED,
};

#[derive(Deserialize)]
struct PixelBody {
    #[serde(default)]
    name: Option<String>,
    event: RawPixelEvent,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPixelEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    context: Option<Box<RawValue>>,
    #[serde(default)]
    data: Option<Box<RawValue>>,
    #[serde(default)]
    custom_data: Option<Box<RawValue>>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct AlertDisplayedData {
    alert: Option<Alert>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct UiExtensionErroredData {
    error: Option<UiExtensionError>,
}

/// Decodes a `webPixels` body.
///
/// Returns `Ok(None)` when `event.type` is neither `standard` nor `custom`;
/// the caller reports such events as unsupported.
///
/// # Errors
///
/// Returns the `serde_json` error when the mandatory structure is missing.
pub(crate) fn decode_pixel_body(body: &str) -> serde_json::Result<Option<PixelEvent>> {
    let PixelBody { name, event } = serde_json::from_str(body)?;

    let event_name = event.name.clone().or(name).unwrap_or_default();
    let metadata = EventMetadata {
        id: event.id.clone(),
        timestamp: event.timestamp.clone(),
        context: lenient(event.context.as_deref(), "context", &event_name),
        name: event_name,
    };

    let decoded = match event.kind.as_str() {
        "standard" => Some(PixelEvent::Standard(standard_event(metadata, &event))),
        "custom" => Some(PixelEvent::Custom(CustomEvent {
            metadata,
            // Kept verbatim; only the host knows the schema.
            custom_data: event.custom_data.map(|raw| raw.get().to_owned()),
        })),
        other => {
            debug!(pixel_type = other, "unrecognised pixel event type");
            None
        }
    };
    Ok(decoded)
}

fn standard_event(metadata: EventMetadata, event: &RawPixelEvent) -> StandardEvent {
    let data = event.data.as_deref();
    match metadata.name.as_str() {
        ALERT_DISPLAYED => {
            let alert = lenient::<AlertDisplayedData>(data, "data", &metadata.name)
                .and_then(|d| d.alert);
            StandardEvent::AlertDisplayed(AlertDisplayedEvent { metadata, alert })
        }
        UI_EXTENSION_ERRORED => {
            let error = lenient::<UiExtensionErroredData>(data, "data", &metadata.name)
                .and_then(|d| d.error);
            StandardEvent::UiExtensionErrored(UiExtensionErroredEvent { metadata, error })
        }
        _ => {
            let data = lenient(data, "data", &metadata.name);
            StandardEvent::Generic(GenericStandardEvent { metadata, data })
        }
    }
}

/// Decodes an optional sub-field, dropping it on schema mismatch.
fn lenient<T: DeserializeOwned>(raw: Option<&RawValue>, field: &str, event: &str) -> Option<T> {
    let raw = raw?;
    match serde_json::from_str(raw.get()) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(pixel = event, field, error = %e, "dropping malformed pixel field");
            None
        }
    }
}
