//! Outbound script generation.
//!
//! Every host → web message becomes a call to the web content's dispatch
//! entry point.  The entry point may not exist yet when the script runs (the
//! page can still be loading even after the host has seen `init` from an
//! earlier document), so each call is guarded:
//!
//! ```js
//! if (window.MobileCheckoutSdk && window.MobileCheckoutSdk.dispatchMessage) {
//!     window.MobileCheckoutSdk.dispatchMessage("presented");
//! } else {
//!     window.addEventListener("mobileCheckoutBridgeReady", function () {
//!         window.MobileCheckoutSdk.dispatchMessage("presented");
//!     }, {passive: true, once: true});
//! }
//! ```
//!
//! This script-level guard is independent of the host-level buffering in
//! [`crate::application::transport`].

use checkout_core::BridgeError;
use serde::Serialize;
use serde_json::Value;

use crate::domain::config::BridgeConfig;
use crate::domain::instrumentation::InstrumentationEnvelope;

/// Command name for instrumentation records.
pub const INSTRUMENTATION_COMMAND: &str = "instrumentation";

/// Command sent when the host has put the checkout on screen.
pub const PRESENTED_COMMAND: &str = "presented";

/// Builds the script that dispatches `command` with an optional payload.
///
/// `command` is emitted as a JSON string literal, so any text is safe.
/// `payload` is inserted verbatim: it must already be a JavaScript expression
/// (typically serialized JSON).
pub fn dispatch_script(config: &BridgeConfig, command: &str, payload: Option<&str>) -> String {
    let mut args = js_string(command);
    if let Some(payload) = payload {
        args.push_str(", ");
        args.push_str(payload);
    }
    guarded_dispatch(config, &args)
}

/// Builds the script that dispatches an instrumentation record.
///
/// The record is wrapped as `{"detail": record}`.  When
/// [`BridgeConfig::instrumentation_delay_ms`] is non-zero the dispatch is
/// deferred with `setTimeout`.
///
/// # Errors
///
/// Returns [`BridgeError::UnencodableInstrumentation`] when the record cannot
/// be serialized.
pub fn instrumentation_script<T: Serialize + ?Sized>(
    config: &BridgeConfig,
    detail: &T,
) -> Result<String, BridgeError> {
    let payload = serde_json::to_string(&InstrumentationEnvelope { detail })
        .map_err(BridgeError::UnencodableInstrumentation)?;
    let script = dispatch_script(config, INSTRUMENTATION_COMMAND, Some(&payload));

    let delay = config.instrumentation_delay();
    if delay.is_zero() {
        return Ok(script);
    }
    Ok(format!(
        "setTimeout(function () {{\n{script}\n}}, {});",
        delay.as_millis()
    ))
}

fn guarded_dispatch(config: &BridgeConfig, args: &str) -> String {
    let namespace = &config.sdk_namespace;
    let entry = config.dispatch_entry_point();
    let ready_event = js_string(&config.ready_event);
    format!(
        "if ({namespace} && {entry}) {{\n    {entry}({args});\n}} else {{\n    window.addEventListener({ready_event}, function () {{\n        {entry}({args});\n    }}, {{passive: true, once: true}});\n}}"
    )
}

/// Quotes `text` as a JSON (and therefore JavaScript) string literal.
fn js_string(text: &str) -> String {
    Value::String(text.to_owned()).to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
