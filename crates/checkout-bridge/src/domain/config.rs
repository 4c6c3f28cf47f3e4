//! Bridge configuration types.
//!
//! [`BridgeConfig`] is the single source of truth for everything the
//! transport needs to know about the web content it talks to: where the
//! dispatch entry point lives, which DOM event announces it, and how long to
//! delay instrumentation scripts.
//!
//! Every field has a default, so an empty TOML file (or no file at all)
//! yields a working configuration.  The infrastructure layer is responsible
//! for reading the file; this module never touches the file system.

use std::time::Duration;

use checkout_core::{ApplicationIdentifier, ColorScheme};
use serde::{Deserialize, Serialize};

/// All runtime configuration for a bridge transport.
///
/// # Example
///
/// ```rust
/// use checkout_bridge::domain::BridgeConfig;
///
/// let cfg = BridgeConfig::default();
/// assert_eq!(cfg.dispatch_entry_point(), "window.MobileCheckoutSdk.dispatchMessage");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// JavaScript object that exposes the dispatch entry point.
    pub sdk_namespace: String,

    /// Name of the dispatch function on [`BridgeConfig::sdk_namespace`].
    pub dispatch_function: String,

    /// DOM event the web content fires once the entry point is attached.
    pub ready_event: String,

    /// Name of the host message handler the web content posts envelopes to.
    pub message_handler: String,

    /// Delay, in milliseconds, wrapped around instrumentation scripts.
    ///
    /// Works around web content that attaches its instrumentation listener
    /// late.  `0` dispatches immediately.
    pub instrumentation_delay_ms: u64,

    /// Default `tracing` filter: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    pub log_level: String,

    /// Inputs to the application identifier string.
    pub identity: IdentityConfig,
}

/// Inputs to [`ApplicationIdentifier`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub sdk_version: String,
    pub color_scheme: ColorScheme,
    /// Client-platform suffix, e.g. `"ReactNative"`.
    pub platform: Option<String>,
}

impl Default for BridgeConfig {
    /// | Field                      | Default                     |
    /// |----------------------------|-----------------------------|
    /// | sdk_namespace              | `window.MobileCheckoutSdk`  |
    /// | dispatch_function          | `dispatchMessage`           |
    /// | ready_event                | `mobileCheckoutBridgeReady` |
    /// | message_handler            | `mobileCheckoutSdk`         |
    /// | instrumentation_delay_ms   | `1000`                      |
    /// | log_level                  | `info`                      |
    fn default() -> Self {
        Self {
            sdk_namespace: "window.MobileCheckoutSdk".to_string(),
            dispatch_function: "dispatchMessage".to_string(),
            ready_event: "mobileCheckoutBridgeReady".to_string(),
            message_handler: "mobileCheckoutSdk".to_string(),
            instrumentation_delay_ms: 1000,
            log_level: "info".to_string(),
            identity: IdentityConfig::default(),
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            sdk_version: env!("CARGO_PKG_VERSION").to_string(),
            color_scheme: ColorScheme::Automatic,
            platform: None,
        }
    }
}

impl BridgeConfig {
    /// Fully-qualified dispatch entry point, e.g. `window.MobileCheckoutSdk.dispatchMessage`.
    pub fn dispatch_entry_point(&self) -> String {
        format!("{}.{}", self.sdk_namespace, self.dispatch_function)
    }

    /// Instrumentation delay as a [`Duration`].
    pub fn instrumentation_delay(&self) -> Duration {
        Duration::from_millis(self.instrumentation_delay_ms)
    }

    /// Application identifier built from [`BridgeConfig::identity`].
    pub fn application_identifier(&self) -> ApplicationIdentifier {
        let id = ApplicationIdentifier {
            sdk_version: self.identity.sdk_version.clone(),
            ..ApplicationIdentifier::new(self.identity.color_scheme)
        };
        match &self.identity.platform {
            Some(platform) => id.with_platform(platform.clone()),
            None => id,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entry_point() {
        let cfg = BridgeConfig::default();
        assert_eq!(
            cfg.dispatch_entry_point(),
            "window.MobileCheckoutSdk.dispatchMessage"
        );
    }

    #[test]
    fn test_default_instrumentation_delay_is_one_second() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.instrumentation_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_default_identifier() {
        let cfg = BridgeConfig::default();
        let id = cfg.application_identifier().to_string();
        assert_eq!(
            id,
            format!(
                "CheckoutBridge/{} (8.1;automatic;standard)",
                env!("CARGO_PKG_VERSION")
            )
        );
    }

    #[test]
    fn test_identifier_with_platform() {
        let cfg = BridgeConfig {
            identity: IdentityConfig {
                sdk_version: "3.0.0".to_string(),
                color_scheme: ColorScheme::Light,
                platform: Some("ReactNative".to_string()),
            },
            ..BridgeConfig::default()
        };

        assert_eq!(
            cfg.application_identifier().to_string(),
            "CheckoutBridge/3.0.0 (8.1;light;standard_ReactNative)"
        );
    }

    #[test]
    fn test_config_can_be_cloned() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.clone(), cfg);
    }
}
