//! Application identifier sent by the host's networking layer.
//!
//! Format:
//!
//! ```text
//! CheckoutBridge/<sdk_version> (<schema_version>;<color_scheme>;standard[_<platform>])
//! ```
//!
//! For example `CheckoutBridge/0.1.0 (8.1;automatic;standard)` or, for a host
//! built on a cross-platform framework,
//! `CheckoutBridge/0.1.0 (8.1;dark;standard_ReactNative)`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Version of the event schema this crate decodes.
pub const SCHEMA_VERSION: &str = "8.1";

const PRODUCT: &str = "CheckoutBridge";

/// Theme requested for the checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// Follow the device setting.
    #[default]
    Automatic,
    Light,
    Dark,
    /// Use the storefront's own web styling.
    WebDefault,
}

impl ColorScheme {
    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Automatic => "automatic",
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
            ColorScheme::WebDefault => "web_default",
        }
    }
}

/// Builder for the application identifier string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationIdentifier {
    pub sdk_version: String,
    pub schema_version: String,
    pub color_scheme: ColorScheme,
    /// Client-platform suffix, e.g. `"ReactNative"`.
    pub platform: Option<String>,
}

impl ApplicationIdentifier {
    /// Identifier for this crate's version and schema.
    pub fn new(color_scheme: ColorScheme) -> Self {
        Self {
            sdk_version: env!("CARGO_PKG_VERSION").to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            color_scheme,
            platform: None,
        }
    }

    /// Sets the client-platform suffix.  Blank strings clear it.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        let platform = platform.into();
        self.platform = (!platform.trim().is_empty()).then_some(platform);
        self
    }
}

impl fmt::Display for ApplicationIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PRODUCT}/{} ({};{};standard",
            self.sdk_version,
            self.schema_version,
            self.color_scheme.as_str()
        )?;
        if let Some(platform) = &self.platform {
            write!(f, "_{platform}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(scheme: ColorScheme) -> ApplicationIdentifier {
        ApplicationIdentifier {
            sdk_version: "1.2.3".to_string(),
            ..ApplicationIdentifier::new(scheme)
        }
    }

    #[test]
    fn test_identifier_without_platform() {
        assert_eq!(
            fixed(ColorScheme::Automatic).to_string(),
            "CheckoutBridge/1.2.3 (8.1;automatic;standard)"
        );
    }

    #[test]
    fn test_identifier_with_platform_suffix() {
        let id = fixed(ColorScheme::Dark).with_platform("ReactNative");
        assert_eq!(
            id.to_string(),
            "CheckoutBridge/1.2.3 (8.1;dark;standard_ReactNative)"
        );
    }

    #[test]
    fn test_blank_platform_is_ignored() {
        let id = fixed(ColorScheme::WebDefault).with_platform("  ");
        assert_eq!(id.platform, None);
        assert!(id.to_string().ends_with("(8.1;web_default;standard)"));
    }

    #[test]
    fn test_color_scheme_deserializes_from_snake_case() {
        let scheme: ColorScheme = serde_json::from_str("\"web_default\"").unwrap();
        assert_eq!(scheme, ColorScheme::WebDefault);
    }

    #[test]
    fn test_new_uses_crate_version() {
        let id = ApplicationIdentifier::new(ColorScheme::Light);
        assert_eq!(id.sdk_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(id.schema_version, SCHEMA_VERSION);
    }
}
