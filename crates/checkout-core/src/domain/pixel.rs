//! Web pixel analytics events carried by `webPixels` envelopes.
//!
//! Pixel events are a small protocol of their own.  The envelope body is
//!
//! ```json
//! {"name":"page_viewed","event":{"type":"standard","id":"sh-1","name":"page_viewed",
//!   "timestamp":"2024-01-01T00:00:00.000Z","context":{...},"data":{...}}}
//! ```
//!
//! and `event.type` selects between [`PixelEvent::Standard`] and
//! [`PixelEvent::Custom`].  Standard events named `alert_displayed` and
//! `ui_extension_errored` carry extra typed fields and get their own shapes.
//!
//! Custom events belong to the merchant: their `customData` is kept as the
//! exact JSON text the web content sent, for the host to decode against its
//! own schema with [`CustomEvent::custom_data_as`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::nullable::null_as_default;
use crate::domain::order::Money;

/// Standard event name with a specialised [`AlertDisplayedEvent`] shape.
pub const ALERT_DISPLAYED: &str = "alert_displayed";
/// Standard event name with a specialised [`UiExtensionErroredEvent`] shape.
pub const UI_EXTENSION_ERRORED: &str = "ui_extension_errored";

/// Standard event names the web content is known to emit.
pub const KNOWN_STANDARD_EVENTS: &[&str] = &[
    "page_viewed",
    "cart_viewed",
    "checkout_started",
    "checkout_completed",
    "checkout_contact_info_submitted",
    "checkout_address_info_submitted",
    "checkout_shipping_info_submitted",
    "payment_info_submitted",
    "collection_viewed",
    "product_viewed",
    "product_added_to_cart",
    "product_removed_from_cart",
    "search_submitted",
    ALERT_DISPLAYED,
    UI_EXTENSION_ERRORED,
];

/// A decoded pixel event.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelEvent {
    Standard(StandardEvent),
    Custom(CustomEvent),
}

impl PixelEvent {
    /// Event name, e.g. `"checkout_started"`.
    pub fn name(&self) -> &str {
        match self {
            PixelEvent::Standard(e) => e.metadata().name.as_str(),
            PixelEvent::Custom(e) => e.metadata.name.as_str(),
        }
    }
}

/// Fields shared by every pixel event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventMetadata {
    pub id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// ISO-8601 timestamp as sent by the web content.
    pub timestamp: Option<String>,
    pub context: Option<Context>,
}

/// A standard (platform-defined) pixel event.
#[derive(Debug, Clone, PartialEq)]
pub enum StandardEvent {
    AlertDisplayed(AlertDisplayedEvent),
    UiExtensionErrored(UiExtensionErroredEvent),
    Generic(GenericStandardEvent),
}

impl StandardEvent {
    pub fn metadata(&self) -> &EventMetadata {
        match self {
            StandardEvent::AlertDisplayed(e) => &e.metadata,
            StandardEvent::UiExtensionErrored(e) => &e.metadata,
            StandardEvent::Generic(e) => &e.metadata,
        }
    }

    /// `true` when the name is in [`KNOWN_STANDARD_EVENTS`].
    pub fn is_known(&self) -> bool {
        KNOWN_STANDARD_EVENTS.contains(&self.metadata().name.as_str())
    }
}

/// Any standard event without a specialised shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericStandardEvent {
    pub metadata: EventMetadata,
    pub data: Option<StandardEventData>,
}

/// `alert_displayed`: the checkout showed an alert to the buyer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertDisplayedEvent {
    pub metadata: EventMetadata,
    pub alert: Option<Alert>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Alert {
    /// Field or area the alert is attached to.
    pub target: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: Option<String>,
}

/// `ui_extension_errored`: a checkout UI extension threw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiExtensionErroredEvent {
    pub metadata: EventMetadata,
    pub error: Option<UiExtensionError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiExtensionError {
    pub api_version: Option<String>,
    pub app_id: Option<String>,
    pub app_name: Option<String>,
    pub app_version: Option<String>,
    pub extension_name: Option<String>,
    pub extension_target: Option<String>,
    pub message: Option<String>,
    pub placement_reference: Option<String>,
    pub trace: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// A merchant-defined pixel event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomEvent {
    pub metadata: EventMetadata,
    /// The raw `customData` JSON text, byte-for-byte as received.
    pub custom_data: Option<String>,
}

impl CustomEvent {
    /// Decodes `customData` into a host-defined type.
    ///
    /// Returns `None` when the event carried no custom data.
    pub fn custom_data_as<T: DeserializeOwned>(&self) -> Option<serde_json::Result<T>> {
        self.custom_data.as_deref().map(|raw| serde_json::from_str(raw))
    }
}

// ── Standard event data ───────────────────────────────────────────────────────

/// `data` of a generic standard event.  Which member is set depends on the
/// event name (`checkout_*` → `checkout`, `product_viewed` → `product_variant`...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StandardEventData {
    pub cart: Option<Cart>,
    pub cart_line: Option<CartLine>,
    pub checkout: Option<Checkout>,
    pub collection: Option<Collection>,
    pub product_variant: Option<ProductVariant>,
    pub search_result: Option<SearchResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Checkout {
    pub token: Option<String>,
    pub currency_code: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub line_items: Vec<CheckoutLineItem>,
    pub subtotal_price: Option<Money>,
    pub total_price: Option<Money>,
    pub total_tax: Option<Money>,
    pub shipping_line: Option<ShippingRate>,
    pub billing_address: Option<MailingAddress>,
    pub shipping_address: Option<MailingAddress>,
    #[serde(deserialize_with = "null_as_default")]
    pub attributes: Vec<Attribute>,
    pub order: Option<Order>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutLineItem {
    pub id: Option<String>,
    pub title: Option<String>,
    pub quantity: Option<u32>,
    pub variant: Option<ProductVariant>,
    pub final_line_price: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingRate {
    pub price: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MailingAddress {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub province: Option<String>,
    pub province_code: Option<String>,
    pub zip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attribute {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cart {
    pub id: Option<String>,
    pub total_quantity: Option<u32>,
    pub cost: Option<CartCost>,
    #[serde(deserialize_with = "null_as_default")]
    pub lines: Vec<CartLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartCost {
    pub total_amount: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartLine {
    pub cost: Option<CartCost>,
    pub merchandise: Option<ProductVariant>,
    pub quantity: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Collection {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub product_variants: Vec<ProductVariant>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult {
    pub query: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub product_variants: Vec<ProductVariant>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductVariant {
    pub id: Option<String>,
    pub title: Option<String>,
    pub sku: Option<String>,
    pub price: Option<Money>,
    pub image: Option<Image>,
    pub product: Option<Product>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub id: Option<String>,
    pub title: Option<String>,
    pub vendor: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Image {
    pub src: Option<String>,
}

// ── Browser context ───────────────────────────────────────────────────────────

/// Snapshot of the browser environment when the event fired.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Context {
    pub document: Option<WebDocument>,
    pub navigator: Option<WebNavigator>,
    pub window: Option<WebWindow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebDocument {
    pub character_set: Option<String>,
    pub location: Option<Location>,
    pub referrer: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub hash: Option<String>,
    pub host: Option<String>,
    pub hostname: Option<String>,
    pub href: Option<String>,
    pub origin: Option<String>,
    pub pathname: Option<String>,
    pub port: Option<String>,
    pub protocol: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebNavigator {
    pub cookie_enabled: Option<bool>,
    pub language: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebWindow {
    pub inner_height: Option<f64>,
    pub inner_width: Option<f64>,
    pub outer_height: Option<f64>,
    pub outer_width: Option<f64>,
    pub screen_x: Option<f64>,
    pub screen_y: Option<f64>,
    pub scroll_x: Option<f64>,
    pub scroll_y: Option<f64>,
    pub origin: Option<String>,
    pub location: Option<Location>,
}
