//! Order payload carried by `completed` events.
//!
//! The web content sends the completed order as a JSON object:
//!
//! ```json
//! {"orderDetails":{"id":"gid://shopify/OrderIdentity/1","email":"a@b.c",
//!   "cart":{"token":"t","lines":[...],"price":{...}},
//!   "billingAddress":{...},"deliveries":[...],"paymentMethods":[...]}}
//! ```
//!
//! Every field defaults when absent.  In particular a missing order id becomes
//! the empty string instead of failing the decode; hosts that need the id must
//! check [`OrderDetails::has_id`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::nullable::null_as_default;

/// Top-level `completed` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub order_details: OrderDetails,
}

impl OrderPayload {
    /// The order id, possibly empty.
    pub fn order_id(&self) -> &str {
        &self.order_details.id
    }
}

/// Summary of the placed order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderDetails {
    /// Order identifier.  Empty when the web content omitted it.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub cart: CartInfo,
    pub billing_address: Option<Address>,
    #[serde(deserialize_with = "null_as_default")]
    pub deliveries: Vec<DeliveryInfo>,
    #[serde(deserialize_with = "null_as_default")]
    pub payment_methods: Vec<PaymentMethod>,
}

impl OrderDetails {
    /// `false` when the web content did not send an order id.
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

/// The cart that was checked out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub token: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lines: Vec<CartLine>,
    #[serde(deserialize_with = "null_as_default")]
    pub price: Price,
}

impl CartInfo {
    /// Sum of line quantities.  Widened so large payload quantities cannot overflow.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartLine {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub price: Money,
    pub image: Option<CartLineImage>,
    pub merchandise_id: Option<String>,
    pub product_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub discounts: Vec<Discount>,
}

/// Image URLs at the sizes the web content renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartLineImage {
    pub alt_text: Option<String>,
    pub sm: Option<String>,
    pub md: Option<String>,
    pub lg: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Price {
    pub subtotal: Option<Money>,
    pub shipping: Option<Money>,
    pub taxes: Option<Money>,
    pub total: Option<Money>,
    #[serde(deserialize_with = "null_as_default")]
    pub discounts: Vec<Discount>,
}

/// A monetary amount.  Both parts are optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Money {
    pub amount: Option<f64>,
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Discount {
    pub title: Option<String>,
    pub amount: Option<Money>,
    pub application_type: Option<String>,
    pub value: Option<f64>,
    pub value_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub country_code: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub postal_code: Option<String>,
    pub reference_id: Option<String>,
    pub zone_code: Option<String>,
}

/// How (and where) part of the order is delivered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliveryInfo {
    /// e.g. `"SHIPPING"`, `"PICK_UP"`, `"LOCAL"`.
    #[serde(deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(deserialize_with = "null_as_default")]
    pub details: DeliveryDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliveryDetails {
    pub name: Option<String>,
    pub additional_info: Option<String>,
    pub location: Option<Address>,
}

/// Payment method summary.  `details` is free-form (card brand, last digits...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentMethod {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub details: BTreeMap<String, Option<String>>,
}
