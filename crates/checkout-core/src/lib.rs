//! # checkout-core
//!
//! Shared library for the checkout bridge containing the inbound message
//! decoder, the typed event model, and the commerce payload schema that rides
//! inside decoded events.
//!
//! This crate has zero dependencies on web views, UI frameworks, or async
//! runtimes.  Everything here is a pure function of its input.
//!
//! # Architecture overview (for beginners)
//!
//! A native host application embeds a web view that renders a checkout flow.
//! The two sides talk through a narrow message channel:
//!
//! - **Web → host**: the web content posts a JSON *envelope*
//!   `{"name": "...", "body": "..."}` whose `body` is itself a JSON-encoded
//!   string.  This crate turns that envelope into a [`WebEvent`].
//! - **Host → web**: the host evaluates generated script in the web view.
//!   Script generation and the readiness handshake live in the
//!   `checkout-bridge` crate, which depends on this one.
//!
//! The crate is organised as:
//!
//! - **`protocol`** – The envelope, the [`WebEvent`] sum type, and the decoder
//!   that maps one onto the other.
//! - **`domain`** – Data-only payload types (orders, pixel events, checkout
//!   errors) plus the host-facing failure taxonomy and application
//!   identifier.
//! - **`error`** – The [`BridgeError`] type shared with the transport crate.

pub mod domain;
pub mod error;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `checkout_core::WebEvent` instead of `checkout_core::protocol::events::WebEvent`.
pub use domain::failure::CheckoutFailure;
pub use domain::identity::{ApplicationIdentifier, ColorScheme, SCHEMA_VERSION};
pub use error::{BridgeError, DecodeCause};
pub use protocol::decoder::{decode_envelope, decode_message, decode_script_message};
pub use protocol::envelope::MessageEnvelope;
pub use protocol::events::WebEvent;
