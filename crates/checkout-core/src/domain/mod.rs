//! Domain types carried inside decoded events.
//!
//! These are data-only: they describe the commerce payloads the web content
//! attaches to events (orders, pixel analytics, checkout errors) and the
//! host-facing vocabulary built on top of them (failure categories and the
//! application identifier).  Nothing here performs I/O.

pub mod checkout_error;
pub mod failure;
pub mod identity;
mod nullable;
pub mod order;
pub mod pixel;
