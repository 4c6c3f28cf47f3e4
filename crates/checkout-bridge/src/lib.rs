//! checkout-bridge library crate.
//!
//! This crate provides the host side of the message bridge between a native
//! application and the checkout web view it embeds.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Web content (script messages / evaluated script)
//!         ↕
//! [checkout-bridge]
//!   ├── domain/           Pure types: BridgeConfig, instrumentation records
//!   ├── application/      Readiness state machine, script generation, event routing
//!   └── infrastructure/
//!         ├── evaluator/  ScriptEvaluator implementations (recording mock, tokio channel)
//!         ├── storage/    TOML configuration loading
//!         └── replay/     Replays recorded inbound traffic through a transport
//! ```
//!
//! Decoding of inbound envelopes lives in the `checkout-core` crate; this
//! crate wraps it with the readiness handshake: outbound sends issued before
//! the web content reports `init` are buffered and flushed in order the moment
//! it does.
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no async.
//! - `application` depends on `domain` and `checkout-core` only; the web view
//!   is reached through the [`application::ScriptEvaluator`] trait.
//! - `infrastructure` supplies evaluators, file access and the async runtime.

/// Domain layer: configuration and outbound record types (no I/O).
pub mod domain;

/// Application layer: the bridge transport and its collaborators.
pub mod application;

/// Infrastructure layer: evaluators, configuration storage, and replay.
pub mod infrastructure;

pub use application::{BridgeTransport, CheckoutEventDelegate, ReadinessState, ScriptEvaluator};
pub use domain::{BridgeConfig, InstrumentationPayload, MetricType};
