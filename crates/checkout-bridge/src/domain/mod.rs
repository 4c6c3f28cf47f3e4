//! Domain layer for checkout-bridge.
//!
//! The domain layer contains pure types with no dependencies on I/O, web
//! views, or async runtimes.
//!
//! # What belongs in the domain layer?
//!
//! - Configuration structures
//! - Outbound record types (instrumentation)
//!
//! # What does NOT belong here?
//!
//! - Inbound event types (those live in `checkout-core`)
//! - Script evaluation (that is the infrastructure layer)
//! - The readiness state machine (that is the application layer)

pub mod config;
pub mod instrumentation;

pub use config::{BridgeConfig, IdentityConfig};
pub use instrumentation::{InstrumentationPayload, MetricType};
