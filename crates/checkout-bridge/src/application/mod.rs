//! Application layer: the bridge transport and the pure logic around it.
//!
//! - [`script`] builds the JavaScript evaluated in the web view.
//! - [`transport`] owns the readiness state machine and the pending-send queue.
//! - [`delegate`] routes decoded events to host callbacks.
//! - [`evaluator`] defines the seam to the web view.

pub mod delegate;
pub mod evaluator;
pub mod script;
pub mod transport;

pub use delegate::{route_event, CheckoutEventDelegate};
pub use evaluator::{EvaluationError, ScriptEvaluator};
pub use transport::{BridgeTransport, PendingSend, ReadinessState};
