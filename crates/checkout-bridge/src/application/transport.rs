//! The bridge transport: readiness handshake, buffering, and dispatch.
//!
//! # State machine
//!
//! ```text
//!                decode("init")
//!  Uninitialized ───────────────▶ Ready
//!        ▲                          │
//!        └───────── reset() ────────┘
//! ```
//!
//! While `Uninitialized`, [`BridgeTransport::send`] appends to a FIFO queue
//! instead of evaluating script.  Decoding an `init` envelope flips the state
//! to `Ready` and evaluates every queued send in enqueue order, exactly once,
//! before `decode` returns.
//!
//! # Threading
//!
//! The readiness flag and the queue sit behind one mutex.  Scripts are handed
//! to the evaluator while that mutex is held, so a `send` racing with the
//! `init` flush can never overtake a buffered send.  Evaluators are
//! fire-and-forget and must not call back into the transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use checkout_core::{BridgeError, CheckoutFailure, MessageEnvelope, WebEvent};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::application::delegate::{route_event, CheckoutEventDelegate};
use crate::application::evaluator::ScriptEvaluator;
use crate::application::script::{
    dispatch_script, instrumentation_script, INSTRUMENTATION_COMMAND, PRESENTED_COMMAND,
};
use crate::domain::config::BridgeConfig;
use crate::domain::instrumentation::InstrumentationPayload;

/// Whether the web content has announced its message listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessState {
    Uninitialized,
    Ready,
}

/// A send deferred until the web content is ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    pub command: String,
    pub payload: Option<String>,
}

#[derive(Debug)]
struct BridgeState {
    readiness: ReadinessState,
    pending: VecDeque<PendingSend>,
}

impl BridgeState {
    fn new() -> Self {
        Self {
            readiness: ReadinessState::Uninitialized,
            pending: VecDeque::new(),
        }
    }
}

/// Host side of the bridge for one web view session.
///
/// Construct one per web view and share it by reference (or `Arc`) with
/// every call site that talks to that web view.
pub struct BridgeTransport {
    session_id: Uuid,
    config: Arc<BridgeConfig>,
    evaluator: Arc<dyn ScriptEvaluator>,
    state: Mutex<BridgeState>,
}

impl BridgeTransport {
    /// Creates a transport in the `Uninitialized` state.
    pub fn new(config: impl Into<Arc<BridgeConfig>>, evaluator: Arc<dyn ScriptEvaluator>) -> Self {
        let session_id = Uuid::new_v4();
        debug!(session = %session_id, "bridge transport created");
        Self {
            session_id,
            config: config.into(),
            evaluator,
            state: Mutex::new(BridgeState::new()),
        }
    }

    /// Identifier used in this transport's log fields.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn readiness(&self) -> ReadinessState {
        self.lock().readiness
    }

    pub fn is_ready(&self) -> bool {
        self.readiness() == ReadinessState::Ready
    }

    /// Number of sends waiting for `init`.
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Snapshot of the sends waiting for `init`, oldest first.
    pub fn pending(&self) -> Vec<PendingSend> {
        self.lock().pending.iter().cloned().collect()
    }

    // ── Outbound ──────────────────────────────────────────────────────────────

    /// Dispatches `command` to the web content.
    ///
    /// `payload` must already be a script expression (usually serialized
    /// JSON); it is passed through untouched.  Before `init` the send is
    /// queued.  Evaluation failures are logged, never returned.
    pub fn send(&self, command: &str, payload: Option<&str>) {
        let mut state = self.lock();
        match state.readiness {
            ReadinessState::Uninitialized => {
                state.pending.push_back(PendingSend {
                    command: command.to_string(),
                    payload: payload.map(str::to_string),
                });
                debug!(
                    session = %self.session_id,
                    command,
                    queued = state.pending.len(),
                    "web content not ready; send deferred"
                );
            }
            ReadinessState::Ready => {
                self.evaluate(command, &dispatch_script(&self.config, command, payload));
            }
        }
    }

    /// Tells the web content the checkout is on screen.
    pub fn notify_presented(&self) {
        self.send(PRESENTED_COMMAND, None);
    }

    /// Sends a telemetry record.
    ///
    /// Not gated on readiness: the generated script carries its own guard and
    /// delay.  Returns `false` (after logging) if the record could not be
    /// encoded; callers are free to ignore the result.
    pub fn instrument(&self, metric: &InstrumentationPayload) -> bool {
        self.instrument_detail(metric)
    }

    pub(crate) fn instrument_detail<T: Serialize + ?Sized>(&self, detail: &T) -> bool {
        match instrumentation_script(&self.config, detail) {
            Ok(script) => {
                let _state = self.lock();
                self.evaluate(INSTRUMENTATION_COMMAND, &script);
                true
            }
            Err(e) => {
                error!(session = %self.session_id, error = %e, "dropping instrumentation record");
                false
            }
        }
    }

    // ── Inbound ───────────────────────────────────────────────────────────────

    /// Decodes one raw message posted by the web content.
    ///
    /// On `init` the transport becomes ready and flushes queued sends before
    /// returning.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidBridgeEvent`] for malformed messages.
    pub fn decode(&self, raw: &str) -> Result<WebEvent, BridgeError> {
        self.observe(checkout_core::decode_message(raw))
    }

    /// Decodes a loosely-typed script message (must be a string).
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidBridgeEvent`] for non-string or malformed messages.
    pub fn decode_script_message(&self, message: &Value) -> Result<WebEvent, BridgeError> {
        self.observe(checkout_core::decode_script_message(message))
    }

    /// Decodes an already-parsed envelope.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidBridgeEvent`] for malformed bodies.
    pub fn decode_envelope(&self, envelope: &MessageEnvelope) -> Result<WebEvent, BridgeError> {
        self.observe(checkout_core::decode_envelope(envelope))
    }

    /// Decodes `raw` and routes the outcome to `delegate`.
    ///
    /// Decode failures reach the delegate as
    /// [`CheckoutFailure::BridgeFailure`] and are also returned.
    ///
    /// # Errors
    ///
    /// Same as [`BridgeTransport::decode`].
    pub fn receive(
        &self,
        raw: &str,
        delegate: &mut dyn CheckoutEventDelegate,
    ) -> Result<WebEvent, BridgeError> {
        match self.decode(raw) {
            Ok(event) => {
                route_event(&event, delegate);
                Ok(event)
            }
            Err(e) => {
                delegate.on_checkout_failed(&CheckoutFailure::from(&e));
                Err(e)
            }
        }
    }

    /// Returns to `Uninitialized` and drops every queued send.
    pub fn reset(&self) {
        let mut state = self.lock();
        let dropped = state.pending.len();
        state.pending.clear();
        state.readiness = ReadinessState::Uninitialized;
        info!(session = %self.session_id, dropped, "bridge transport reset");
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn observe(&self, decoded: Result<WebEvent, BridgeError>) -> Result<WebEvent, BridgeError> {
        match &decoded {
            Ok(WebEvent::Init) => self.mark_ready(),
            Ok(event) => debug!(session = %self.session_id, event = event.kind(), "decoded bridge event"),
            Err(e) => warn!(session = %self.session_id, error = %e, "rejected bridge message"),
        }
        decoded
    }

    fn mark_ready(&self) {
        let mut state = self.lock();
        if state.readiness == ReadinessState::Ready {
            debug!(session = %self.session_id, "repeated init; already ready");
        } else {
            state.readiness = ReadinessState::Ready;
            info!(
                session = %self.session_id,
                pending = state.pending.len(),
                "web content ready; flushing deferred sends"
            );
        }

        while let Some(send) = state.pending.pop_front() {
            let script = dispatch_script(&self.config, &send.command, send.payload.as_deref());
            self.evaluate(&send.command, &script);
        }
    }

    /// Callers hold the state lock so evaluation order matches queue order.
    fn evaluate(&self, command: &str, script: &str) {
        if let Err(e) = self.evaluator.evaluate_script(script) {
            warn!(session = %self.session_id, command, error = %e, "script evaluation failed");
        }
    }

    fn lock(&self) -> MutexGuard<'_, BridgeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::evaluator::mock::RecordingEvaluator;
    use std::collections::BTreeMap;

    const INIT: &str = r#"{"name":"init"}"#;

    fn transport() -> (BridgeTransport, Arc<RecordingEvaluator>) {
        let evaluator = Arc::new(RecordingEvaluator::new());
        let transport = BridgeTransport::new(BridgeConfig::default(), evaluator.clone());
        (transport, evaluator)
    }

    fn script_for(command: &str, payload: Option<&str>) -> String {
        dispatch_script(&BridgeConfig::default(), command, payload)
    }

    #[test]
    fn test_new_transport_is_uninitialized() {
        let (transport, _) = transport();
        assert_eq!(transport.readiness(), ReadinessState::Uninitialized);
        assert_eq!(transport.pending_len(), 0);
    }

    #[test]
    fn test_send_before_init_is_buffered() {
        // Arrange
        let (transport, evaluator) = transport();

        // Act
        transport.send("presented", None);

        // Assert: nothing evaluated, one send queued
        assert!(evaluator.scripts().is_empty());
        assert_eq!(transport.pending_len(), 1);
    }

    #[test]
    fn test_pending_snapshot_lists_queued_sends_in_order() {
        let (transport, _) = transport();
        transport.send("first", None);
        transport.send("second", Some("{}"));

        let pending = transport.pending();

        assert_eq!(
            pending,
            vec![
                PendingSend { command: "first".to_string(), payload: None },
                PendingSend { command: "second".to_string(), payload: Some("{}".to_string()) },
            ]
        );
        transport.decode(INIT).unwrap();
        assert!(transport.pending().is_empty());
    }

    #[test]
    fn test_init_flushes_buffered_sends_in_order() {
        // Arrange
        let (transport, evaluator) = transport();
        transport.send("first", None);
        transport.send("second", Some(r#"{"n":2}"#));
        transport.send("third", None);

        // Act
        let event = transport.decode(INIT).unwrap();

        // Assert
        assert_eq!(event, WebEvent::Init);
        assert!(transport.is_ready());
        assert_eq!(transport.pending_len(), 0);
        assert_eq!(
            evaluator.scripts(),
            vec![
                script_for("first", None),
                script_for("second", Some(r#"{"n":2}"#)),
                script_for("third", None),
            ]
        );
    }

    #[test]
    fn test_send_after_init_is_evaluated_immediately() {
        let (transport, evaluator) = transport();
        transport.decode(INIT).unwrap();

        transport.send("presented", None);

        assert_eq!(evaluator.scripts(), vec![script_for("presented", None)]);
        assert_eq!(transport.pending_len(), 0);
    }

    #[test]
    fn test_repeated_init_does_not_reflush() {
        let (transport, evaluator) = transport();
        transport.send("once", None);
        transport.decode(INIT).unwrap();

        transport.decode(INIT).unwrap();

        assert_eq!(evaluator.scripts().len(), 1);
        assert!(transport.is_ready());
    }

    #[test]
    fn test_non_init_events_do_not_flip_readiness() {
        let (transport, evaluator) = transport();
        transport.send("queued", None);

        transport
            .decode(r#"{"name":"checkoutBlockingEvent","body":"true"}"#)
            .unwrap();
        transport.decode(r#"{"name":"foo","body":"{}"}"#).unwrap();

        assert!(!transport.is_ready());
        assert!(evaluator.scripts().is_empty());
        assert_eq!(transport.pending_len(), 1);
    }

    #[test]
    fn test_failed_decode_leaves_state_untouched() {
        let (transport, _) = transport();
        transport.send("queued", None);

        let result = transport.decode(r#"{"name":"init""#);

        assert!(matches!(result, Err(BridgeError::InvalidBridgeEvent(_))));
        assert!(!transport.is_ready());
        assert_eq!(transport.pending_len(), 1);
    }

    #[test]
    fn test_reset_clears_readiness_and_queue() {
        // Arrange: a transport with something queued
        let (transport, evaluator) = transport();
        transport.send("dropped", None);

        // Act
        transport.reset();
        transport.decode(INIT).unwrap();

        // Assert: the dropped send never reached the web view
        assert!(evaluator.scripts().is_empty());
    }

    #[test]
    fn test_send_after_reset_is_buffered_again() {
        let (transport, evaluator) = transport();
        transport.decode(INIT).unwrap();
        transport.send("before-reset", None);

        transport.reset();
        transport.send("after-reset", None);

        assert_eq!(transport.readiness(), ReadinessState::Uninitialized);
        assert_eq!(transport.pending_len(), 1);
        assert_eq!(evaluator.scripts(), vec![script_for("before-reset", None)]);

        transport.decode(INIT).unwrap();
        assert_eq!(evaluator.scripts().last(), Some(&script_for("after-reset", None)));
    }

    #[test]
    fn test_evaluation_failure_is_swallowed() {
        let evaluator = Arc::new(RecordingEvaluator::failing());
        let transport = BridgeTransport::new(BridgeConfig::default(), evaluator.clone());
        transport.send("lost", None);

        // Must not panic or error.
        transport.decode(INIT).unwrap();
        transport.send("also-lost", None);

        assert_eq!(transport.pending_len(), 0);
        assert_eq!(evaluator.attempts(), 2);
    }

    #[test]
    fn test_instrument_is_not_gated_on_readiness() {
        let (transport, evaluator) = transport();

        let dispatched = transport.instrument(&InstrumentationPayload::counter("preloaded", 1));

        assert!(dispatched);
        let scripts = evaluator.scripts();
        assert_eq!(scripts.len(), 1);
        assert!(scripts[0].contains(r#""instrumentation", {"detail":{"name":"preloaded""#));
    }

    #[test]
    fn test_unencodable_instrumentation_is_dropped() {
        let (transport, evaluator) = transport();
        let mut detail = BTreeMap::new();
        detail.insert((0u8, 0u8), 1);

        let dispatched = transport.instrument_detail(&detail);

        assert!(!dispatched);
        assert!(evaluator.scripts().is_empty());
    }

    #[test]
    fn test_notify_presented_uses_presented_command() {
        let (transport, evaluator) = transport();
        transport.notify_presented();
        transport.decode(INIT).unwrap();
        assert_eq!(evaluator.scripts(), vec![script_for("presented", None)]);
    }

    #[test]
    fn test_decode_script_message_flips_readiness() {
        let (transport, _) = transport();
        transport
            .decode_script_message(&Value::String(INIT.to_string()))
            .unwrap();
        assert!(transport.is_ready());
    }

    #[test]
    fn test_decode_envelope_flips_readiness() {
        let (transport, _) = transport();
        transport
            .decode_envelope(&MessageEnvelope::new("init", None))
            .unwrap();
        assert!(transport.is_ready());
    }

    #[test]
    fn test_sessions_are_independent() {
        let (a, a_eval) = transport();
        let (b, b_eval) = transport();
        a.send("to-a", None);
        b.send("to-b", None);

        a.decode(INIT).unwrap();

        assert_ne!(a.session_id(), b.session_id());
        assert_eq!(a_eval.scripts(), vec![script_for("to-a", None)]);
        assert!(b_eval.scripts().is_empty());
        assert_eq!(b.pending_len(), 1);
    }
}
