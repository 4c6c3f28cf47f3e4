//! Channel-backed script evaluator.
//!
//! The transport is synchronous, but web views usually live on their own
//! task or thread.  [`ChannelEvaluator`] bridges the two: `evaluate_script`
//! pushes the script onto an unbounded tokio channel and returns at once;
//! the web view owner drains the receiver and runs each script.
//!
//! ```ignore
//! let (evaluator, mut scripts) = ChannelEvaluator::new();
//! let transport = BridgeTransport::new(config, Arc::new(evaluator));
//!
//! tokio::spawn(async move {
//!     while let Some(script) = scripts.recv().await {
//!         web_view.evaluate_javascript(&script).await;
//!     }
//! });
//! ```
//!
//! An unbounded channel never blocks the sender, so evaluating while the
//! transport holds its state lock is safe.  Once the receiver is dropped,
//! evaluation fails with [`EvaluationError::Unavailable`].

use tokio::sync::mpsc;

use crate::application::evaluator::{EvaluationError, ScriptEvaluator};

/// Sends scripts to the task that owns the web view.
#[derive(Debug, Clone)]
pub struct ChannelEvaluator {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelEvaluator {
    /// Creates an evaluator and the receiver its scripts arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Returns `true` once the receiving side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl ScriptEvaluator for ChannelEvaluator {
    fn evaluate_script(&self, script: &str) -> Result<(), EvaluationError> {
        self.tx
            .send(script.to_string())
            .map_err(|_| EvaluationError::Unavailable)
    }
}
