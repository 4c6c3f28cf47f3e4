//! The seam between the transport and the web view.
//!
//! The transport never touches a web view directly.  Hosts implement
//! [`ScriptEvaluator`] for whatever web view they embed; the infrastructure
//! layer ships a recording mock and a tokio channel implementation.

use thiserror::Error;

/// Error type for script evaluation.
///
/// The transport logs these and carries on; they never reach `send` callers.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// The web view is gone (closed, torn down, or its channel dropped).
    #[error("web view unavailable")]
    Unavailable,
    /// The web view rejected or failed to run the script.
    #[error("script evaluation failed: {0}")]
    Script(String),
}

/// Evaluates script in the web view.
///
/// Evaluation is fire-and-forget: returning `Ok` means the script was handed
/// to the web view, not that it has run.  Implementations must not call back
/// into the transport that owns them.
pub trait ScriptEvaluator: Send + Sync {
    fn evaluate_script(&self, script: &str) -> Result<(), EvaluationError>;
}
