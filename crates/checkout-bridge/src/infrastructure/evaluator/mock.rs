//! Recording script evaluator for tests.
//!
//! Every successfully evaluated script is pushed into a `Mutex<Vec<String>>`
//! so assertions can check exactly what reached the web view and in what
//! order.
//!
//! # `should_fail` flag
//!
//! Construct with [`RecordingEvaluator::failing`] to make every evaluation
//! return [`EvaluationError::Script`].  Failed attempts are counted but not
//! recorded as scripts.
//!
//! ```ignore
//! let evaluator = Arc::new(RecordingEvaluator::new());
//! let transport = BridgeTransport::new(BridgeConfig::default(), evaluator.clone());
//!
//! transport.decode(r#"{"name":"init"}"#).unwrap();
//! transport.notify_presented();
//!
//! assert_eq!(evaluator.scripts().len(), 1);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::evaluator::{EvaluationError, ScriptEvaluator};

/// An evaluator that records scripts instead of running them.
#[derive(Default)]
pub struct RecordingEvaluator {
    /// Scripts that were "evaluated", oldest first.
    pub scripts: Mutex<Vec<String>>,
    /// When `true`, every call fails with [`EvaluationError::Script`].
    pub should_fail: bool,
    attempts: AtomicUsize,
}

impl RecordingEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// An evaluator whose every call fails.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Snapshot of the recorded scripts.
    pub fn scripts(&self) -> Vec<String> {
        self.scripts
            .lock()
            .map(|scripts| scripts.clone())
            .unwrap_or_default()
    }

    /// Number of `evaluate_script` calls, including failed ones.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl ScriptEvaluator for RecordingEvaluator {
    fn evaluate_script(&self, script: &str) -> Result<(), EvaluationError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(EvaluationError::Script("mock failure".to_string()));
        }
        self.scripts
            .lock()
            .map_err(|_| EvaluationError::Unavailable)?
            .push(script.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_scripts_in_order() {
        let evaluator = RecordingEvaluator::new();
        evaluator.evaluate_script("a()").unwrap();
        evaluator.evaluate_script("b()").unwrap();
        assert_eq!(evaluator.scripts(), vec!["a()", "b()"]);
        assert_eq!(evaluator.attempts(), 2);
    }

    #[test]
    fn test_failing_evaluator_records_nothing() {
        let evaluator = RecordingEvaluator::failing();
        let result = evaluator.evaluate_script("a()");
        assert!(matches!(result, Err(EvaluationError::Script(_))));
        assert!(evaluator.scripts().is_empty());
        assert_eq!(evaluator.attempts(), 1);
    }
}
