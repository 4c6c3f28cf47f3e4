//! Replays a recorded message log through a transport.
//!
//! A recording is a text file with one inbound message per line, exactly as
//! the web content posted it:
//!
//! ```text
//! {"name":"init"}
//! {"name":"checkoutBlockingEvent","body":"true"}
//! {"name":"completed","body":"{\"orderDetails\":{\"id\":\"gid://Order/1\"}}"}
//! ```
//!
//! Blank lines are skipped.  Each message goes through
//! [`BridgeTransport::receive`], so readiness and queued sends behave exactly
//! as they would with a live web view.

use std::path::{Path, PathBuf};

use checkout_core::domain::order::OrderPayload;
use checkout_core::{BridgeError, CheckoutFailure, WebEvent};
use thiserror::Error;
use tracing::{debug, info};

use crate::application::delegate::CheckoutEventDelegate;
use crate::application::transport::BridgeTransport;

/// Error type for reading recordings.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("I/O error reading recording at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One non-blank line of a recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMessage {
    /// 1-based line number in the source file.
    pub line: usize,
    pub raw: String,
}

/// The outcome of replaying one message.
#[derive(Debug)]
pub struct ReplayEntry {
    pub line: usize,
    pub outcome: Result<WebEvent, BridgeError>,
}

/// Tallies collected by the replay delegate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Messages that decoded to an event (including unsupported ones).
    pub decoded: usize,
    /// Messages rejected as invalid bridge events.
    pub failed: usize,
    /// Decoded messages with an unrecognised name or pixel kind.
    pub unsupported: usize,
    /// Checkout error events (expired, unavailable, configuration).
    pub checkout_failures: usize,
    /// Order ids of completed checkouts, in replay order.
    pub completed_orders: Vec<String>,
    /// Whether an `init` was seen.
    pub ready: bool,
}

impl CheckoutEventDelegate for ReplaySummary {
    fn on_checkout_ready(&mut self) {
        self.ready = true;
    }

    fn on_checkout_completed(&mut self, order: &OrderPayload) {
        self.completed_orders.push(order.order_id().to_string());
    }

    fn on_checkout_failed(&mut self, failure: &CheckoutFailure) {
        if !matches!(failure, CheckoutFailure::BridgeFailure(_)) {
            self.checkout_failures += 1;
        }
    }

    fn on_unsupported_event(&mut self, _name: &str) {
        self.unsupported += 1;
    }
}

/// Everything a replay produced.
#[derive(Debug, Default)]
pub struct ReplayReport {
    pub entries: Vec<ReplayEntry>,
    pub summary: ReplaySummary,
}

/// Reads a recording, skipping blank lines.
///
/// # Errors
///
/// Returns [`ReplayError::Io`] if the file cannot be read.
pub async fn read_recording(path: &Path) -> Result<Vec<RecordedMessage>, ReplayError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let messages = parse_recording(&content);
    debug!(path = %path.display(), messages = messages.len(), "read recording");
    Ok(messages)
}

/// Splits recording text into messages, skipping blank lines.
pub fn parse_recording(content: &str) -> Vec<RecordedMessage> {
    content
        .lines()
        .enumerate()
        .filter(|(_, raw)| !raw.trim().is_empty())
        .map(|(index, raw)| RecordedMessage {
            line: index + 1,
            raw: raw.to_string(),
        })
        .collect()
}

/// Feeds every message through `transport` in order.
pub fn replay(transport: &BridgeTransport, messages: &[RecordedMessage]) -> ReplayReport {
    let mut report = ReplayReport::default();

    for message in messages {
        let outcome = transport.receive(&message.raw, &mut report.summary);
        match &outcome {
            Ok(_) => report.summary.decoded += 1,
            Err(_) => report.summary.failed += 1,
        }
        report.entries.push(ReplayEntry {
            line: message.line,
            outcome,
        });
    }

    info!(
        session = %transport.session_id(),
        decoded = report.summary.decoded,
        failed = report.summary.failed,
        unsupported = report.summary.unsupported,
        "replay finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::BridgeConfig;
    use crate::infrastructure::evaluator::mock::RecordingEvaluator;
    use std::sync::Arc;

    const RECORDING: &str = r#"{"name":"checkoutBlockingEvent","body":"true"}

{"name":"init"}
{"name":"error","body":"[{\"group\":\"configuration\",\"reason\":\"bad\"}]"}
not json
{"name":"foo","body":"{}"}
{"name":"completed","body":"{\"orderDetails\":{\"id\":\"gid://Order/9\"}}"}
"#;

    #[test]
    fn test_parse_recording_skips_blank_lines_and_keeps_line_numbers() {
        let messages = parse_recording(RECORDING);

        assert_eq!(messages.len(), 6);
        assert_eq!(messages[0].line, 1);
        assert_eq!(messages[1].line, 3);
        assert_eq!(messages[1].raw, r#"{"name":"init"}"#);
    }

    #[test]
    fn test_replay_tallies_outcomes() {
        // Arrange
        let evaluator = Arc::new(RecordingEvaluator::new());
        let transport = BridgeTransport::new(BridgeConfig::default(), evaluator.clone());
        transport.notify_presented();

        // Act
        let report = replay(&transport, &parse_recording(RECORDING));

        // Assert
        let summary = &report.summary;
        assert_eq!(summary.decoded, 5);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.unsupported, 1);
        assert_eq!(summary.checkout_failures, 1);
        assert_eq!(summary.completed_orders, vec!["gid://Order/9"]);
        assert!(summary.ready);
        assert_eq!(evaluator.scripts().len(), 1);

        let rejected = &report.entries[3];
        assert_eq!(rejected.line, 5);
        assert!(rejected.outcome.is_err());
    }

    #[tokio::test]
    async fn test_read_missing_recording_is_io_error() {
        let result = read_recording(Path::new("/nonexistent/recording.jsonl")).await;
        assert!(matches!(result, Err(ReplayError::Io { .. })));
    }
}
