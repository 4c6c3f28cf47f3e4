//! Script evaluator implementations.
//!
//! - [`channel::ChannelEvaluator`] forwards scripts over an unbounded tokio
//!   channel to whatever task owns the web view.
//! - [`mock::RecordingEvaluator`] records scripts in memory for tests.

pub mod channel;
pub mod mock;

pub use channel::ChannelEvaluator;
pub use mock::RecordingEvaluator;
