//! Infrastructure layer: adapters to the world outside the transport.
//!
//! **Dependency rule**: this layer may depend on `application`, `domain`, and
//! `checkout_core`, but MUST NOT be imported by the `application` or `domain`
//! layers (tests excepted).
//!
//! # Sub-modules
//!
//! - **`evaluator`** – [`crate::application::ScriptEvaluator`] implementations:
//!   a recording mock for tests and a tokio channel for hosts that run their
//!   web view on another task.
//!
//! - **`storage`** – TOML configuration file loading and saving.
//!
//! - **`replay`** – feeds a recorded message log through a transport and
//!   tallies the outcome; backs the `replay` CLI subcommand.

pub mod evaluator;
pub mod replay;
pub mod storage;
