//! Checkout bridge developer CLI.
//!
//! Drives a [`BridgeTransport`] without a web view, which is handy for
//! checking how a host would react to a captured message log.
//!
//! # Usage
//!
//! ```text
//! checkout-bridge [OPTIONS] <COMMAND>
//!
//! Commands:
//!   replay      Replay a recorded message log through a transport
//!   identifier  Print the application identifier
//!
//! Options:
//!   --config    <PATH>   TOML configuration file
//!   --log-level <LEVEL>  Log filter used when RUST_LOG is unset
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                 | Description                        |
//! |--------------------------|------------------------------------|
//! | `CHECKOUT_BRIDGE_CONFIG` | Configuration file path            |
//! | `CHECKOUT_BRIDGE_LOG`    | Log filter when `RUST_LOG` is unset |
//!
//! CLI args take precedence when both are present.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use checkout_bridge::domain::{BridgeConfig, InstrumentationPayload};
use checkout_bridge::infrastructure::evaluator::ChannelEvaluator;
use checkout_bridge::infrastructure::replay::{read_recording, replay};
use checkout_bridge::infrastructure::storage::load_config;
use checkout_bridge::BridgeTransport;
use checkout_core::ColorScheme;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Developer tooling for the checkout web view bridge.
#[derive(Debug, Parser)]
#[command(name = "checkout-bridge", version)]
struct Cli {
    /// TOML configuration file.  A missing file means "all defaults".
    #[arg(long, global = true, env = "CHECKOUT_BRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset.  Overrides the config file.
    #[arg(long, global = true, env = "CHECKOUT_BRIDGE_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a recorded message log (one posted message per line).
    Replay {
        /// Recording to replay.
        file: PathBuf,

        /// Outbound send queued before the replay starts.  Repeatable.
        #[arg(long = "send", value_name = "NAME[=PAYLOAD]", value_parser = parse_send)]
        sends: Vec<OutboundSend>,

        /// Counter record dispatched before the replay starts.  Repeatable.
        #[arg(long = "instrument", value_name = "NAME=VALUE", value_parser = parse_instrument)]
        instruments: Vec<InstrumentationPayload>,
    },

    /// Print the application identifier for the configuration.
    Identifier {
        /// Overrides `identity.color_scheme`.
        #[arg(long, value_parser = parse_color_scheme)]
        color_scheme: Option<ColorScheme>,

        /// Overrides `identity.platform`.
        #[arg(long)]
        platform: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OutboundSend {
    command: String,
    payload: Option<String>,
}

fn parse_send(arg: &str) -> Result<OutboundSend, String> {
    let (command, payload) = match arg.split_once('=') {
        Some((command, payload)) => (command, Some(payload.to_string())),
        None => (arg, None),
    };
    if command.is_empty() {
        return Err("command name must not be empty".to_string());
    }
    Ok(OutboundSend {
        command: command.to_string(),
        payload,
    })
}

fn parse_instrument(arg: &str) -> Result<InstrumentationPayload, String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{arg}'"))?;
    let value: i64 = value
        .parse()
        .map_err(|e| format!("invalid metric value '{value}': {e}"))?;
    Ok(InstrumentationPayload::counter(name, value))
}

fn parse_color_scheme(arg: &str) -> Result<ColorScheme, String> {
    serde_json::from_value(serde_json::Value::String(arg.to_string()))
        .map_err(|_| format!("unknown color scheme '{arg}'"))
}

impl Cli {
    /// Loads the config file (if any) and applies CLI overrides.
    fn bridge_config(&self) -> anyhow::Result<BridgeConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => BridgeConfig::default(),
        };
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Command::Identifier {
            color_scheme,
            platform,
        } = &self.command
        {
            if let Some(scheme) = color_scheme {
                config.identity.color_scheme = *scheme;
            }
            if let Some(platform) = platform {
                config.identity.platform = Some(platform.clone());
            }
        }
        Ok(config)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.bridge_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Identifier { .. } => {
            println!("{}", config.application_identifier());
            Ok(())
        }
        Command::Replay {
            file,
            sends,
            instruments,
        } => run_replay(config, file, sends, instruments).await,
    }
}

async fn run_replay(
    config: BridgeConfig,
    file: PathBuf,
    sends: Vec<OutboundSend>,
    instruments: Vec<InstrumentationPayload>,
) -> anyhow::Result<()> {
    let recording = read_recording(&file)
        .await
        .with_context(|| format!("failed to read recording {}", file.display()))?;

    let (evaluator, mut scripts) = ChannelEvaluator::new();
    let printer = tokio::spawn(async move {
        let mut count = 0usize;
        while let Some(script) = scripts.recv().await {
            count += 1;
            println!("── script {count} ──\n{script}");
        }
        count
    });

    println!("{}", replay_banner(&config, recording.len()));
    let handler = config.message_handler.clone();
    let transport = BridgeTransport::new(config, Arc::new(evaluator));
    info!(
        session = %transport.session_id(),
        file = %file.display(),
        handler = %handler,
        "replay starting"
    );

    for send in &sends {
        transport.send(&send.command, send.payload.as_deref());
    }
    for metric in &instruments {
        transport.instrument(metric);
    }

    let report = replay(&transport, &recording);
    let still_pending = transport.pending();

    // Closing the channel lets the printer finish.
    drop(transport);
    let evaluated = printer.await.context("script printer task failed")?;

    for entry in &report.entries {
        match &entry.outcome {
            Ok(event) => println!("line {}: {}", entry.line, event.kind()),
            Err(e) => println!("line {}: rejected: {e}", entry.line),
        }
    }

    let summary = &report.summary;
    println!(
        "\n{} decoded, {} failed, {} unsupported, {} checkout failures, {} completed orders",
        summary.decoded,
        summary.failed,
        summary.unsupported,
        summary.checkout_failures,
        summary.completed_orders.len()
    );
    println!(
        "ready: {}, scripts evaluated: {evaluated}, sends still pending: {}",
        summary.ready,
        still_pending.len()
    );
    for send in &still_pending {
        println!("  pending: {}", send.command);
    }
    Ok(())
}

/// First line of replay output: what is replayed and which handler it was posted to.
fn replay_banner(config: &BridgeConfig, messages: usize) -> String {
    format!(
        "replaying {messages} message(s) posted to the '{}' handler",
        config.message_handler
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
