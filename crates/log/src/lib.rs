//! Logging setup for runtime hosts.
//!
//! The core crates never call `tracing::subscriber::set_global_default`
//! themselves — only a host binary (the ephemeral runner, the durable
//! worker) should own the process-wide subscriber. This crate just picks
//! sane defaults for the two shapes hosts need: a human-readable console
//! format for local runs, and newline-delimited JSON for anything that
//! ships logs off-box.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

/// Output shape for the process-wide subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human-readable, ANSI-colored console output.
    Pretty,
    /// One JSON object per line, suitable for log aggregation.
    Json,
}

/// Install the process-wide `tracing` subscriber.
///
/// `env_filter` is passed straight to [`EnvFilter::try_new`]; pass something
/// like `"info,nebula_engine=debug"`. Returns an error if a subscriber is
/// already installed — call this exactly once, from the host's `main`.
pub fn init(format: Format, env_filter: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_new(env_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE);

    match format {
        Format::Pretty => subscriber.try_init(),
        Format::Json => subscriber.json().try_init(),
    }
}
