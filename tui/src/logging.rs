//! # Structured Logging
//!
//! Initializes the `tracing` subscriber with environment-based filtering
//! via `RUST_LOG`. One-shot commands (`status`, `version`) log to stderr;
//! the TUI cannot — it owns the terminal — so its logs go to a file when
//! `--log-file` is given and into a sink otherwise.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log lines end up.
pub enum LogTarget {
    /// Human-readable output on stderr. For one-shot commands.
    Stderr,
    /// Append to a file. For the TUI.
    File(File),
    /// Discard everything. The TUI default when no log file is given.
    Sink,
}

impl LogTarget {
    /// Opens (or creates) the given log file for appending.
    pub fn file(path: &Path) -> std::io::Result<Self> {
        let file = File::options().create(true).append(true).open(path)?;
        Ok(Self::File(file))
    }
}

/// Initialize the global tracing subscriber.
///
/// Call this exactly once, early in `main()`. The `RUST_LOG` environment
/// variable overrides `default_level` when set, with the usual
/// `EnvFilter` directive syntax (e.g. `solex=debug,sole_explorer=info`).
pub fn init_logging(default_level: &str, target: LogTarget) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let writer = match target {
        LogTarget::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogTarget::File(file) => BoxMakeWriter::new(Arc::new(file)),
        LogTarget::Sink => BoxMakeWriter::new(std::io::sink),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();
}
