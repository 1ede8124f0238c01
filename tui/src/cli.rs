//! # CLI Interface
//!
//! Defines the command-line argument structure for `solex` using `clap`
//! derive. Supports three subcommands: `tui`, `status`, and `version`.
//! Running the binary with no subcommand opens the TUI.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sole_explorer::config::{DEFAULT_NODE_URL, RECENT_BLOCK_COUNT};

/// SOLE terminal explorer.
///
/// A read-only explorer for the SOLE blockchain. Connects to a node's
/// REST API and renders the chain in your terminal: dashboard, block and
/// transaction detail, address history, and search.
#[derive(Parser, Debug)]
#[command(
    name = "solex",
    about = "Terminal explorer for the SOLE blockchain",
    version,
    propagate_version = true
)]
pub struct SolexCli {
    /// Subcommand to execute. Defaults to the TUI.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the node's REST API.
    #[arg(long, env = "SOLE_NODE_URL", default_value = DEFAULT_NODE_URL, global = true)]
    pub node_url: String,
}

/// Top-level subcommands for the explorer binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive terminal UI.
    Tui(TuiArgs),
    /// Query the node once and print a status summary.
    Status,
    /// Print version information and exit.
    Version,
}

/// Arguments for the `tui` subcommand.
///
/// `Default` must agree with the clap defaults: a bare `solex` invocation
/// constructs these without going through the parser.
#[derive(Parser, Debug)]
pub struct TuiArgs {
    /// How many recent blocks the dashboard walks back from the tip.
    #[arg(long, default_value_t = RECENT_BLOCK_COUNT)]
    pub blocks: usize,

    /// Write logs to this file instead of discarding them.
    ///
    /// Stderr is not an option while the alternate screen is active, so
    /// without this flag TUI logs go nowhere.
    #[arg(long, env = "SOLEX_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Default for TuiArgs {
    fn default() -> Self {
        Self {
            blocks: RECENT_BLOCK_COUNT,
            log_file: None,
        }
    }
}
