// Copyright (c) 2026 SOLE Labs. MIT License.
// See LICENSE for details.

//! # SOLE Terminal Explorer
//!
//! Entry point for the `solex` binary. Parses CLI arguments, initializes
//! logging, and either runs the interactive TUI or executes a one-shot
//! command.
//!
//! The binary supports three subcommands:
//!
//! - `tui`     — open the interactive explorer (also the default)
//! - `status`  — query the node once and print a summary
//! - `version` — print build version information

mod app;
mod cli;
mod fetch;
mod logging;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use sole_explorer::api::{NodeApi, NodeClient};
use sole_explorer::format::format_photons;

use app::App;
use cli::{Commands, SolexCli, TuiArgs};
use fetch::Fetcher;
use logging::LogTarget;

/// How long the event loop blocks waiting for a key before redrawing.
/// Short enough that fetch results and the poll timer feel immediate.
const UI_TICK: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = SolexCli::parse();

    match cli.command {
        Some(Commands::Tui(args)) => run_tui(cli.node_url, args).await,
        None => run_tui(cli.node_url, TuiArgs::default()).await,
        Some(Commands::Status) => query_status(cli.node_url).await,
        Some(Commands::Version) => {
            print_version();
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// TUI
// ---------------------------------------------------------------------------

async fn run_tui(node_url: String, args: TuiArgs) -> Result<()> {
    let target = match &args.log_file {
        Some(path) => LogTarget::file(path)
            .with_context(|| format!("failed to open log file: {}", path.display()))?,
        None => LogTarget::Sink,
    };
    logging::init_logging("solex=info,sole_explorer=info", target);

    let client = NodeClient::new(&node_url).context("invalid node URL")?;
    tracing::info!(node_url = %node_url, blocks = args.blocks, "starting explorer");

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let mut app = App::new(Fetcher::new(client, events_tx), node_url, args.blocks);

    let _guard = TerminalGuard::enter().context("failed to enter raw mode")?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    loop {
        terminal
            .draw(|frame| ui::draw(frame, &app))
            .context("draw failed")?;

        while let Ok(event) = events_rx.try_recv() {
            app.apply(event);
        }
        app.tick();

        if event::poll(UI_TICK).context("event poll failed")? {
            if let Event::Key(key) = event::read().context("event read failed")? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Restores the terminal on drop, panics included.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

// ---------------------------------------------------------------------------
// One-shot commands
// ---------------------------------------------------------------------------

/// Queries the tip, peer list, and validator set once and prints them.
async fn query_status(node_url: String) -> Result<()> {
    logging::init_logging("solex=warn", LogTarget::Stderr);

    let client = NodeClient::new(&node_url).context("invalid node URL")?;
    let (tip, peers, validators) =
        tokio::join!(client.tip(), client.peers(), client.validators());

    let tip = tip.with_context(|| format!("failed to reach node at {node_url}"))?;
    println!("node       {}", node_url);
    println!("height     {}", tip.height);
    println!("tip        {}", tip.hash);

    // Network endpoints are optional on older nodes; absence is not an
    // error worth failing the command over.
    match peers {
        Ok(peers) => println!("peers      {}", peers.peers.len()),
        Err(err) => {
            tracing::warn!(error = %err, "peer list unavailable");
            println!("peers      unavailable");
        }
    }
    match validators {
        Ok(validators) => {
            println!("validators {}", validators.validators.len());
            for address in &validators.validators {
                println!("  {}", address);
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "validator set unavailable");
            println!("validators unavailable");
        }
    }

    if let Ok(block) = client.block(&tip.hash).await {
        let total: i64 = block.transactions.iter().map(|tx| tx.total_output()).sum();
        println!("tip txs    {}", block.transactions.len());
        println!("tip value  {}", format_photons(total));
    }

    Ok(())
}

fn print_version() {
    println!("solex    {}", env!("CARGO_PKG_VERSION"));
    println!("explorer {}", sole_explorer::VERSION);
}
