// Copyright (c) 2026 SOLE Labs. MIT License.
// See LICENSE for details.

//! # SOLE Explorer — Client Library
//!
//! A read-only, presentational client for a SOLE blockchain node. This
//! crate talks to the node's REST API and turns the answers into typed
//! data a frontend can render: blocks, transactions, balances, peers,
//! and validators.
//!
//! There is deliberately no consensus, storage, or protocol logic here.
//! The node is the source of truth; we are the glass in front of it.
//!
//! ## Architecture
//!
//! - **api** — Wire types and the HTTP transport (`NodeClient`), plus the
//!   [`api::NodeApi`] trait that the higher layers are written against so
//!   they can be tested without a network.
//! - **chain** — Reconstructs the last N blocks by chasing
//!   `prev_block_hash` pointers one request at a time.
//! - **classify** — Decides whether a transaction is incoming, outgoing,
//!   or a self-transfer relative to a given address, and who the
//!   counterparty is.
//! - **search** — Explicit-kind search dispatch (block / transaction /
//!   address) with existence validation.
//! - **format** — Photon-to-SOLE rendering, timestamps, hash truncation.
//! - **known** — The static table of labeled well-known addresses.
//! - **config** — Constants and defaults.

pub mod api;
pub mod chain;
pub mod classify;
pub mod config;
pub mod format;
pub mod known;
pub mod search;

/// Library version, as baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
