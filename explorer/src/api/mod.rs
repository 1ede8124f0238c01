//! # Node API
//!
//! Everything needed to talk to a SOLE node over HTTP: the wire types the
//! node serializes, the error taxonomy, and the [`NodeClient`] transport.
//!
//! Higher layers (chain walk, search, the TUI) are written against the
//! [`NodeApi`] trait rather than the concrete client, so their logic can
//! be exercised in tests with an in-memory fake node.

pub mod client;
pub mod error;
pub mod types;

pub use client::{NodeApi, NodeClient};
pub use error::{ApiError, EntityKind};
pub use types::{
    Balance, Block, PeersResponse, Tip, Transaction, TxInput, TxOutput, ValidatorsResponse,
};
