//! Error types for node API calls.
//!
//! Every transport operation that can fail returns an [`ApiError`]. The
//! variants map directly onto the three things a page can show the user:
//! a "not found" panel, a connection banner, or a decode bug report.

use std::fmt;

use thiserror::Error;

/// The kind of entity a lookup was for. Drives the wording of
/// "not found" messages, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A block, looked up by hash.
    Block,
    /// A transaction, looked up by id.
    Transaction,
    /// An address, validated via its balance.
    Address,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => write!(f, "Block"),
            Self::Transaction => write!(f, "Transaction"),
            Self::Address => write!(f, "Address"),
        }
    }
}

/// Errors that can occur while talking to the node.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The node answered 404 for an entity lookup.
    #[error("{kind} not found")]
    NotFound {
        /// What was being looked up.
        kind: EntityKind,
    },

    /// The node answered with a non-2xx status other than 404.
    #[error("node returned HTTP {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },

    /// The request never produced an HTTP response (connection refused,
    /// DNS failure, timeout, ...).
    #[error("node unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The node answered 2xx but the body did not parse as the expected
    /// JSON shape. If you see this, the node and explorer disagree about
    /// the wire format.
    #[error("malformed response for {context}: {source}")]
    Decode {
        /// Which endpoint produced the body.
        context: &'static str,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Returns `true` for the 404 variant, regardless of entity kind.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
