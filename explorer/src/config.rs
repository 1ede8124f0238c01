//! # Explorer Configuration & Constants
//!
//! Every magic number in the explorer lives here. If you're hardcoding a
//! constant somewhere else, you're doing it wrong and you owe the team
//! coffee.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// Photons per SOLE. The photon is the integer base unit; every amount on
/// the wire is an `i64` photon count. 1 SOLE = 10^8 photons, same split
/// Bitcoin chose, for the same reason: no floating point anywhere near
/// money.
pub const PHOTONS_PER_SOLE: i64 = 100_000_000;

/// Ticker suffix used in all human-readable amounts.
pub const CURRENCY_SUFFIX: &str = "SOLE";

// ---------------------------------------------------------------------------
// Protocol sentinels
// ---------------------------------------------------------------------------

/// The sender address the node writes into the first input of a minting
/// transaction. Newly generated coins have no real spender, so the node
/// uses this literal instead.
pub const COINBASE_SENDER: &str = "COINBASE";

// ---------------------------------------------------------------------------
// Transport defaults
// ---------------------------------------------------------------------------

/// Default base URL of the node's REST API.
pub const DEFAULT_NODE_URL: &str = "http://127.0.0.1:8645";

/// How often the dashboard re-fetches the tip and recent blocks.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// How many blocks the dashboard walks back from the tip.
pub const RECENT_BLOCK_COUNT: usize = 10;

/// Per-request timeout. A node that takes longer than this to answer a
/// single GET is treated as unreachable rather than slow.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

// ---------------------------------------------------------------------------
// Display defaults
// ---------------------------------------------------------------------------

/// Default number of leading characters kept when truncating a hash.
pub const HASH_TRUNCATE_START: usize = 8;

/// Default number of trailing characters kept when truncating a hash.
pub const HASH_TRUNCATE_END: usize = 8;
