//! # Chain-walk resolver
//!
//! The node has no "last N blocks" endpoint, so the dashboard rebuilds the
//! recent history itself: fetch the tip, then chase `prev_block_hash`
//! pointers one block at a time. Each step's address depends on the
//! previous step's result, so the walk is sequential by necessity — this
//! is pointer-chasing over an immutable backward-linked list, not a batch
//! job that forgot to parallelize.

use crate::api::{ApiError, Block, NodeApi};

/// The outcome of a walk: whatever was collected, newest first, plus the
/// failure that cut it short, if any.
///
/// Callers treat the walk as best-effort. The dashboard shows whatever
/// arrived and polls again in ten seconds; a `failure` only changes the
/// status indicator, never discards the collected blocks.
#[derive(Debug)]
pub struct ChainWalk {
    /// Blocks collected before the walk stopped, newest first.
    pub blocks: Vec<Block>,
    /// The error that aborted the walk, if it did not run to completion.
    pub failure: Option<ApiError>,
}

impl ChainWalk {
    /// Returns `true` if the walk ended by itself (count reached, genesis,
    /// or an empty cursor) rather than on a fetch failure.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    fn empty() -> Self {
        Self {
            blocks: Vec::new(),
            failure: None,
        }
    }
}

/// Fetches up to `count` blocks backwards from the current tip.
///
/// Stops early at genesis (height 0 or empty `prev_block_hash`), at an
/// empty cursor, or on the first fetch failure. A broken chain — the node
/// handing out a `prev_block_hash` that does not resolve — shows up as a
/// failed fetch on the next iteration and truncates the walk.
///
/// `count == 0` returns immediately without a single network call.
pub async fn walk_recent(api: &impl NodeApi, count: usize) -> ChainWalk {
    if count == 0 {
        return ChainWalk::empty();
    }

    let tip = match api.tip().await {
        Ok(tip) => tip,
        Err(err) => {
            tracing::warn!(error = %err, "chain walk: tip fetch failed");
            return ChainWalk {
                blocks: Vec::new(),
                failure: Some(err),
            };
        }
    };

    let mut blocks = Vec::with_capacity(count.min(64));
    let mut cursor = tip.hash;

    for _ in 0..count {
        if cursor.is_empty() {
            break;
        }

        match api.block(&cursor).await {
            Ok(block) => {
                cursor = block.prev_block_hash.clone();
                let at_genesis = block.is_genesis();
                blocks.push(block);
                if at_genesis {
                    break;
                }
            }
            Err(err) => {
                tracing::warn!(%cursor, error = %err, "chain walk truncated");
                return ChainWalk {
                    blocks,
                    failure: Some(err),
                };
            }
        }
    }

    ChainWalk {
        blocks,
        failure: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
