//! # Search dispatch
//!
//! Search input is free text plus an explicit kind the user picked from
//! the "search as…" menu — the explorer never guesses whether a string is
//! a hash, a txid, or an address. The chosen lookup doubles as existence
//! validation: only a successful fetch navigates, a 404 becomes a
//! kind-specific "not found", and anything else surfaces the transport
//! error as-is.

use crate::api::{ApiError, Balance, Block, EntityKind, NodeApi, Transaction};

/// What the user declared the query to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    /// Block hash.
    Block,
    /// Transaction id.
    Transaction,
    /// Wallet address.
    Address,
}

impl SearchKind {
    /// The entity kind used for "not found" wording.
    pub fn entity_kind(self) -> EntityKind {
        match self {
            Self::Block => EntityKind::Block,
            Self::Transaction => EntityKind::Transaction,
            Self::Address => EntityKind::Address,
        }
    }
}

/// A validated search result, carrying the fetched entity so the target
/// page can render without a second round-trip.
#[derive(Debug, Clone)]
pub enum SearchHit {
    /// The query resolved to a block.
    Block(Block),
    /// The query resolved to a transaction.
    Transaction(Transaction),
    /// The query resolved to an address (validated via its balance).
    Address(Balance),
}

/// Validates `query` against the node and returns the matching entity.
///
/// The query is trimmed first; a blank query short-circuits to the
/// kind-specific not-found without touching the network.
pub async fn resolve(
    api: &impl NodeApi,
    kind: SearchKind,
    query: &str,
) -> Result<SearchHit, ApiError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ApiError::NotFound {
            kind: kind.entity_kind(),
        });
    }

    match kind {
        SearchKind::Block => api.block(query).await.map(SearchHit::Block),
        SearchKind::Transaction => api.transaction(query).await.map(SearchHit::Transaction),
        SearchKind::Address => api.balance(query).await.map(SearchHit::Address),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::api::Tip;

    /// Fake node that records which endpoint was hit and answers 404 or a
    /// canned success.
    struct RecordingNode {
        hits: Mutex<Vec<String>>,
        found: bool,
    }

    impl RecordingNode {
        fn new(found: bool) -> Self {
            Self {
                hits: Mutex::new(Vec::new()),
                found,
            }
        }

        fn record(&self, what: &str) {
            self.hits.lock().unwrap().push(what.to_string());
        }

        fn hits(&self) -> Vec<String> {
            self.hits.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NodeApi for RecordingNode {
        async fn tip(&self) -> Result<Tip, ApiError> {
            unimplemented!("not used by search")
        }

        async fn block(&self, hash: &str) -> Result<Block, ApiError> {
            self.record("block");
            if self.found {
                Ok(Block {
                    timestamp: 0,
                    height: 1,
                    prev_block_hash: String::new(),
                    hash: hash.to_string(),
                    transactions: vec![],
                    validator: String::new(),
                    signature: String::new(),
                })
            } else {
                Err(ApiError::NotFound {
                    kind: EntityKind::Block,
                })
            }
        }

        async fn transaction(&self, txid: &str) -> Result<Transaction, ApiError> {
            self.record("transaction");
            if self.found {
                Ok(Transaction {
                    id: txid.to_string(),
                    inputs: None,
                    outputs: vec![],
                    timestamp: 0,
                })
            } else {
                Err(ApiError::NotFound {
                    kind: EntityKind::Transaction,
                })
            }
        }

        async fn balance(&self, address: &str) -> Result<Balance, ApiError> {
            self.record("balance");
            if self.found {
                Ok(Balance {
                    address: address.to_string(),
                    balance: 0,
                })
            } else {
                Err(ApiError::NotFound {
                    kind: EntityKind::Address,
                })
            }
        }

        async fn address_transactions(
            &self,
            _address: &str,
        ) -> Result<Vec<Transaction>, ApiError> {
            unimplemented!("not used by search")
        }
    }

    #[tokio::test]
    async fn each_kind_hits_its_own_endpoint() {
        let node = RecordingNode::new(true);

        assert!(matches!(
            resolve(&node, SearchKind::Block, "h1").await.unwrap(),
            SearchHit::Block(_)
        ));
        assert!(matches!(
            resolve(&node, SearchKind::Transaction, "t1").await.unwrap(),
            SearchHit::Transaction(_)
        ));
        assert!(matches!(
            resolve(&node, SearchKind::Address, "a1").await.unwrap(),
            SearchHit::Address(_)
        ));

        assert_eq!(node.hits(), ["block", "transaction", "balance"]);
    }

    #[tokio::test]
    async fn miss_reports_kind_specific_not_found() {
        let node = RecordingNode::new(false);

        let err = resolve(&node, SearchKind::Transaction, "nope")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Transaction not found");

        let err = resolve(&node, SearchKind::Address, "nope")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Address not found");
    }

    #[tokio::test]
    async fn query_is_trimmed_before_lookup() {
        let node = RecordingNode::new(true);
        let hit = resolve(&node, SearchKind::Block, "  h1  ").await.unwrap();
        match hit {
            SearchHit::Block(block) => assert_eq!(block.hash, "h1"),
            other => panic!("unexpected hit: {other:?}"),
        }
    }

    #[tokio::test]
    async fn blank_query_skips_the_network() {
        let node = RecordingNode::new(true);
        let err = resolve(&node, SearchKind::Block, "   ").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(node.hits().is_empty());
    }
}
