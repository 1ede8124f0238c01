//! Wire types for the SOLE node's JSON API.
//!
//! Field names match the node's serialization byte for byte
//! (`prev_block_hash`, `sender_address`, ...) — do not rename without a
//! node-side change. Amounts travel as `i64` photon counts; the node also
//! includes a float `value_sole` per output for display convenience, which
//! we carry but never do arithmetic on.

use serde::{Deserialize, Serialize};

use crate::config::COINBASE_SENDER;

// ---------------------------------------------------------------------------
// Tip
// ---------------------------------------------------------------------------

/// The chain head pointer, as returned by `GET /blocks/tip`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    /// Height of the current head block.
    pub height: u64,
    /// Hash of the current head block.
    pub hash: String,
}

// ---------------------------------------------------------------------------
// Balance
// ---------------------------------------------------------------------------

/// Current balance of an address, as returned by `GET /balance/{address}`.
///
/// This is the node's view *right now*, not a historical figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// The queried address, echoed back.
    pub address: String,
    /// Balance in photons.
    pub balance: i64,
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// A transaction input: who signed the spend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    /// Address of the spender, or the literal `"COINBASE"` sentinel for
    /// newly minted coins.
    pub sender_address: String,
    /// Hex-encoded signature over the transaction.
    pub signature: String,
}

/// A transaction output: who gets paid, and how much.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxOutput {
    /// Address of the recipient.
    pub receiver_address: String,
    /// Amount in photons. Authoritative.
    pub value: i64,
    /// The same amount pre-divided into SOLE by the node. Display only.
    pub value_sole: f64,
}

/// A transaction, standalone or inside a block.
///
/// `inputs` is an `Option` because the node's serializer emits `null`
/// rather than `[]` when the input list was never initialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction id (hash).
    pub id: String,
    /// Inputs; absent or empty for minting transactions.
    pub inputs: Option<Vec<TxInput>>,
    /// Outputs. Always present.
    pub outputs: Vec<TxOutput>,
    /// Unix timestamp (seconds).
    pub timestamp: i64,
}

impl Transaction {
    /// Returns `true` if this transaction mints new coins.
    ///
    /// The node marks coinbase transactions by writing the `"COINBASE"`
    /// sentinel into the first input's sender. Only the first input is
    /// inspected, mirroring how the node itself constructs the record.
    pub fn is_coinbase(&self) -> bool {
        self.first_sender()
            .is_some_and(|sender| sender == COINBASE_SENDER)
    }

    /// The sender address of the first input, if there is one.
    pub fn first_sender(&self) -> Option<&str> {
        self.inputs
            .as_deref()
            .and_then(|inputs| inputs.first())
            .map(|input| input.sender_address.as_str())
    }

    /// Total value of all outputs, in photons.
    pub fn total_output(&self) -> i64 {
        self.outputs.iter().map(|out| out.value).sum()
    }
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

/// A block, as returned by `GET /blocks/{hash}`.
///
/// Blocks form a singly-linked backward chain: each block names its
/// predecessor via `prev_block_hash`. Identity is the `hash` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Unix timestamp (seconds) of block production.
    pub timestamp: i64,
    /// Height in the chain; 0 for genesis.
    pub height: u64,
    /// Hash of the predecessor block; empty for genesis.
    pub prev_block_hash: String,
    /// This block's hash.
    pub hash: String,
    /// Transactions included in the block.
    pub transactions: Vec<Transaction>,
    /// Address of the validator that proposed and signed the block.
    pub validator: String,
    /// The validator's signature over the block.
    pub signature: String,
}

impl Block {
    /// Returns `true` if this is the chain root.
    ///
    /// Genesis is marked by height 0 *or* an empty predecessor hash; the
    /// walk has to stop on either, since a node could report one without
    /// the other.
    pub fn is_genesis(&self) -> bool {
        self.height == 0 || self.prev_block_hash.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// Response payload for `GET /network/peers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeersResponse {
    /// Addresses of currently connected peers.
    pub peers: Vec<String>,
}

/// Response payload for `GET /consensus/validators`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorsResponse {
    /// Addresses of the active validator set.
    pub validators: Vec<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn output(receiver: &str, value: i64) -> TxOutput {
        TxOutput {
            receiver_address: receiver.to_string(),
            value,
            value_sole: value as f64 / 100_000_000.0,
        }
    }

    #[test]
    fn block_decodes_from_node_json() {
        let json = r#"{
            "timestamp": 1712345678,
            "height": 42,
            "prev_block_hash": "aa11",
            "hash": "bb22",
            "transactions": [{
                "id": "tx1",
                "inputs": [{"sender_address": "COINBASE", "signature": ""}],
                "outputs": [{"receiver_address": "addr1", "value": 5000000000, "value_sole": 50.0}],
                "timestamp": 1712345678
            }],
            "validator": "val1",
            "signature": "sig1"
        }"#;

        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.height, 42);
        assert_eq!(block.hash, "bb22");
        assert_eq!(block.transactions.len(), 1);
        assert!(block.transactions[0].is_coinbase());
        assert!(!block.is_genesis());
    }

    #[test]
    fn transaction_tolerates_null_inputs() {
        // The node emits `"inputs": null` for uninitialized input lists.
        let json = r#"{
            "id": "tx2",
            "inputs": null,
            "outputs": [{"receiver_address": "addr1", "value": 100, "value_sole": 0.000001}],
            "timestamp": 0
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert!(tx.inputs.is_none());
        assert!(tx.first_sender().is_none());
        assert!(!tx.is_coinbase());
    }

    #[test]
    fn genesis_detected_by_height_or_missing_prev() {
        let mut block = Block {
            timestamp: 0,
            height: 0,
            prev_block_hash: "something".to_string(),
            hash: "h".to_string(),
            transactions: vec![],
            validator: String::new(),
            signature: String::new(),
        };
        assert!(block.is_genesis());

        block.height = 7;
        assert!(!block.is_genesis());

        block.prev_block_hash.clear();
        assert!(block.is_genesis());
    }

    #[test]
    fn coinbase_check_uses_first_input_only() {
        let tx = Transaction {
            id: "tx3".to_string(),
            inputs: Some(vec![
                TxInput {
                    sender_address: "addr1".to_string(),
                    signature: "s1".to_string(),
                },
                TxInput {
                    sender_address: "COINBASE".to_string(),
                    signature: String::new(),
                },
            ]),
            outputs: vec![output("addr2", 10)],
            timestamp: 0,
        };
        // COINBASE in a later input slot does not make this a minting tx.
        assert!(!tx.is_coinbase());
    }

    #[test]
    fn total_output_sums_photons() {
        let tx = Transaction {
            id: "tx4".to_string(),
            inputs: None,
            outputs: vec![output("a", 150_000_000), output("b", 50_000_000)],
            timestamp: 0,
        };
        assert_eq!(tx.total_output(), 200_000_000);
    }

    #[test]
    fn tip_serde_roundtrip() {
        let tip = Tip {
            height: 9,
            hash: "abcd".to_string(),
        };
        let json = serde_json::to_string(&tip).unwrap();
        let recovered: Tip = serde_json::from_str(&json).unwrap();
        assert_eq!(tip, recovered);
    }
}
