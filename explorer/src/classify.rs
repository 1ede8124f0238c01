//! # Transaction direction classifier
//!
//! Given a transaction and the address whose page we are rendering,
//! decide three things: which way the money moved relative to that
//! address, who the counterparty was, and how much of the transaction is
//! attributable to that role.
//!
//! The subtlety is change: a typical UTXO transaction has one output
//! returning funds to the sender. Counting that output in the displayed
//! "sent" amount would inflate the user-visible transfer by the change
//! component, so outgoing values exclude outputs paying the reference
//! address back.

use std::fmt;

use crate::api::Transaction;
use crate::config::COINBASE_SENDER;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Which way a transaction moved value relative to the reference address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The reference address received funds.
    Incoming,
    /// The reference address sent funds to someone else.
    Outgoing,
    /// The reference address paid itself (single output back to self).
    SelfTransfer,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incoming => write!(f, "Received"),
            Self::Outgoing => write!(f, "Sent"),
            Self::SelfTransfer => write!(f, "Self"),
        }
    }
}

// ---------------------------------------------------------------------------
// Counterparty
// ---------------------------------------------------------------------------

/// The other side of the transfer, as far as it can be named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Counterparty {
    /// A concrete address.
    Address(String),
    /// Newly minted coins; there is no prior owner.
    Coinbase,
    /// Every output returned to the reference address; no single
    /// counterparty exists.
    Multiple,
    /// The transaction carries no output to name a counterparty from.
    Unknown,
}

impl fmt::Display for Counterparty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(addr) => write!(f, "{}", addr),
            Self::Coinbase => write!(f, "{}", COINBASE_SENDER),
            Self::Multiple => write!(f, "Multiple"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// The classifier's verdict for one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Directional role of the reference address.
    pub direction: Direction,
    /// The other party in the transfer.
    pub counterparty: Counterparty,
    /// Value attributable to the role, in photons. For outgoing
    /// transactions this excludes change outputs; for incoming it counts
    /// only outputs paying the reference address.
    pub value: i64,
}

/// Classifies `tx` from the perspective of `reference`.
///
/// The sender check inspects only the first input. Multi-input
/// transactions with mixed senders are rare on this chain and the node's
/// own wallet never builds them; a transaction whose reference address
/// appears only in a later input therefore classifies as incoming. See
/// `sender_check_inspects_first_input_only` in the tests.
pub fn classify(tx: &Transaction, reference: &str) -> Classification {
    let is_sender = tx.first_sender() == Some(reference);
    let is_receiver = tx
        .outputs
        .iter()
        .any(|out| out.receiver_address == reference);

    if is_sender && is_receiver && tx.outputs.len() == 1 {
        return Classification {
            direction: Direction::SelfTransfer,
            counterparty: Counterparty::Address(reference.to_string()),
            value: tx.total_output(),
        };
    }

    if is_sender {
        let value = tx
            .outputs
            .iter()
            .filter(|out| out.receiver_address != reference)
            .map(|out| out.value)
            .sum();
        let counterparty = match tx
            .outputs
            .iter()
            .find(|out| out.receiver_address != reference)
        {
            Some(out) => Counterparty::Address(out.receiver_address.clone()),
            None if !tx.outputs.is_empty() => Counterparty::Multiple,
            None => Counterparty::Unknown,
        };
        return Classification {
            direction: Direction::Outgoing,
            counterparty,
            value,
        };
    }

    // Incoming, or a transaction that does not mention the reference
    // address at all — rendered the same way.
    let value = tx
        .outputs
        .iter()
        .filter(|out| out.receiver_address == reference)
        .map(|out| out.value)
        .sum();
    let counterparty = match tx.first_sender() {
        Some(sender) if sender == COINBASE_SENDER => Counterparty::Coinbase,
        Some(sender) => Counterparty::Address(sender.to_string()),
        None => Counterparty::Coinbase,
    };

    Classification {
        direction: Direction::Incoming,
        counterparty,
        value,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{TxInput, TxOutput};

    const ALICE: &str = "1AliceXXXXXXXXXXXXXXXXXXXXXXXXXXXX";
    const BOB: &str = "1BobXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX";
    const CAROL: &str = "1CarolXXXXXXXXXXXXXXXXXXXXXXXXXXXX";

    fn input(sender: &str) -> TxInput {
        TxInput {
            sender_address: sender.to_string(),
            signature: "sig".to_string(),
        }
    }

    fn output(receiver: &str, value: i64) -> TxOutput {
        TxOutput {
            receiver_address: receiver.to_string(),
            value,
            value_sole: value as f64 / 100_000_000.0,
        }
    }

    fn tx(inputs: Option<Vec<TxInput>>, outputs: Vec<TxOutput>) -> Transaction {
        Transaction {
            id: "tx".to_string(),
            inputs,
            outputs,
            timestamp: 0,
        }
    }

    #[test]
    fn self_transfer_with_single_output() {
        let tx = tx(Some(vec![input(ALICE)]), vec![output(ALICE, 700)]);
        let c = classify(&tx, ALICE);

        assert_eq!(c.direction, Direction::SelfTransfer);
        assert_eq!(c.counterparty, Counterparty::Address(ALICE.to_string()));
        assert_eq!(c.value, 700);
    }

    #[test]
    fn outgoing_value_excludes_change() {
        // Alice pays Bob 300 and takes 200 back as change.
        let tx = tx(
            Some(vec![input(ALICE)]),
            vec![output(BOB, 300), output(ALICE, 200)],
        );
        let c = classify(&tx, ALICE);

        assert_eq!(c.direction, Direction::Outgoing);
        assert_eq!(c.counterparty, Counterparty::Address(BOB.to_string()));
        assert_eq!(c.value, 300);
    }

    #[test]
    fn outgoing_multiple_recipients_names_first() {
        let tx = tx(
            Some(vec![input(ALICE)]),
            vec![output(BOB, 100), output(CAROL, 150), output(ALICE, 50)],
        );
        let c = classify(&tx, ALICE);

        assert_eq!(c.direction, Direction::Outgoing);
        assert_eq!(c.counterparty, Counterparty::Address(BOB.to_string()));
        assert_eq!(c.value, 250);
    }

    #[test]
    fn sender_with_all_outputs_to_self_is_multiple() {
        // Two outputs both back to Alice: not the single-output self case,
        // and no external receiver to name.
        let tx = tx(
            Some(vec![input(ALICE)]),
            vec![output(ALICE, 100), output(ALICE, 50)],
        );
        let c = classify(&tx, ALICE);

        assert_eq!(c.direction, Direction::Outgoing);
        assert_eq!(c.counterparty, Counterparty::Multiple);
        assert_eq!(c.value, 0);
    }

    #[test]
    fn incoming_names_sender_as_counterparty() {
        let tx = tx(Some(vec![input(BOB)]), vec![output(ALICE, 500)]);
        let c = classify(&tx, ALICE);

        assert_eq!(c.direction, Direction::Incoming);
        assert_eq!(c.counterparty, Counterparty::Address(BOB.to_string()));
        assert_eq!(c.value, 500);
    }

    #[test]
    fn incoming_counts_only_outputs_to_reference() {
        let tx = tx(
            Some(vec![input(BOB)]),
            vec![output(ALICE, 300), output(CAROL, 900), output(BOB, 100)],
        );
        let c = classify(&tx, ALICE);

        assert_eq!(c.direction, Direction::Incoming);
        assert_eq!(c.value, 300);
    }

    #[test]
    fn coinbase_is_never_outgoing() {
        let tx = tx(Some(vec![input("COINBASE")]), vec![output(ALICE, 5000)]);
        let c = classify(&tx, ALICE);

        assert_eq!(c.direction, Direction::Incoming);
        assert_eq!(c.counterparty, Counterparty::Coinbase);
        assert_eq!(c.value, 5000);
    }

    #[test]
    fn missing_inputs_resolve_to_coinbase_counterparty() {
        let tx = tx(None, vec![output(ALICE, 5000)]);
        let c = classify(&tx, ALICE);

        assert_eq!(c.direction, Direction::Incoming);
        assert_eq!(c.counterparty, Counterparty::Coinbase);
    }

    /// Pins the deliberate simplification: only `inputs[0]` decides
    /// whether the reference address is the sender. A transaction whose
    /// reference address appears in a later input slot classifies as
    /// incoming, counterparty taken from the first input.
    #[test]
    fn sender_check_inspects_first_input_only() {
        let tx = tx(
            Some(vec![input(BOB), input(ALICE)]),
            vec![output(CAROL, 400)],
        );
        let c = classify(&tx, ALICE);

        assert_eq!(c.direction, Direction::Incoming);
        assert_eq!(c.counterparty, Counterparty::Address(BOB.to_string()));
        assert_eq!(c.value, 0);
    }

    #[test]
    fn direction_labels() {
        assert_eq!(Direction::Incoming.to_string(), "Received");
        assert_eq!(Direction::Outgoing.to_string(), "Sent");
        assert_eq!(Direction::SelfTransfer.to_string(), "Self");
    }
}
