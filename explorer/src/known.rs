//! The known-address table.
//!
//! A handful of addresses on the network have well-understood roles and
//! deserve a label instead of a 34-character blur. The table is a static,
//! immutable lookup consulted by display code — it is configuration, not
//! something derived from chain data, and it never changes at runtime.

use std::fmt;

use crate::config::COINBASE_SENDER;

/// Category of a labeled address. Drives badge styling in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// The network faucet.
    Faucet,
    /// Foundation-controlled funds.
    Foundation,
    /// The coinbase pseudo-address.
    Coinbase,
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Faucet => write!(f, "faucet"),
            Self::Foundation => write!(f, "foundation"),
            Self::Coinbase => write!(f, "coinbase"),
        }
    }
}

/// A labeled well-known address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownAddress {
    /// The address, in its canonical casing.
    pub address: &'static str,
    /// Short human label shown instead of the address.
    pub label: &'static str,
    /// Category for badge styling.
    pub kind: AddressKind,
}

/// Every labeled address on the network.
pub const KNOWN_ADDRESSES: &[KnownAddress] = &[
    KnownAddress {
        address: "1FaUcBN9b72SGmf4tCXXJGYvJTaB9evVqA",
        label: "Faucet",
        kind: AddressKind::Faucet,
    },
    KnownAddress {
        address: "1SoLErUCu4pL7qrTAouiY4TfWwzAwBsnn",
        label: "Foundation",
        kind: AddressKind::Foundation,
    },
    KnownAddress {
        address: "1HSYNy8yXUuUZrkBCnzSc34Lqr8soPAKQL",
        label: "Genesis",
        kind: AddressKind::Foundation,
    },
    KnownAddress {
        address: COINBASE_SENDER,
        label: "Coinbase",
        kind: AddressKind::Coinbase,
    },
];

/// Looks up a label for an address. Exact match, case-insensitive.
pub fn lookup(address: &str) -> Option<&'static KnownAddress> {
    if address.is_empty() {
        return None;
    }
    KNOWN_ADDRESSES
        .iter()
        .find(|entry| entry.address.eq_ignore_ascii_case(address))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_finds_label() {
        let hit = lookup("1FaUcBN9b72SGmf4tCXXJGYvJTaB9evVqA").unwrap();
        assert_eq!(hit.label, "Faucet");
        assert_eq!(hit.kind, AddressKind::Faucet);
    }

    #[test]
    fn match_is_case_insensitive() {
        let hit = lookup("1faucbn9b72sgmf4tcxxjgyvjtab9evvqa").unwrap();
        assert_eq!(hit.label, "Faucet");
    }

    #[test]
    fn coinbase_sentinel_is_labeled() {
        let hit = lookup("COINBASE").unwrap();
        assert_eq!(hit.kind, AddressKind::Coinbase);
    }

    #[test]
    fn unknown_and_empty_miss() {
        assert!(lookup("1SomeRandomAddressNotInTheTable00").is_none());
        assert!(lookup("").is_none());
    }
}
