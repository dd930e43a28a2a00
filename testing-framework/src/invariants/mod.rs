//! Core invariant checkers
//!
//! Chain-wide consistency checks run after scenarios:
//! - Height monotonicity (genesis at 1, each block parent-linked to the previous)
//! - Nonce monotonicity (per-sender nonces count up from 0 across blocks)
//! - Receipt count (chain nonces equal the number of receipts per sender)

use anyhow::{bail, Result};
use landreg_common::{config::GENESIS_HEIGHT, crypto::Address};
use landreg_ledger::Chain;
use std::collections::HashMap;

/// Invariant names accepted by [`check_invariant`]
pub const KNOWN_INVARIANTS: &[&str] = &[
    "height_monotonicity",
    "nonce_monotonicity",
    "receipt_count",
];

/// Check one invariant by name
pub fn check_invariant(name: &str, chain: &Chain) -> Result<()> {
    match name {
        "height_monotonicity" => check_height_monotonicity(chain),
        "nonce_monotonicity" => check_nonce_monotonicity(chain),
        "receipt_count" => check_receipt_count(chain),
        other => bail!(
            "Unknown invariant '{}' (known: {})",
            other,
            KNOWN_INVARIANTS.join(", ")
        ),
    }
}

/// Heights run from genesis without gaps and each block links to its parent
pub fn check_height_monotonicity(chain: &Chain) -> Result<()> {
    let mut expected = GENESIS_HEIGHT;
    let mut parent = None;

    for block in chain.blocks() {
        if block.height != expected {
            bail!(
                "Height gap: expected block {}, found {}",
                expected,
                block.height
            );
        }
        if let Some(parent) = parent {
            if block.parent != parent {
                bail!(
                    "Block {} parent {} does not match previous hash {}",
                    block.height,
                    block.parent,
                    parent
                );
            }
        }
        parent = Some(block.hash.clone());
        expected += 1;
    }
    Ok(())
}

/// Every sender's receipts carry nonces 0, 1, 2, ... in chain order
pub fn check_nonce_monotonicity(chain: &Chain) -> Result<()> {
    let mut next: HashMap<Address, u64> = HashMap::new();

    for block in chain.blocks() {
        for receipt in &block.receipts {
            let expected = next.entry(receipt.sender).or_insert(0);
            if receipt.nonce != *expected {
                bail!(
                    "Nonce out of order for {} in block {}: expected {}, got {}",
                    receipt.sender,
                    block.height,
                    expected,
                    receipt.nonce
                );
            }
            *expected += 1;
        }
    }
    Ok(())
}

/// The chain's nonce for each sender equals its receipt count
pub fn check_receipt_count(chain: &Chain) -> Result<()> {
    let mut counts: HashMap<Address, u64> = HashMap::new();
    for receipt in chain.blocks().iter().flat_map(|b| &b.receipts) {
        *counts.entry(receipt.sender).or_insert(0) += 1;
    }

    for (sender, count) in counts {
        let nonce = chain.nonce(&sender);
        if nonce != count {
            bail!(
                "Sender {} has {} receipts but nonce {}",
                sender,
                count,
                nonce
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use landreg_common::types;
    use landreg_ledger::Transaction;

    fn chain_with_registrations() -> Chain {
        let mut chain = Chain::new();
        let deployer = Address::derive_account("deployer");
        chain
            .deploy_contract(
                land_registry::CONTRACT_NAME,
                Box::new(land_registry::LandRegistry::new()),
                &deployer,
            )
            .unwrap();

        let wallet = Address::derive_account("wallet_1");
        let register = |id| {
            Transaction::contract_call(
                "land-registry",
                "register-property",
                vec![types::uint(id), types::ascii("plot")],
                &wallet,
            )
        };
        chain.mine_block(vec![register(1), register(1)]).unwrap();
        chain.mine_empty_block();
        chain.mine_block(vec![register(2)]).unwrap();
        chain
    }

    #[test]
    fn test_all_invariants_hold() {
        let chain = chain_with_registrations();
        for name in KNOWN_INVARIANTS {
            check_invariant(name, &chain).unwrap();
        }
    }

    #[test]
    fn test_unknown_invariant() {
        let err = check_invariant("balance_conservation", &Chain::new()).unwrap_err();
        assert!(err.to_string().contains("height_monotonicity"));
    }
}
