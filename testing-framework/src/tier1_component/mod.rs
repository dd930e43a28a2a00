//! Tier 1: Component-level testing
//!
//! In-process ledger testing without RPC/P2P.
//! Fast, deterministic, one fresh chain per test.
//!
//! ## Key Features
//!
//! - Named accounts with deterministic addresses
//! - Contracts deployed by the deployer before the first block
//! - Genesis at height 1, one block per `mine_block`
//!
//! ## Example
//!
//! ```rust
//! use landreg_testing_framework::prelude::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut devnet = DevnetBuilder::new().with_wallet_count(2).build()?;
//! let wallet = devnet.accounts.get("wallet_2")?.address;
//!
//! let block = devnet.chain.mine_block(vec![Tx::contract_call(
//!     "land-registry",
//!     "get-property-details",
//!     vec![types::uint(1)],
//!     &wallet,
//! )])?;
//! assert_eq!(block.receipts[0].result, "none");
//! # Ok(())
//! # }
//! ```

mod accounts;
mod devnet;
mod runner;

pub use accounts::{Account, Accounts};
pub use devnet::{Devnet, DevnetBuilder};
pub use runner::{LedgerTest, Tx};
