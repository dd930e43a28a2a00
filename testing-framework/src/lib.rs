//! # Land Registry Testing Framework
//!
//! Deterministic, in-process harness for exercising contracts on the
//! simulated ledger.
//!
//! ## Quick Start
//!
//! ```rust
//! use landreg_testing_framework::prelude::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! LedgerTest::new("Ensure that a property can be registered").run(|chain, accounts| {
//!     let user1 = accounts.get("wallet_1")?;
//!
//!     let block = chain.mine_block(vec![Tx::contract_call(
//!         "land-registry",
//!         "register-property",
//!         vec![types::uint(1), types::ascii("Property 1 details")],
//!         &user1.address,
//!     )])?;
//!
//!     assert_eq!(block.height, 2);
//!     assert_eq!(block.receipts[0].result, "(ok true)");
//!     Ok(())
//! })
//! # }
//! ```
//!
//! ## Layout
//!
//! - **tier1_component**: devnet, accounts, transaction constructor, test runner
//! - **scenarios**: YAML scenario parser and executor
//! - **invariants**: chain-wide consistency checks
//! - **utilities**: receipt assertions, built-in contracts, logging

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Devnet setup and the closure-based test runner
pub mod tier1_component;

/// Devnet configuration (accounts and deployed contracts)
pub mod config;

// Core invariant checkers (height continuity, nonce monotonicity, receipt accounting)
pub mod invariants;

// DSL scenario parser and executor
pub mod scenarios;

/// Shared utilities
pub mod utilities;

// Convenient re-exports for common usage
pub mod prelude;

pub use config::DevnetConfig;
pub use tier1_component::{Account, Accounts, Devnet, DevnetBuilder, LedgerTest, Tx};

/// Framework version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
