//! Convenient re-exports for test code
//!
//! ```rust
//! use landreg_testing_framework::prelude::*;
//! ```

pub use crate::config::{ContractConfig, DevnetConfig};
pub use crate::tier1_component::{Account, Accounts, Devnet, DevnetBuilder, LedgerTest, Tx};
pub use crate::utilities::{BlockAssertions, ValueAssertions};

pub use landreg_common::{crypto::Address, types, Value};
pub use landreg_ledger::{Block, Chain, ChainError, Receipt, Transaction};

pub use anyhow::{Context, Result};
