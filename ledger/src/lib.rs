// Land registry ledger library
// Exposes the simulated chain used by the testing framework

#![allow(clippy::result_large_err)]
#![allow(clippy::uninlined_format_args)]

extern crate log;

pub mod core;

pub use crate::core::{
    block::{Block, Receipt},
    chain::{Chain, DeployedContract},
    error::ChainError,
    transaction::{Transaction, TransactionPayload},
};
