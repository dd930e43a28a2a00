// File: testing-framework/src/utilities/contracts.rs
//
// Built-in contract table used by devnet configs and scenarios.

use land_registry::LandRegistry;
use landreg_common::contract::Contract;

/// Names accepted by [`builtin_contract`]
pub const BUILTIN_CONTRACTS: &[&str] = &[land_registry::CONTRACT_NAME];

/// Fresh instance of the built-in contract `source`
pub fn builtin_contract(source: &str) -> Option<Box<dyn Contract>> {
    match source {
        land_registry::CONTRACT_NAME => Some(Box::new(LandRegistry::new())),
        _ => None,
    }
}
