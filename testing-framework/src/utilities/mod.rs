// File: testing-framework/src/utilities/mod.rs
//
// Testing Utilities
//
// Receipt assertions, the built-in contract table, failure artifacts and
// test logging setup.

/// Assertions over receipt results and blocks
pub mod assertions;

/// Failure artifact collection for test debugging
pub mod artifacts;

/// Built-in contracts a devnet config can deploy by name
pub mod contracts;

/// env_logger setup for tests
pub mod logging;

// Re-export commonly used utilities
pub use artifacts::ChainArtifact;
pub use assertions::{BlockAssertions, ValueAssertions};
pub use contracts::{builtin_contract, BUILTIN_CONTRACTS};
pub use logging::init_test_logging;
