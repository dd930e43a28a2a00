//! DSL scenario parser and executor
//!
//! Parses YAML scenario files:
//! - Arguments and expected results are value literals (`u1`, `"text"`, `(ok true)`)
//! - `{account}` placeholders expand to the account's address
//! - Quote literals that YAML would read as numbers or booleans
//!
//! ## Example Scenario
//!
//! ```yaml
//! name: "Register and read"
//! description: "wallet_1 registers property 1"
//! devnet:
//!   wallets: 2
//! steps:
//!   - action: "mine_block"
//!     txs:
//!       - contract: "land-registry"
//!         function: "register-property"
//!         args: ["u1", '"Property 1 details"']
//!         sender: "wallet_1"
//!     expect:
//!       height: 2
//!       results: ["(ok true)"]
//!   - action: "call_read_only"
//!     contract: "land-registry"
//!     function: "get-property-details"
//!     args: ["u1"]
//!     expect: '(some {owner: {wallet_1}, details: "Property 1 details"})'
//!   - action: "assert_height"
//!     eq: 2
//! invariants:
//!   - "height_monotonicity"
//!   - "nonce_monotonicity"
//! ```

pub mod executor;
pub mod parser;

pub use executor::{ExecutionReport, ScenarioExecutor};
pub use parser::{load_scenario, parse_scenario, BlockExpect, Step, TestScenario, TxEntry};
