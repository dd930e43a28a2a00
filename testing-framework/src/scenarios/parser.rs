//! YAML scenario model and parser

use crate::{config::DevnetConfig, invariants::KNOWN_INVARIANTS};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A parsed scenario file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestScenario {
    /// Scenario name
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,

    /// Devnet layout; the default devnet when absent
    #[serde(default)]
    pub devnet: Option<DevnetConfig>,

    /// Steps, run in order
    pub steps: Vec<Step>,

    /// Invariants checked after the last step
    #[serde(default)]
    pub invariants: Option<Vec<String>>,
}

/// One scenario step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Mine one block holding `txs` in order
    MineBlock {
        /// Transactions; an empty list mines an empty block
        #[serde(default)]
        txs: Vec<TxEntry>,
        /// Checks on the mined block
        #[serde(default)]
        expect: Option<BlockExpect>,
    },

    /// Mine `count` empty blocks
    MineEmptyBlocks {
        /// Number of blocks
        count: u64,
    },

    /// Evaluate a read-only function without mining
    CallReadOnly {
        /// Contract name or qualified id
        contract: String,
        /// Read-only function
        function: String,
        /// Argument literals
        #[serde(default)]
        args: Vec<String>,
        /// Caller account; the deployer when absent
        #[serde(default)]
        sender: Option<String>,
        /// Expected result literal
        #[serde(default)]
        expect: Option<String>,
    },

    /// Require the chain tip to be at height `eq`
    AssertHeight {
        /// Expected height
        eq: u64,
    },
}

/// A contract call inside a `mine_block` step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TxEntry {
    /// Contract name or qualified id
    pub contract: String,
    /// Function name
    pub function: String,
    /// Argument literals
    #[serde(default)]
    pub args: Vec<String>,
    /// Signing account name
    pub sender: String,
}

/// Checks on a mined block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockExpect {
    /// Block height
    #[serde(default)]
    pub height: Option<u64>,
    /// Number of receipts
    #[serde(default)]
    pub receipts: Option<usize>,
    /// Result literal per receipt, in order
    #[serde(default)]
    pub results: Option<Vec<String>>,
}

/// Parse and validate a scenario document
pub fn parse_scenario(yaml: &str) -> Result<TestScenario> {
    let scenario: TestScenario =
        serde_yaml::from_str(yaml).context("Failed to parse scenario YAML")?;
    validate(&scenario).with_context(|| format!("Invalid scenario '{}'", scenario.name))?;
    Ok(scenario)
}

/// Read and parse a scenario file
pub fn load_scenario(path: impl AsRef<Path>) -> Result<TestScenario> {
    let path = path.as_ref();
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario {}", path.display()))?;
    parse_scenario(&yaml).with_context(|| format!("In {}", path.display()))
}

fn validate(scenario: &TestScenario) -> Result<()> {
    if scenario.name.trim().is_empty() {
        bail!("Scenario name must not be empty");
    }
    if scenario.steps.is_empty() {
        bail!("Scenario has no steps");
    }

    if let Some(devnet) = &scenario.devnet {
        devnet.validate()?;
    }

    for (idx, step) in scenario.steps.iter().enumerate() {
        match step {
            Step::MineEmptyBlocks { count: 0 } => {
                bail!("Step {}: mine_empty_blocks needs a count above 0", idx + 1)
            }
            Step::MineBlock {
                txs,
                expect: Some(expect),
            } => {
                if let Some(receipts) = expect.receipts {
                    if receipts != txs.len() {
                        bail!(
                            "Step {}: expects {} receipts but submits {} transactions",
                            idx + 1,
                            receipts,
                            txs.len()
                        );
                    }
                }
                if let Some(results) = &expect.results {
                    if results.len() != txs.len() {
                        bail!(
                            "Step {}: {} expected results for {} transactions",
                            idx + 1,
                            results.len(),
                            txs.len()
                        );
                    }
                }
            }
            _ => {}
        }
    }

    for name in scenario.invariants.iter().flatten() {
        if !KNOWN_INVARIANTS.contains(&name.as_str()) {
            bail!("Unknown invariant '{}'", name);
        }
    }
    Ok(())
}
