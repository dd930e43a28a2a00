//! YAML scenario execution engine
//!
//! Runs parsed scenarios against a fresh devnet, step by step, and records
//! a human-readable log.
//!
//! # Example
//!
//! ```rust
//! use landreg_testing_framework::scenarios::{parse_scenario, ScenarioExecutor};
//!
//! # fn main() -> anyhow::Result<()> {
//! let yaml = r#"
//! name: "Register"
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
//! "#;
//!
//! let scenario = parse_scenario(yaml)?;
//! let mut executor = ScenarioExecutor::new();
//! let report = executor.execute(scenario)?;
//!
//! assert!(report.success);
//! # Ok(())
//! # }
//! ```

use super::parser::{BlockExpect, Step, TestScenario, TxEntry};
use crate::{
    invariants::check_invariant,
    tier1_component::{Accounts, Devnet, DevnetBuilder, Tx},
};
use anyhow::{bail, Context, Result};
use landreg_common::Value;
use landreg_ledger::{Block, Chain, Transaction};
use log::debug;
use std::str::FromStr;

/// Scenario executor that runs parsed YAML scenarios
pub struct ScenarioExecutor {
    /// Devnet of the current or last scenario
    devnet: Option<Devnet>,

    /// Execution log
    log: Vec<String>,

    /// Current step number (1-indexed)
    current_step: usize,
}

impl ScenarioExecutor {
    /// Create new executor
    pub fn new() -> Self {
        Self {
            devnet: None,
            log: Vec::new(),
            current_step: 0,
        }
    }

    /// Execute a complete scenario
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Devnet setup fails
    /// - Any step fails or any expectation does not hold
    /// - Any listed invariant is violated
    pub fn execute(&mut self, scenario: TestScenario) -> Result<ExecutionReport> {
        self.log.clear();
        self.current_step = 0;

        self.log(format!("Starting scenario: {}", scenario.name));
        if let Some(desc) = &scenario.description {
            self.log(format!("Description: {}", desc));
        }

        self.setup_devnet(&scenario)?;

        for (idx, step) in scenario.steps.iter().enumerate() {
            self.current_step = idx + 1;
            self.log(format!("\n--- Step {}: {} ---", self.current_step, step_name(step)));

            self.execute_step(step)
                .with_context(|| format!("Failed at step {} ({:?})", self.current_step, step))?;
        }

        if let Some(invariants) = &scenario.invariants {
            self.log("\n--- Checking Invariants ---".to_string());
            for inv in invariants {
                check_invariant(inv, self.chain()?)
                    .with_context(|| format!("Invariant '{}' violated", inv))?;
                self.log(format!("  ✓ {}", inv));
            }
        }

        self.log("\n=== Scenario completed successfully ===".to_string());

        Ok(ExecutionReport {
            scenario_name: scenario.name,
            steps_executed: self.current_step,
            success: true,
            log: self.log.clone(),
        })
    }

    /// Chain of the current or last scenario
    pub fn chain(&self) -> Result<&Chain> {
        self.devnet
            .as_ref()
            .map(|d| &d.chain)
            .context("Devnet not initialized")
    }

    /// Accounts of the current or last scenario
    pub fn accounts(&self) -> Result<&Accounts> {
        self.devnet
            .as_ref()
            .map(|d| &d.accounts)
            .context("Devnet not initialized")
    }

    /// Get execution log
    pub fn get_log(&self) -> &[String] {
        &self.log
    }

    fn setup_devnet(&mut self, scenario: &TestScenario) -> Result<()> {
        self.log("Setting up devnet...".to_string());

        let builder = match &scenario.devnet {
            Some(config) => DevnetBuilder::from_config(config.clone()),
            None => DevnetBuilder::new(),
        };
        let devnet = builder.build()?;

        for account in devnet.accounts.iter() {
            self.log.push(format!("  Account '{}': {}", account.name, account.address));
        }
        for contract in devnet.chain.contracts() {
            self.log.push(format!("  Contract {}", contract.id));
        }

        self.log(format!(
            "Devnet ready at height {}",
            devnet.chain.block_height()
        ));
        self.devnet = Some(devnet);
        Ok(())
    }

    fn execute_step(&mut self, step: &Step) -> Result<()> {
        match step {
            Step::MineBlock { txs, expect } => self.execute_mine_block(txs, expect.as_ref()),
            Step::MineEmptyBlocks { count } => self.execute_mine_empty_blocks(*count),
            Step::CallReadOnly {
                contract,
                function,
                args,
                sender,
                expect,
            } => self.execute_call_read_only(
                contract,
                function,
                args,
                sender.as_deref(),
                expect.as_deref(),
            ),
            Step::AssertHeight { eq } => self.execute_assert_height(*eq),
        }
    }

    fn execute_mine_block(
        &mut self,
        entries: &[TxEntry],
        expect: Option<&BlockExpect>,
    ) -> Result<()> {
        let devnet = self.devnet.as_mut().context("Devnet not initialized")?;

        let txs = entries
            .iter()
            .map(|entry| build_transaction(entry, &devnet.accounts))
            .collect::<Result<Vec<Transaction>>>()?;

        let block = devnet.chain.mine_block(txs)?;
        let expected_results = match expect {
            Some(expect) => check_block(&block, expect, &devnet.accounts)?,
            None => 0,
        };

        self.log(format!(
            "  ✓ Block {} mined: hash={}, receipts={}",
            block.height,
            block.hash,
            block.receipts.len()
        ));
        for receipt in &block.receipts {
            self.log.push(format!("    {} -> {}", receipt.function, receipt.result));
        }
        if expected_results > 0 {
            self.log(format!("  ✓ {} results match", expected_results));
        }
        Ok(())
    }

    fn execute_mine_empty_blocks(&mut self, count: u64) -> Result<()> {
        let chain = &mut self.devnet.as_mut().context("Devnet not initialized")?.chain;
        let target = chain.block_height() + count;
        chain.mine_empty_block_until(target)?;

        self.log(format!("  ✓ Mined {} empty blocks, height {}", count, target));
        Ok(())
    }

    fn execute_call_read_only(
        &mut self,
        contract: &str,
        function: &str,
        args: &[String],
        sender: Option<&str>,
        expect: Option<&str>,
    ) -> Result<()> {
        let devnet = self.devnet.as_ref().context("Devnet not initialized")?;
        let caller = match sender {
            Some(name) => devnet.accounts.get(name)?,
            None => devnet.accounts.deployer()?,
        };

        let args = parse_literals(args, &devnet.accounts)?;
        let result = devnet
            .chain
            .call_read_only(contract, function, args, &caller.address)?;

        if let Some(expected) = expect {
            let expected = parse_literal(expected, &devnet.accounts)?;
            if result != expected {
                bail!(
                    "{}::{} returned {}, expected {}",
                    contract,
                    function,
                    result,
                    expected
                );
            }
        }

        self.log(format!("  ✓ {}::{} -> {}", contract, function, result));
        Ok(())
    }

    fn execute_assert_height(&mut self, expected: u64) -> Result<()> {
        let actual = self.chain()?.block_height();
        if actual != expected {
            bail!(
                "Height assertion failed: expected {}, got {}",
                expected,
                actual
            );
        }

        self.log(format!("  ✓ Height equals {}", expected));
        Ok(())
    }

    fn log(&mut self, message: String) {
        if log::log_enabled!(log::Level::Debug) {
            debug!("{}", message.trim_start());
        }
        self.log.push(message);
    }
}

impl Default for ScenarioExecutor {
    fn default() -> Self {
        Self::new()
    }
}

fn step_name(step: &Step) -> &'static str {
    match step {
        Step::MineBlock { .. } => "mine_block",
        Step::MineEmptyBlocks { .. } => "mine_empty_blocks",
        Step::CallReadOnly { .. } => "call_read_only",
        Step::AssertHeight { .. } => "assert_height",
    }
}

fn build_transaction(entry: &TxEntry, accounts: &Accounts) -> Result<Transaction> {
    let sender = accounts.get(&entry.sender)?;
    let args = parse_literals(&entry.args, accounts)?;
    Ok(Tx::contract_call(
        &entry.contract,
        &entry.function,
        args,
        &sender.address,
    ))
}

// Returns how many results were compared
fn check_block(block: &Block, expect: &BlockExpect, accounts: &Accounts) -> Result<usize> {
    if let Some(height) = expect.height {
        if block.height != height {
            bail!("Expected block height {}, got {}", height, block.height);
        }
    }

    if let Some(count) = expect.receipts {
        if block.receipts.len() != count {
            bail!("Expected {} receipts, got {}", count, block.receipts.len());
        }
    }

    let Some(results) = &expect.results else {
        return Ok(0);
    };
    if results.len() != block.receipts.len() {
        bail!(
            "Expected {} results, block {} has {} receipts",
            results.len(),
            block.height,
            block.receipts.len()
        );
    }
    for (idx, (literal, receipt)) in results.iter().zip(&block.receipts).enumerate() {
        let expected = parse_literal(literal, accounts)?;
        if receipt.result != expected {
            bail!(
                "Receipt {} ({}): expected {}, got {}",
                idx,
                receipt.function,
                expected,
                receipt.result
            );
        }
    }
    Ok(results.len())
}

/// Replace `{account}` placeholders with addresses
///
/// Text inside quoted ASCII literals is copied unchanged, so `"{wallet_1}"`
/// stays a plain string.
pub fn substitute_accounts(literal: &str, accounts: &Accounts) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut rest = literal;
    let mut in_string = false;

    while let Some(c) = rest.chars().next() {
        if in_string {
            match c {
                '\\' => {
                    // keep the escape and the escaped char together
                    let len = rest.chars().take(2).map(char::len_utf8).sum();
                    out.push_str(&rest[..len]);
                    rest = &rest[len..];
                    continue;
                }
                '"' => in_string = false,
                _ => {}
            }
        } else if c == '"' {
            in_string = true;
        } else if c == '{' {
            let placeholder = accounts.iter().find(|account| {
                rest[1..].starts_with(account.name.as_str())
                    && rest[1 + account.name.len()..].starts_with('}')
            });
            if let Some(account) = placeholder {
                out.push_str(&account.address.to_string());
                rest = &rest[account.name.len() + 2..];
                continue;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

fn parse_literal(literal: &str, accounts: &Accounts) -> Result<Value> {
    let expanded = substitute_accounts(literal, accounts);
    Value::from_str(&expanded).with_context(|| format!("Invalid value literal '{}'", literal))
}

fn parse_literals(literals: &[String], accounts: &Accounts) -> Result<Vec<Value>> {
    literals
        .iter()
        .map(|literal| parse_literal(literal, accounts))
        .collect()
}

/// Execution report
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    /// Scenario name
    pub scenario_name: String,

    /// Number of steps executed
    pub steps_executed: usize,

    /// Whether execution succeeded
    pub success: bool,

    /// Execution log
    pub log: Vec<String>,
}

impl ExecutionReport {
    /// Print report to stdout
    pub fn print(&self) {
        println!("\n╔════════════════════════════════════════════════════════════╗");
        println!("║  Scenario Execution Report                                 ║");
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║  Name: {:<50} ║", self.scenario_name);
        println!("║  Steps: {:<48} ║", self.steps_executed);
        println!(
            "║  Status: {:<47} ║",
            if self.success {
                "SUCCESS ✓"
            } else {
                "FAILED ✗"
            }
        );
        println!("╚════════════════════════════════════════════════════════════╝\n");

        println!("Execution Log:");
        println!("═════════════");
        for entry in &self.log {
            println!("{}", entry);
        }
    }
}
