use super::{Accounts, DevnetBuilder};
use crate::{
    config::DevnetConfig,
    utilities::{artifacts::ChainArtifact, logging::init_test_logging},
};
use anyhow::{Context, Result};
use landreg_common::{crypto::Address, Value};
use landreg_ledger::{Chain, Transaction};
use log::{debug, info, warn};
use std::path::PathBuf;

/// Transaction constructors for test bodies
pub struct Tx;

impl Tx {
    /// Call `function` on `contract` with typed `args`, signed by `sender`
    ///
    /// `contract` is either a bare contract name or a fully qualified
    /// `<issuer>.<name>` id.
    pub fn contract_call(
        contract: &str,
        function: &str,
        args: Vec<Value>,
        sender: &Address,
    ) -> Transaction {
        Transaction::contract_call(contract, function, args, sender)
    }
}

/// A named test run against a fresh devnet
///
/// ```rust
/// use landreg_testing_framework::prelude::*;
///
/// # fn main() -> anyhow::Result<()> {
/// LedgerTest::new("genesis height").run(|chain, _accounts| {
///     assert_eq!(chain.block_height(), 1);
///     Ok(())
/// })
/// # }
/// ```
pub struct LedgerTest {
    name: String,
    config: DevnetConfig,
    artifacts_dir: Option<PathBuf>,
}

impl LedgerTest {
    /// Test on the default devnet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: DevnetConfig::default(),
            artifacts_dir: None,
        }
    }

    /// Use a custom devnet layout
    pub fn with_config(mut self, config: DevnetConfig) -> Self {
        self.config = config;
        self
    }

    /// Save a [`ChainArtifact`] into `dir` when the body fails
    pub fn with_artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts_dir = Some(dir.into());
        self
    }

    /// Test name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build the devnet and run `body` against it
    ///
    /// Any error from setup or from the body is returned with the test
    /// name attached.
    pub fn run<F>(self, body: F) -> Result<()>
    where
        F: FnOnce(&mut Chain, &Accounts) -> Result<()>,
    {
        init_test_logging();

        let name = self.name;
        if log::log_enabled!(log::Level::Info) {
            info!("Running test '{}'", name);
        }

        let mut devnet = DevnetBuilder::from_config(self.config)
            .build()
            .with_context(|| format!("Test '{}': devnet setup failed", name))?;

        if let Err(e) = body(&mut devnet.chain, &devnet.accounts) {
            if let Some(dir) = &self.artifacts_dir {
                let mut artifact = ChainArtifact::capture(&name, &devnet.chain, &devnet.accounts);
                artifact.set_failure_reason(format!("{:#}", e));
                if let Err(save_err) = artifact.save(dir) {
                    if log::log_enabled!(log::Level::Warn) {
                        warn!("Test '{}': could not save artifact: {:#}", name, save_err);
                    }
                }
            }
            return Err(e.context(format!("Test '{}' failed", name)));
        }

        if log::log_enabled!(log::Level::Debug) {
            debug!(
                "Test '{}' passed at height {}",
                name,
                devnet.chain.block_height()
            );
        }
        Ok(())
    }
}
