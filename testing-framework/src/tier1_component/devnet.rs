use super::Accounts;
use crate::{config::DevnetConfig, utilities::contracts::builtin_contract};
use anyhow::{Context, Result};
use landreg_common::contract::Contract;
use landreg_ledger::Chain;
use log::info;

/// A chain plus the named accounts that can drive it
pub struct Devnet {
    /// Simulated ledger, at genesis height right after build
    pub chain: Chain,
    /// Named accounts
    pub accounts: Accounts,
}

/// Builder for [`Devnet`]
///
/// Contracts from the config are deployed first, then any contract added
/// with [`DevnetBuilder::with_contract`], all by the deployer account.
pub struct DevnetBuilder {
    config: DevnetConfig,
    extra_contracts: Vec<(String, Box<dyn Contract>)>,
}

impl DevnetBuilder {
    /// Builder with the default devnet layout
    pub fn new() -> Self {
        Self::from_config(DevnetConfig::default())
    }

    /// Builder starting from an explicit config
    pub fn from_config(config: DevnetConfig) -> Self {
        Self {
            config,
            extra_contracts: Vec::new(),
        }
    }

    /// Number of `wallet_N` accounts
    pub fn with_wallet_count(mut self, wallets: usize) -> Self {
        self.config.wallets = wallets;
        self
    }

    /// Add a named account
    pub fn with_account(mut self, name: impl Into<String>) -> Self {
        self.config.accounts.push(name.into());
        self
    }

    /// Deploy no configured contracts
    pub fn without_default_contracts(mut self) -> Self {
        self.config.contracts.clear();
        self
    }

    /// Deploy a custom contract instance
    pub fn with_contract(mut self, name: impl Into<String>, contract: Box<dyn Contract>) -> Self {
        self.extra_contracts.push((name.into(), contract));
        self
    }

    /// Create accounts and deploy contracts
    pub fn build(self) -> Result<Devnet> {
        self.config.validate()?;

        let accounts = Accounts::from_names(self.config.account_names());
        let deployer = accounts.deployer()?.address;
        let mut chain = Chain::new();

        for contract in &self.config.contracts {
            let instance = builtin_contract(contract.source())
                .with_context(|| format!("Unknown built-in contract '{}'", contract.source()))?;
            chain
                .deploy_contract(&contract.name, instance, &deployer)
                .with_context(|| format!("Failed to deploy '{}'", contract.name))?;
        }

        for (name, instance) in self.extra_contracts {
            chain
                .deploy_contract(&name, instance, &deployer)
                .with_context(|| format!("Failed to deploy '{}'", name))?;
        }

        if log::log_enabled!(log::Level::Info) {
            info!(
                "Devnet ready: {} accounts, {} contracts",
                accounts.len(),
                chain.contracts().count()
            );
        }

        Ok(Devnet { chain, accounts })
    }
}

impl Default for DevnetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
