// File: testing-framework/src/config.rs
//
// Devnet Configuration
//
// Describes the accounts and contracts a test devnet starts with. The
// default matches the usual local layout: a `deployer`, nine wallets and
// the land registry contract deployed by the deployer.

use anyhow::{Context, Result};
use landreg_common::config::{DEFAULT_WALLET_COUNT, DEPLOYER_ACCOUNT, WALLET_PREFIX};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contract deployed at devnet creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Name the contract is deployed under
    pub name: String,
    /// Built-in contract to instantiate (defaults to `name`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ContractConfig {
    /// Deploy built-in `name` under the same name
    pub fn builtin(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
        }
    }

    /// Built-in contract id to instantiate
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.name)
    }
}

/// Devnet layout
///
/// ```yaml
/// deployer: deployer
/// wallets: 9
/// accounts: [auditor]
/// contracts:
///   - name: land-registry
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DevnetConfig {
    /// Account that deploys every configured contract
    pub deployer: String,
    /// Number of `wallet_N` accounts, numbered from 1
    pub wallets: usize,
    /// Additional named accounts
    pub accounts: Vec<String>,
    /// Contracts deployed before the first block
    pub contracts: Vec<ContractConfig>,
}

impl Default for DevnetConfig {
    fn default() -> Self {
        Self {
            deployer: DEPLOYER_ACCOUNT.to_string(),
            wallets: DEFAULT_WALLET_COUNT,
            accounts: Vec::new(),
            contracts: vec![ContractConfig::builtin(land_registry::CONTRACT_NAME)],
        }
    }
}

impl DevnetConfig {
    /// Parse a YAML document; missing fields take their default values
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("Failed to parse devnet config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read devnet config {}", path.display()))?;
        Self::from_yaml_str(&yaml).with_context(|| format!("In {}", path.display()))
    }

    /// Account names in creation order: deployer, wallets, extra accounts
    pub fn account_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(1 + self.wallets + self.accounts.len());
        names.push(self.deployer.clone());
        names.extend((1..=self.wallets).map(|i| format!("{}{}", WALLET_PREFIX, i)));
        names.extend(self.accounts.iter().cloned());
        names
    }

    /// Reject empty or duplicate account and contract names
    pub fn validate(&self) -> Result<()> {
        let names = self.account_names();
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                anyhow::bail!("Account names must not be empty");
            }
            if names[..i].contains(name) {
                anyhow::bail!("Duplicate account name '{}'", name);
            }
        }

        for (i, contract) in self.contracts.iter().enumerate() {
            if self.contracts[..i].iter().any(|c| c.name == contract.name) {
                anyhow::bail!("Duplicate contract name '{}'", contract.name);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = DevnetConfig::default();
        let names = config.account_names();
        assert_eq!(names.len(), 10);
        assert_eq!(names[0], "deployer");
        assert_eq!(names[1], "wallet_1");
        assert_eq!(names[9], "wallet_9");
        assert_eq!(config.contracts[0].source(), "land-registry");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = DevnetConfig::from_yaml_str("wallets: 2\naccounts: [auditor]\n").unwrap();
        assert_eq!(
            config.account_names(),
            vec!["deployer", "wallet_1", "wallet_2", "auditor"]
        );
        assert_eq!(config.contracts, DevnetConfig::default().contracts);
    }

    #[test]
    fn test_contract_source_alias() {
        let yaml = r#"
contracts:
  - name: registry-v2
    source: land-registry
"#;
        let config = DevnetConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.contracts[0].name, "registry-v2");
        assert_eq!(config.contracts[0].source(), "land-registry");
    }

    #[test]
    fn test_rejects_duplicates_and_unknown_fields() {
        assert!(DevnetConfig::from_yaml_str("accounts: [wallet_1]\n").is_err());
        assert!(DevnetConfig::from_yaml_str("walets: 3\n").is_err());
        let yaml = "contracts:\n  - name: a\n  - name: a\n";
        assert!(DevnetConfig::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devnet.yaml");
        std::fs::write(&path, "wallets: 1\n").unwrap();

        let config = DevnetConfig::from_file(&path).unwrap();
        assert_eq!(config.wallets, 1);
        assert!(DevnetConfig::from_file(dir.path().join("missing.yaml")).is_err());
    }
}
