use anyhow::{Context, Result};
use indexmap::IndexMap;
use landreg_common::crypto::Address;
use serde::Serialize;

/// Named principal on the devnet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Symbolic name (`deployer`, `wallet_1`, ...)
    pub name: String,
    /// Principal address derived from the name
    pub address: Address,
}

impl Account {
    /// Account whose address is derived from `name`
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let address = Address::derive_account(&name);
        Self { name, address }
    }
}

/// Registry of named accounts, in creation order
#[derive(Debug, Clone, Default)]
pub struct Accounts {
    accounts: IndexMap<String, Account>,
    deployer: String,
}

impl Accounts {
    /// Create accounts for `names`; the first one is the deployer
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let accounts: IndexMap<String, Account> = names
            .into_iter()
            .map(|name| {
                let account = Account::new(name);
                (account.name.clone(), account)
            })
            .collect();
        let deployer = accounts.keys().next().cloned().unwrap_or_default();
        Self { accounts, deployer }
    }

    /// Look up an account by name
    pub fn get(&self, name: &str) -> Result<&Account> {
        self.accounts
            .get(name)
            .with_context(|| format!("Account '{}' not found", name))
    }

    /// Account that deployed the devnet contracts
    pub fn deployer(&self) -> Result<&Account> {
        self.get(&self.deployer)
    }

    /// Reverse lookup by address
    pub fn find_by_address(&self, address: &Address) -> Option<&Account> {
        self.accounts.values().find(|a| &a.address == address)
    }

    /// Accounts in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no account exists
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
