use crate::{config::MAX_CONTRACT_NAME_LEN, crypto::Address};
use std::fmt::{self, Display, Formatter};

/// Fully qualified contract identifier: `<issuer>.<name>`
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ContractId {
    pub issuer: Address,
    pub name: String,
}

impl ContractId {
    pub fn new(issuer: Address, name: impl Into<String>) -> Self {
        Self {
            issuer,
            name: name.into(),
        }
    }
}

impl Display for ContractId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.issuer, self.name)
    }
}

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum PrincipalData {
    Standard(Address),
    Contract(ContractId),
}

impl Display for PrincipalData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard(address) => write!(f, "{}", address),
            Self::Contract(id) => write!(f, "{}", id),
        }
    }
}

impl From<Address> for PrincipalData {
    fn from(address: Address) -> Self {
        Self::Standard(address)
    }
}

impl From<ContractId> for PrincipalData {
    fn from(id: ContractId) -> Self {
        Self::Contract(id)
    }
}

// Contract, map and function names: a letter followed by letters, digits, '-' or '_'
pub fn is_valid_contract_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    name.len() <= MAX_CONTRACT_NAME_LEN
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
