use super::ContractError;
use crate::{
    crypto::Address,
    value::{ContractId, Value},
};
use serde::{Deserialize, Serialize};

/// Value printed by a contract during a call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEvent {
    /// Contract that emitted the event, as `<issuer>.<name>`
    pub contract: String,
    pub value: Value,
}

/// Everything a running contract can observe or change
///
/// Map keys and values are whole [`Value`]s; the ledger keys storage by
/// the key's canonical literal.
pub trait InvocationContext {
    /// Principal that signed the transaction (`tx-sender`)
    fn caller(&self) -> &Address;

    fn contract(&self) -> &ContractId;

    /// Height of the block the call is executing in
    fn block_height(&self) -> u64;

    fn map_get(&self, map: &str, key: &Value) -> Result<Option<Value>, ContractError>;

    /// Insert or overwrite
    fn map_set(&mut self, map: &str, key: Value, value: Value) -> Result<(), ContractError>;

    /// Insert only if absent; returns whether the entry was written
    fn map_insert(&mut self, map: &str, key: Value, value: Value) -> Result<bool, ContractError>;

    /// Returns whether an entry was removed
    fn map_delete(&mut self, map: &str, key: &Value) -> Result<bool, ContractError>;

    fn print(&mut self, value: Value);
}
