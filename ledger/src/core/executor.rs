// Contract call execution
//
// Checks a call against the contract interface, runs it over a layered
// view of storage and decides whether its writes survive.

use super::{
    chain::DeployedContract,
    error::ChainError,
    storage::{Changes, LayeredView, MemoryStorage, StorageKey},
};
use landreg_common::{
    contract::{ContractError, ContractEvent, InvocationContext, MapSignature},
    crypto::Address,
    value::{ContractId, TypeSignature},
    Value,
};
use log::{debug, trace};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CallMode {
    // Inside a mined block: public and read-only functions allowed
    Transaction,
    // Outside of any block: only read-only functions
    ReadOnly,
}

/// Result of one accepted call
#[derive(Debug)]
pub struct CallOutcome {
    pub result: Value,
    // Empty when the call returned (err ...) or was read-only
    pub changes: Changes,
    pub events: Vec<ContractEvent>,
}

struct CallContext<'a> {
    caller: &'a Address,
    contract: &'a ContractId,
    maps: &'a [MapSignature],
    block_height: u64,
    read_only: bool,
    view: LayeredView<'a>,
    changes: Changes,
    events: Vec<ContractEvent>,
}

impl CallContext<'_> {
    fn map_signature(&self, map: &str) -> Result<&MapSignature, ContractError> {
        self.maps
            .iter()
            .find(|m| m.name == map)
            .ok_or_else(|| ContractError::UndefinedMap(map.to_string()))
    }

    fn check_fits(
        map: &str,
        expected: &TypeSignature,
        value: &Value,
    ) -> Result<(), ContractError> {
        if expected.admits(value) {
            Ok(())
        } else {
            Err(ContractError::MapTypeMismatch {
                map: map.to_string(),
                expected: expected.to_string(),
                value: value.clone(),
            })
        }
    }

    fn check_write(
        &self,
        map: &str,
        key: &Value,
        value: Option<&Value>,
    ) -> Result<(), ContractError> {
        if self.read_only {
            return Err(ContractError::WriteInReadOnly(map.to_string()));
        }
        let signature = self.map_signature(map)?;
        Self::check_fits(map, &signature.key, key)?;
        if let Some(value) = value {
            Self::check_fits(map, &signature.value, value)?;
        }
        Ok(())
    }

    fn lookup(&self, key: &StorageKey) -> Option<Value> {
        match self.changes.lookup(key) {
            Some(entry) => entry.cloned(),
            None => self.view.get(key).cloned(),
        }
    }
}

impl InvocationContext for CallContext<'_> {
    fn caller(&self) -> &Address {
        self.caller
    }

    fn contract(&self) -> &ContractId {
        self.contract
    }

    fn block_height(&self) -> u64 {
        self.block_height
    }

    fn map_get(&self, map: &str, key: &Value) -> Result<Option<Value>, ContractError> {
        let signature = self.map_signature(map)?;
        Self::check_fits(map, &signature.key, key)?;
        Ok(self.lookup(&StorageKey::new(self.contract, map, key)))
    }

    fn map_set(&mut self, map: &str, key: Value, value: Value) -> Result<(), ContractError> {
        self.check_write(map, &key, Some(&value))?;
        if log::log_enabled!(log::Level::Trace) {
            trace!("{}::{} set {} = {}", self.contract, map, key, value);
        }
        self.changes
            .insert(StorageKey::new(self.contract, map, &key), value);
        Ok(())
    }

    fn map_insert(&mut self, map: &str, key: Value, value: Value) -> Result<bool, ContractError> {
        self.check_write(map, &key, Some(&value))?;
        let storage_key = StorageKey::new(self.contract, map, &key);
        if self.lookup(&storage_key).is_some() {
            return Ok(false);
        }
        if log::log_enabled!(log::Level::Trace) {
            trace!("{}::{} insert {} = {}", self.contract, map, key, value);
        }
        self.changes.insert(storage_key, value);
        Ok(true)
    }

    fn map_delete(&mut self, map: &str, key: &Value) -> Result<bool, ContractError> {
        self.check_write(map, key, None)?;
        let storage_key = StorageKey::new(self.contract, map, key);
        if self.lookup(&storage_key).is_none() {
            return Ok(false);
        }
        self.changes.remove(storage_key);
        Ok(true)
    }

    fn print(&mut self, value: Value) {
        self.events.push(ContractEvent {
            contract: self.contract.to_string(),
            value,
        });
    }
}

/// Type-check and run one call
///
/// `pending` holds the writes of earlier calls in the same block.
#[allow(clippy::too_many_arguments)]
pub fn execute_call(
    deployed: &DeployedContract,
    function: &str,
    args: &[Value],
    caller: &Address,
    block_height: u64,
    base: &MemoryStorage,
    pending: &Changes,
    mode: CallMode,
) -> Result<CallOutcome, ChainError> {
    let contract_name = deployed.id.to_string();
    let signature =
        deployed
            .contract
            .function(function)
            .ok_or_else(|| ChainError::UnknownFunction {
                contract: contract_name.clone(),
                function: function.to_string(),
            })?;

    if mode == CallMode::ReadOnly && !signature.is_read_only() {
        return Err(ChainError::NotReadOnly {
            contract: contract_name,
            function: function.to_string(),
        });
    }

    if signature.params.len() != args.len() {
        return Err(ChainError::ArgumentCount {
            function: function.to_string(),
            expected: signature.params.len(),
            got: args.len(),
        });
    }

    if let Some((index, param, expected)) = signature.first_mismatch(args) {
        return Err(ChainError::TypeMismatch {
            function: function.to_string(),
            param: param.to_string(),
            expected: expected.to_string(),
            got: args[index].clone(),
        });
    }

    let mut ctx = CallContext {
        caller,
        contract: &deployed.id,
        maps: deployed.contract.maps(),
        block_height,
        read_only: signature.is_read_only(),
        view: LayeredView {
            base,
            layers: vec![pending],
        },
        changes: Changes::new(),
        events: Vec::new(),
    };

    if log::log_enabled!(log::Level::Debug) {
        debug!(
            "Calling {}::{} as {} at height {} ({} args)",
            contract_name,
            function,
            caller,
            block_height,
            args.len()
        );
    }

    let result = deployed
        .contract
        .call(function, args, &mut ctx)
        .map_err(|source| ChainError::Contract {
            contract: contract_name.clone(),
            function: function.to_string(),
            source,
        })?;

    if !signature.is_read_only() && !result.is_response() {
        return Err(ChainError::NonResponse {
            function: function.to_string(),
            value: result,
        });
    }

    let CallContext {
        changes, events, ..
    } = ctx;

    // (err ...) discards everything the call did
    if matches!(result, Value::Response(Err(_))) {
        if log::log_enabled!(log::Level::Debug) {
            debug!(
                "{}::{} returned {}, dropping {} writes",
                contract_name,
                function,
                result,
                changes.len()
            );
        }
        return Ok(CallOutcome {
            result,
            changes: Changes::new(),
            events: Vec::new(),
        });
    }

    Ok(CallOutcome {
        result,
        changes,
        events,
    })
}
