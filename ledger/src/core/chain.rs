use super::{
    block::{Block, Receipt},
    error::ChainError,
    executor::{execute_call, CallMode},
    storage::{Changes, MemoryStorage, StorageKey},
    transaction::{Transaction, TransactionPayload},
};
use indexmap::IndexMap;
use landreg_common::{
    config::GENESIS_HEIGHT,
    contract::{Contract, FunctionSignature},
    crypto::{Address, Hash},
    value::{is_valid_contract_name, ContractId},
    Value,
};
use log::{debug, info};
use std::collections::HashMap;

/// A contract instance deployed on the chain
pub struct DeployedContract {
    pub id: ContractId,
    pub contract: Box<dyn Contract>,
    pub deployed_at: u64,
}

/// In-process simulated chain
///
/// Starts with a genesis block at height 1. Every call to
/// [`Chain::mine_block`] appends exactly one block and applies its
/// transactions in submission order.
pub struct Chain {
    blocks: Vec<Block>,
    // Keyed by fully qualified id
    contracts: IndexMap<String, DeployedContract>,
    storage: MemoryStorage,
    nonces: HashMap<Address, u64>,
}

impl Chain {
    pub fn new() -> Self {
        let genesis = Block::new(GENESIS_HEIGHT, Hash::zero(), Vec::new());
        if log::log_enabled!(log::Level::Debug) {
            debug!("Genesis block {} at height {}", genesis.hash, genesis.height);
        }

        Self {
            blocks: vec![genesis],
            contracts: IndexMap::new(),
            storage: MemoryStorage::new(),
            nonces: HashMap::new(),
        }
    }

    pub fn block_height(&self) -> u64 {
        self.tip().height
    }

    pub fn tip(&self) -> &Block {
        // blocks always holds at least the genesis block
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn get_block(&self, height: u64) -> Option<&Block> {
        let index = height.checked_sub(GENESIS_HEIGHT)?;
        self.blocks.get(usize::try_from(index).ok()?)
    }

    /// Number of transactions already included for `address`
    pub fn nonce(&self, address: &Address) -> u64 {
        self.nonces.get(address).copied().unwrap_or(0)
    }

    pub fn deploy_contract(
        &mut self,
        name: &str,
        contract: Box<dyn Contract>,
        deployer: &Address,
    ) -> Result<ContractId, ChainError> {
        if !is_valid_contract_name(name) {
            return Err(ChainError::InvalidContractName(name.to_string()));
        }

        check_signature_limits(name, contract.as_ref())?;

        let id = ContractId::new(*deployer, name);
        let key = id.to_string();
        if self.contracts.contains_key(&key) {
            return Err(ChainError::DuplicateContract(key));
        }

        if log::log_enabled!(log::Level::Info) {
            info!(
                "Deployed contract {} ({} functions)",
                key,
                contract.functions().len()
            );
        }

        self.contracts.insert(
            key,
            DeployedContract {
                id: id.clone(),
                contract,
                deployed_at: self.block_height(),
            },
        );
        Ok(id)
    }

    pub fn contracts(&self) -> impl Iterator<Item = &DeployedContract> {
        self.contracts.values()
    }

    /// Resolve a bare name or a fully qualified `<issuer>.<name>` id
    ///
    /// Bare names resolve to the first contract deployed under that name.
    pub fn resolve_contract(&self, contract: &str) -> Result<&DeployedContract, ChainError> {
        self.contracts
            .get(contract)
            .or_else(|| self.contracts.values().find(|c| c.id.name == contract))
            .ok_or_else(|| ChainError::UnknownContract(contract.to_string()))
    }

    pub fn contract_interface(
        &self,
        contract: &str,
    ) -> Result<&[FunctionSignature], ChainError> {
        Ok(self.resolve_contract(contract)?.contract.functions())
    }

    /// Committed value of one map entry
    pub fn map_entry(
        &self,
        contract: &str,
        map: &str,
        key: &Value,
    ) -> Result<Option<&Value>, ChainError> {
        let deployed = self.resolve_contract(contract)?;
        Ok(self.storage.get(&StorageKey::new(&deployed.id, map, key)))
    }

    /// Number of committed entries across all contracts
    pub fn storage_size(&self) -> usize {
        self.storage.len()
    }

    /// Apply `txs` in order and append the resulting block
    ///
    /// Fails without touching the chain if any transaction hits a runtime
    /// error. `(err ...)` responses are not runtime errors: they produce a
    /// receipt whose writes are dropped.
    pub fn mine_block(&mut self, txs: Vec<Transaction>) -> Result<Block, ChainError> {
        let height = self.block_height() + 1;
        let mut pending = Changes::new();
        let mut nonces: HashMap<Address, u64> = HashMap::new();
        let mut receipts = Vec::with_capacity(txs.len());

        for (index, tx) in txs.into_iter().enumerate() {
            let receipt = self
                .apply_transaction(tx, height, &mut pending, &mut nonces)
                .map_err(|source| ChainError::TxFailed {
                    index,
                    source: Box::new(source),
                })?;
            receipts.push(receipt);
        }

        self.storage.apply(pending);
        self.nonces.extend(nonces);

        let block = Block::new(height, self.tip().hash.clone(), receipts);
        if log::log_enabled!(log::Level::Info) {
            info!(
                "Mined block {} at height {} with {} receipts",
                block.hash,
                block.height,
                block.receipts.len()
            );
        }
        self.blocks.push(block.clone());
        Ok(block)
    }

    pub fn mine_empty_block(&mut self) -> Block {
        let height = self.block_height() + 1;
        let block = Block::new(height, self.tip().hash.clone(), Vec::new());
        if log::log_enabled!(log::Level::Debug) {
            debug!("Mined empty block at height {}", height);
        }
        self.blocks.push(block.clone());
        block
    }

    /// Mine empty blocks until the tip reaches `height`
    pub fn mine_empty_block_until(&mut self, height: u64) -> Result<Block, ChainError> {
        let current = self.block_height();
        if height <= current {
            return Err(ChainError::HeightInPast {
                target: height,
                current,
            });
        }

        while self.block_height() < height {
            self.mine_empty_block();
        }
        Ok(self.tip().clone())
    }

    /// Evaluate a read-only function against committed state without mining
    pub fn call_read_only(
        &self,
        contract: &str,
        function: &str,
        args: Vec<Value>,
        sender: &Address,
    ) -> Result<Value, ChainError> {
        let deployed = self.resolve_contract(contract)?;
        let pending = Changes::new();
        let outcome = execute_call(
            deployed,
            function,
            &args,
            sender,
            self.block_height(),
            &self.storage,
            &pending,
            CallMode::ReadOnly,
        )?;
        Ok(outcome.result)
    }

    fn apply_transaction(
        &self,
        tx: Transaction,
        height: u64,
        pending: &mut Changes,
        nonces: &mut HashMap<Address, u64>,
    ) -> Result<Receipt, ChainError> {
        let nonce = nonces
            .get(&tx.sender)
            .copied()
            .unwrap_or_else(|| self.nonce(&tx.sender));
        let tx_id = tx.hash(nonce);
        let Transaction { sender, payload } = tx;

        let receipt = match payload {
            TransactionPayload::ContractCall {
                contract,
                function,
                args,
            } => {
                let deployed = self.resolve_contract(&contract)?;
                let outcome = execute_call(
                    deployed,
                    &function,
                    &args,
                    &sender,
                    height,
                    &self.storage,
                    pending,
                    CallMode::Transaction,
                )?;
                pending.merge(outcome.changes);

                Receipt {
                    tx_id,
                    sender,
                    nonce,
                    contract: deployed.id.to_string(),
                    function,
                    result: outcome.result,
                    events: outcome.events,
                }
            }
        };

        if log::log_enabled!(log::Level::Debug) {
            debug!(
                "Tx {} from {} (nonce {}) -> {}",
                receipt.tx_id, receipt.sender, receipt.nonce, receipt.result
            );
        }

        nonces.insert(sender, nonce + 1);
        Ok(receipt)
    }
}

fn check_signature_limits(name: &str, contract: &dyn Contract) -> Result<(), ChainError> {
    let params = contract.functions().iter().flat_map(|f| {
        f.params
            .iter()
            .map(move |(param, t)| (format!("{}.{}", f.name, param), t))
    });
    let maps = contract.maps().iter().flat_map(|m| {
        [
            (format!("{} key", m.name), &m.key),
            (format!("{} value", m.name), &m.value),
        ]
    });

    for (item, signature) in params.chain(maps) {
        if !signature.within_limits() {
            return Err(ChainError::SignatureTooLarge {
                contract: name.to_string(),
                item,
                signature: signature.to_string(),
            });
        }
    }
    Ok(())
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landreg_common::{
        contract::{ContractError, InvocationContext, MapSignature},
        types,
        value::TypeSignature,
    };

    // Counter keyed by caller: `increment` adds one, `fail` writes then errs,
    // `broken` returns a non-response, `reset` deletes, `get` reads.
    struct Counter {
        functions: Vec<FunctionSignature>,
        maps: Vec<MapSignature>,
    }

    fn no_params() -> Vec<(String, TypeSignature)> {
        Vec::new()
    }

    impl Counter {
        fn new() -> Self {
            Self {
                functions: vec![
                    FunctionSignature::public("increment", no_params()),
                    FunctionSignature::public("fail", no_params()),
                    FunctionSignature::public("broken", no_params()),
                    FunctionSignature::read_only("get", [("who", TypeSignature::Principal)]),
                    FunctionSignature::read_only("sneaky", no_params()),
                    FunctionSignature::public("reset", no_params()),
                    FunctionSignature::read_only("sneaky-reset", no_params()),
                ],
                maps: vec![MapSignature::new(
                    "counts",
                    TypeSignature::Principal,
                    TypeSignature::UInt,
                )],
            }
        }

        fn current(ctx: &dyn InvocationContext, who: &Value) -> Result<u128, ContractError> {
            Ok(ctx
                .map_get("counts", who)?
                .and_then(|v| v.as_uint())
                .unwrap_or(0))
        }
    }

    impl Contract for Counter {
        fn functions(&self) -> &[FunctionSignature] {
            &self.functions
        }

        fn maps(&self) -> &[MapSignature] {
            &self.maps
        }

        fn call(
            &self,
            function: &str,
            args: &[Value],
            ctx: &mut dyn InvocationContext,
        ) -> Result<Value, ContractError> {
            let caller = types::principal(*ctx.caller());
            match function {
                "increment" => {
                    let next = Self::current(ctx, &caller)?
                        .checked_add(1)
                        .ok_or(ContractError::Overflow)?;
                    ctx.map_set("counts", caller, types::uint(next))?;
                    ctx.print(types::uint(next));
                    Ok(types::ok(types::uint(next)))
                }
                "fail" => {
                    ctx.map_set("counts", caller, types::uint(1000))?;
                    ctx.print(types::ascii("lost"));
                    Ok(types::err(types::uint(1)))
                }
                "broken" => Ok(types::bool(true)),
                "get" => Ok(types::uint(Self::current(ctx, &args[0])?)),
                "reset" => {
                    let removed = ctx.map_delete("counts", &caller)?;
                    Ok(types::ok(types::bool(removed)))
                }
                "sneaky-reset" => Ok(types::bool(ctx.map_delete("counts", &caller)?)),
                "sneaky" => {
                    ctx.map_set("counts", caller, types::uint(7))?;
                    Ok(types::bool(true))
                }
                other => Err(ContractError::UndefinedFunction(other.to_string())),
            }
        }
    }

    fn setup() -> (Chain, Address, Address) {
        let _ = env_logger::builder().is_test(true).try_init();
        let deployer = Address::derive_account("deployer");
        let user = Address::derive_account("wallet_1");
        let mut chain = Chain::new();
        chain
            .deploy_contract("counter", Box::new(Counter::new()), &deployer)
            .unwrap();
        (chain, deployer, user)
    }

    fn call(function: &str, args: Vec<Value>, sender: &Address) -> Transaction {
        Transaction::contract_call("counter", function, args, sender)
    }

    #[test]
    fn test_genesis_height() {
        let chain = Chain::new();
        assert_eq!(chain.block_height(), GENESIS_HEIGHT);
        assert_eq!(chain.blocks().len(), 1);
        assert!(chain.get_block(0).is_none());
        assert_eq!(chain.get_block(1).map(|b| b.height), Some(1));
    }

    #[test]
    fn test_heights_increment_by_one() {
        let (mut chain, _, user) = setup();
        let block = chain.mine_block(vec![call("increment", vec![], &user)]).unwrap();
        assert_eq!(block.height, 2);
        assert_eq!(block.receipts.len(), 1);
        assert_eq!(block.receipts[0].result, "(ok u1)");

        let block = chain.mine_empty_block();
        assert_eq!(block.height, 3);
        assert!(block.is_empty());
        assert_eq!(chain.get_block(2).unwrap().parent, chain.get_block(1).unwrap().hash);
    }

    #[test]
    fn test_receipts_follow_submission_order_and_see_earlier_writes() {
        let (mut chain, _, user) = setup();
        let block = chain
            .mine_block(vec![
                call("increment", vec![], &user),
                call("increment", vec![], &user),
                call("get", vec![types::principal(user)], &user),
            ])
            .unwrap();

        let results: Vec<String> = block.receipts.iter().map(|r| r.result.to_string()).collect();
        assert_eq!(results, vec!["(ok u1)", "(ok u2)", "u2"]);
        let nonces: Vec<u64> = block.receipts.iter().map(|r| r.nonce).collect();
        assert_eq!(nonces, vec![0, 1, 2]);
        assert_eq!(chain.nonce(&user), 3);
    }

    #[test]
    fn test_err_response_discards_writes_and_events() {
        let (mut chain, _, user) = setup();
        let block = chain.mine_block(vec![call("fail", vec![], &user)]).unwrap();

        let receipt = &block.receipts[0];
        assert_eq!(receipt.result, "(err u1)");
        assert!(!receipt.is_committed());
        assert!(receipt.events.is_empty());
        assert_eq!(
            chain
                .map_entry("counter", "counts", &types::principal(user))
                .unwrap(),
            None
        );
        // The nonce is still consumed
        assert_eq!(chain.nonce(&user), 1);
    }

    #[test]
    fn test_runtime_error_aborts_whole_block() {
        let (mut chain, _, user) = setup();
        let err = chain
            .mine_block(vec![
                call("increment", vec![], &user),
                call("broken", vec![], &user),
            ])
            .unwrap_err();

        assert!(matches!(
            err,
            ChainError::TxFailed { index: 1, ref source }
                if matches!(**source, ChainError::NonResponse { .. })
        ));
        assert_eq!(chain.block_height(), 1);
        assert_eq!(chain.nonce(&user), 0);
        assert_eq!(chain.storage_size(), 0);
    }

    #[test]
    fn test_argument_checks() {
        let (mut chain, _, user) = setup();

        let err = chain
            .mine_block(vec![call("get", vec![], &user)])
            .unwrap_err();
        assert!(err.to_string().contains("expects 1 arguments, got 0"));

        let err = chain
            .mine_block(vec![call("get", vec![types::uint(1)], &user)])
            .unwrap_err();
        assert!(matches!(
            err,
            ChainError::TxFailed { ref source, .. }
                if matches!(**source, ChainError::TypeMismatch { .. })
        ));

        let err = chain
            .mine_block(vec![call("missing", vec![], &user)])
            .unwrap_err();
        assert!(matches!(
            err,
            ChainError::TxFailed { ref source, .. }
                if matches!(**source, ChainError::UnknownFunction { .. })
        ));

        let err = chain
            .mine_block(vec![Transaction::contract_call("nope", "get", vec![], &user)])
            .unwrap_err();
        assert!(matches!(
            err,
            ChainError::TxFailed { ref source, .. }
                if matches!(**source, ChainError::UnknownContract(_))
        ));
    }

    #[test]
    fn test_read_only_functions_cannot_write() {
        let (mut chain, _, user) = setup();
        let err = chain
            .mine_block(vec![call("sneaky", vec![], &user)])
            .unwrap_err();
        assert!(matches!(
            err,
            ChainError::TxFailed { ref source, .. }
                if matches!(
                    **source,
                    ChainError::Contract { source: ContractError::WriteInReadOnly(_), .. }
                )
        ));
    }

    #[test]
    fn test_call_read_only() {
        let (mut chain, _, user) = setup();
        chain.mine_block(vec![call("increment", vec![], &user)]).unwrap();

        let value = chain
            .call_read_only("counter", "get", vec![types::principal(user)], &user)
            .unwrap();
        assert_eq!(value, "u1");
        // No block is mined for read-only calls
        assert_eq!(chain.block_height(), 2);

        let err = chain
            .call_read_only("counter", "increment", vec![], &user)
            .unwrap_err();
        assert!(matches!(err, ChainError::NotReadOnly { .. }));
    }

    #[test]
    fn test_deploy_rules() {
        let (mut chain, deployer, _) = setup();
        let err = chain
            .deploy_contract("counter", Box::new(Counter::new()), &deployer)
            .err()
            .unwrap();
        assert!(matches!(err, ChainError::DuplicateContract(_)));

        let err = chain
            .deploy_contract("bad name", Box::new(Counter::new()), &deployer)
            .err()
            .unwrap();
        assert!(matches!(err, ChainError::InvalidContractName(_)));

        let qualified = format!("{}.counter", deployer);
        assert!(chain.resolve_contract(&qualified).is_ok());
        assert_eq!(chain.contract_interface("counter").unwrap().len(), 7);
    }

    #[test]
    fn test_mine_empty_block_until() {
        let (mut chain, _, _) = setup();
        let tip = chain.mine_empty_block_until(10).unwrap();
        assert_eq!(tip.height, 10);
        assert_eq!(chain.blocks().len(), 10);

        let err = chain.mine_empty_block_until(5).unwrap_err();
        assert_eq!(
            err,
            ChainError::HeightInPast {
                target: 5,
                current: 10
            }
        );
    }

    #[test]
    fn test_map_delete_persists_across_blocks() {
        let (mut chain, _, user) = setup();
        let key = types::principal(user);
        chain
            .mine_block(vec![call("increment", vec![], &user)])
            .unwrap();
        assert!(chain.map_entry("counter", "counts", &key).unwrap().is_some());

        // the second call sees the first one's delete through the pending layer
        let block = chain
            .mine_block(vec![
                call("reset", vec![], &user),
                call("reset", vec![], &user),
            ])
            .unwrap();
        assert_eq!(block.receipts[0].result, "(ok true)");
        assert_eq!(block.receipts[1].result, "(ok false)");
        assert_eq!(chain.map_entry("counter", "counts", &key).unwrap(), None);
        assert_eq!(chain.storage_size(), 0);

        let block = chain.mine_block(vec![call("reset", vec![], &user)]).unwrap();
        assert_eq!(block.receipts[0].result, "(ok false)");

        let value = chain
            .call_read_only("counter", "get", vec![key], &user)
            .unwrap();
        assert_eq!(value, "u0");
    }

    #[test]
    fn test_read_only_functions_cannot_delete() {
        let (mut chain, _, user) = setup();
        chain
            .mine_block(vec![call("increment", vec![], &user)])
            .unwrap();

        let err = chain
            .call_read_only("counter", "sneaky-reset", vec![], &user)
            .unwrap_err();
        assert!(matches!(
            err,
            ChainError::Contract { source: ContractError::WriteInReadOnly(_), .. }
        ));
        assert_eq!(chain.storage_size(), 1);
    }

    struct Oversized {
        functions: Vec<FunctionSignature>,
    }

    impl Contract for Oversized {
        fn functions(&self) -> &[FunctionSignature] {
            &self.functions
        }

        fn call(
            &self,
            _function: &str,
            _args: &[Value],
            _ctx: &mut dyn InvocationContext,
        ) -> Result<Value, ContractError> {
            Ok(types::ok(types::bool(true)))
        }
    }

    #[test]
    fn test_deploy_rejects_oversized_ascii() {
        use landreg_common::config::MAX_ASCII_LEN;

        let (mut chain, deployer, _) = setup();
        let oversized = Oversized {
            functions: vec![FunctionSignature::public(
                "store",
                [("memo", TypeSignature::optional(TypeSignature::Ascii(MAX_ASCII_LEN + 1)))],
            )],
        };
        let err = chain
            .deploy_contract("oversized", Box::new(oversized), &deployer)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ChainError::SignatureTooLarge { ref item, .. } if item == "store.memo"
        ));
        assert!(chain.resolve_contract("oversized").is_err());

        let at_limit = Oversized {
            functions: vec![FunctionSignature::public(
                "store",
                [("memo", TypeSignature::Ascii(MAX_ASCII_LEN))],
            )],
        };
        assert!(chain
            .deploy_contract("at-limit", Box::new(at_limit), &deployer)
            .is_ok());
    }
}
