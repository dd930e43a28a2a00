use landreg_common::{contract::ContractError, Value};
use thiserror::Error;

/// Runtime failures of the simulated ledger
///
/// Any of these raised while mining aborts the whole block: height,
/// nonces and contract state stay as they were.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("Contract '{0}' is not deployed")]
    UnknownContract(String),

    #[error("Contract '{0}' is already deployed")]
    DuplicateContract(String),

    #[error("Invalid contract name '{0}'")]
    InvalidContractName(String),

    #[error("Contract '{contract}' declares '{item}' as {signature}, which exceeds the type size limit")]
    SignatureTooLarge {
        contract: String,
        item: String,
        signature: String,
    },

    #[error("Function '{function}' is not defined in contract '{contract}'")]
    UnknownFunction { contract: String, function: String },

    #[error("Function '{function}' expects {expected} arguments, got {got}")]
    ArgumentCount {
        function: String,
        expected: usize,
        got: usize,
    },

    #[error("Argument '{param}' of '{function}' expects {expected}, got {got}")]
    TypeMismatch {
        function: String,
        param: String,
        expected: String,
        got: Value,
    },

    #[error("Function '{function}' of '{contract}' is not read-only")]
    NotReadOnly { contract: String, function: String },

    #[error("Public function '{function}' returned {value}, expected a response")]
    NonResponse { function: String, value: Value },

    #[error("Contract '{contract}' failed in '{function}': {source}")]
    Contract {
        contract: String,
        function: String,
        #[source]
        source: ContractError,
    },

    #[error("Transaction {index} failed: {source}")]
    TxFailed {
        index: usize,
        #[source]
        source: Box<ChainError>,
    },

    #[error("Cannot mine up to height {target}, chain is already at {current}")]
    HeightInPast { target: u64, current: u64 },
}
