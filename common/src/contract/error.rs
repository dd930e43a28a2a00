use crate::value::Value;
use thiserror::Error;

/// Runtime errors raised while a contract executes
///
/// These are not `(err ...)` responses: a response is a normal return
/// value, while a `ContractError` aborts the whole block being mined.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("Function '{0}' is not defined")]
    UndefinedFunction(String),

    #[error("Map '{0}' is not defined")]
    UndefinedMap(String),

    #[error("Write to map '{0}' attempted from a read-only context")]
    WriteInReadOnly(String),

    #[error("{value} does not fit map '{map}', expected {expected}")]
    MapTypeMismatch {
        map: String,
        expected: String,
        value: Value,
    },

    #[error("Arithmetic overflow")]
    Overflow,
}
