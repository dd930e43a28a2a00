// Allow some clippy lints for literal-heavy code
#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::result_large_err)]

pub mod config;
pub mod contract;
pub mod crypto;
pub mod types;
pub mod value;

pub use value::{PrincipalData, TypeSignature, Value, ValueParseError};
