use thiserror::Error;

/// Errors that can occur while decoding hashes and addresses
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Invalid hexadecimal string format
    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    /// Hash has invalid length
    #[error("Invalid hash length: {len} bytes, expected: {expected} bytes")]
    InvalidHashLength { len: usize, expected: usize },

    /// Invalid checksum in address
    #[error("Invalid checksum")]
    InvalidChecksum,

    /// Address string is malformed or invalid
    #[error("Invalid address format: {0}")]
    InvalidAddress(String),

    /// Character outside of the c32 alphabet
    #[error("Invalid c32 character: {0:?}")]
    InvalidC32Character(char),

    /// Address version is not a valid c32 digit
    #[error("Invalid address version: {0}")]
    InvalidVersion(u8),
}
