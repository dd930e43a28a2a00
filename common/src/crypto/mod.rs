mod address;
mod hash;

pub mod c32;
pub mod error;

pub use address::*;
pub use error::CryptoError;
pub use hash::*;
