pub mod block;
pub mod chain;
pub mod error;
pub mod executor;
pub mod storage;
pub mod transaction;
