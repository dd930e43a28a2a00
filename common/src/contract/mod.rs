//! Contract seam
//!
//! The ledger executes contracts only through the [`Contract`] trait, and
//! contracts touch chain state only through [`InvocationContext`]. The
//! ledger crate implements the context; contract crates implement the
//! trait.
//!
//! ```text
//! Common Package
//!     | defines Contract + InvocationContext
//! Contract crates          Ledger Package
//!     implement Contract       implements InvocationContext, runs calls
//! ```

mod context;
mod error;
mod interface;

pub use context::{ContractEvent, InvocationContext};
pub use error::ContractError;
pub use interface::{FunctionKind, FunctionSignature, MapSignature};

use crate::value::Value;

/// A contract the simulated ledger can deploy and call
pub trait Contract: Send + Sync {
    /// Public and read-only functions, in declaration order
    fn functions(&self) -> &[FunctionSignature];

    /// Data maps the contract reads and writes
    fn maps(&self) -> &[MapSignature] {
        &[]
    }

    /// Execute `function` with already type-checked `args`
    ///
    /// Public functions must return a response value. Returning
    /// `(err ...)` makes the ledger discard the call's writes and events.
    fn call(
        &self,
        function: &str,
        args: &[Value],
        ctx: &mut dyn InvocationContext,
    ) -> Result<Value, ContractError>;

    fn function(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions().iter().find(|f| f.name == name)
    }
}
