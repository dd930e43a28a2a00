// File: testing-framework/src/utilities/assertions.rs
//
// Receipt Assertions
//
// Each helper returns `anyhow::Result` so a test body can chain them with
// `?`. Failures name the expected shape and print the actual literal.

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use landreg_common::{crypto::Address, Value};
use landreg_ledger::{Block, Receipt};

/// Shape checks on a contract result value
///
/// ```rust
/// use landreg_testing_framework::prelude::*;
///
/// # fn main() -> anyhow::Result<()> {
/// let result = types::ok(types::bool(true));
/// result.expect_ok()?.expect_bool(true)?;
/// # Ok(())
/// # }
/// ```
pub trait ValueAssertions {
    /// Unwrap `(ok v)`
    fn expect_ok(&self) -> Result<&Value>;

    /// Unwrap `(err v)`
    fn expect_err(&self) -> Result<&Value>;

    /// Unwrap `(some v)`
    fn expect_some(&self) -> Result<&Value>;

    /// Require `none`
    fn expect_none(&self) -> Result<()>;

    /// Require a bool equal to `expected`
    fn expect_bool(&self, expected: bool) -> Result<()>;

    /// Require a uint equal to `expected`
    fn expect_uint(&self, expected: u128) -> Result<()>;

    /// Require an int equal to `expected`
    fn expect_int(&self, expected: i128) -> Result<()>;

    /// Require an ASCII string equal to `expected`
    fn expect_ascii(&self, expected: &str) -> Result<()>;

    /// Require a standard principal equal to `expected`
    fn expect_principal(&self, expected: &Address) -> Result<()>;

    /// Unwrap a tuple into its fields
    fn expect_tuple(&self) -> Result<&IndexMap<String, Value>>;

    /// Require the literal rendering to equal `expected`
    fn expect_literal(&self, expected: &str) -> Result<()>;
}

fn mismatch<T>(expected: &str, actual: &Value) -> Result<T> {
    bail!("Expected {}, got {}", expected, actual)
}

impl ValueAssertions for Value {
    fn expect_ok(&self) -> Result<&Value> {
        match self.as_response() {
            Some(Ok(inner)) => Ok(inner),
            _ => mismatch("(ok ...)", self),
        }
    }

    fn expect_err(&self) -> Result<&Value> {
        match self.as_response() {
            Some(Err(inner)) => Ok(inner),
            _ => mismatch("(err ...)", self),
        }
    }

    fn expect_some(&self) -> Result<&Value> {
        match self.as_optional() {
            Some(Some(inner)) => Ok(inner),
            _ => mismatch("(some ...)", self),
        }
    }

    fn expect_none(&self) -> Result<()> {
        match self.as_optional() {
            Some(None) => Ok(()),
            _ => mismatch("none", self),
        }
    }

    fn expect_bool(&self, expected: bool) -> Result<()> {
        match self.as_bool() {
            Some(b) if b == expected => Ok(()),
            _ => mismatch(&expected.to_string(), self),
        }
    }

    fn expect_uint(&self, expected: u128) -> Result<()> {
        match self.as_uint() {
            Some(n) if n == expected => Ok(()),
            _ => mismatch(&format!("u{}", expected), self),
        }
    }

    fn expect_int(&self, expected: i128) -> Result<()> {
        match self.as_int() {
            Some(n) if n == expected => Ok(()),
            _ => mismatch(&expected.to_string(), self),
        }
    }

    fn expect_ascii(&self, expected: &str) -> Result<()> {
        match self.as_ascii() {
            Some(s) if s == expected => Ok(()),
            _ => mismatch(&format!("{:?}", expected), self),
        }
    }

    fn expect_principal(&self, expected: &Address) -> Result<()> {
        match self.as_standard_principal() {
            Some(address) if address == expected => Ok(()),
            _ => mismatch(&expected.to_string(), self),
        }
    }

    fn expect_tuple(&self) -> Result<&IndexMap<String, Value>> {
        match self.as_tuple() {
            Some(fields) => Ok(fields),
            None => mismatch("a tuple", self),
        }
    }

    fn expect_literal(&self, expected: &str) -> Result<()> {
        if self != expected {
            return mismatch(expected, self);
        }
        Ok(())
    }
}

/// Checks on a mined block
pub trait BlockAssertions {
    /// Require the block to sit at `height`
    fn expect_height(&self, height: u64) -> Result<&Self>;

    /// Require exactly `count` receipts
    fn expect_receipt_count(&self, count: usize) -> Result<&Self>;

    /// Receipt at `index`
    fn receipt(&self, index: usize) -> Result<&Receipt>;
}

impl BlockAssertions for Block {
    fn expect_height(&self, height: u64) -> Result<&Self> {
        if self.height != height {
            bail!("Expected block height {}, got {}", height, self.height);
        }
        Ok(self)
    }

    fn expect_receipt_count(&self, count: usize) -> Result<&Self> {
        if self.receipts.len() != count {
            bail!(
                "Expected {} receipts in block {}, got {}",
                count,
                self.height,
                self.receipts.len()
            );
        }
        Ok(self)
    }

    fn receipt(&self, index: usize) -> Result<&Receipt> {
        self.receipts.get(index).with_context(|| {
            format!(
                "Block {} has no receipt #{} ({} receipts)",
                self.height,
                index,
                self.receipts.len()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landreg_common::{crypto::Hash, types};

    #[test]
    fn test_response_and_optional() {
        let ok = types::ok(types::bool(true));
        ok.expect_ok().unwrap().expect_bool(true).unwrap();
        assert!(ok.expect_err().is_err());

        let err = types::err(types::uint(100));
        err.expect_err().unwrap().expect_uint(100).unwrap();

        types::none().expect_none().unwrap();
        let some = types::some(types::int(-3));
        some.expect_some().unwrap().expect_int(-3).unwrap();
        assert!(some.expect_none().is_err());
    }

    #[test]
    fn test_tuple_fields() {
        let owner = Address::derive_account("wallet_1");
        let value = types::some(types::tuple([
            ("owner", types::principal(owner)),
            ("details", types::ascii("Property 1 details")),
        ]));

        let fields = value.expect_some().unwrap().expect_tuple().unwrap();
        fields["owner"].expect_principal(&owner).unwrap();
        fields["details"].expect_ascii("Property 1 details").unwrap();
        assert!(fields["details"].expect_ascii("other").is_err());
    }

    #[test]
    fn test_mismatch_message() {
        let err = types::uint(7).expect_uint(8).unwrap_err();
        assert_eq!(err.to_string(), "Expected u8, got u7");

        let err = types::none().expect_literal("(ok true)").unwrap_err();
        assert_eq!(err.to_string(), "Expected (ok true), got none");
    }

    #[test]
    fn test_block_checks() {
        let block = Block::new(2, Hash::zero(), Vec::new());
        block.expect_height(2).unwrap().expect_receipt_count(0).unwrap();
        assert!(block.expect_height(3).is_err());
        assert!(block.receipt(0).is_err());
    }
}
