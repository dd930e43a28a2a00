//! Typed contract values and their canonical literal rendering.
//!
//! Every value renders to exactly one literal (`u1`, `(ok true)`,
//! `(some {owner: ST..., details: "..."})`) and that literal parses back
//! to the same value. Receipts are compared against these literals.

mod parse;
mod principal;
mod signature;

pub use parse::{parse_value, ValueParseError};
pub use principal::{is_valid_contract_name, ContractId, PrincipalData};
pub use signature::TypeSignature;

use crate::crypto::Address;
use indexmap::IndexMap;
use serde::de::Error as SerdeError;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Value {
    UInt(u128),
    Int(i128),
    Bool(bool),
    Ascii(String),
    Principal(PrincipalData),
    Optional(Option<Box<Value>>),
    Response(Result<Box<Value>, Box<Value>>),
    // Fields keep their declaration order
    Tuple(IndexMap<String, Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::UInt(_) => "uint",
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
            Self::Ascii(_) => "string-ascii",
            Self::Principal(_) => "principal",
            Self::Optional(_) => "optional",
            Self::Response(_) => "response",
            Self::Tuple(_) => "tuple",
        }
    }

    pub fn as_uint(&self) -> Option<u128> {
        match self {
            Self::UInt(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i128> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_ascii(&self) -> Option<&str> {
        match self {
            Self::Ascii(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_principal(&self) -> Option<&PrincipalData> {
        match self {
            Self::Principal(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_standard_principal(&self) -> Option<&Address> {
        match self {
            Self::Principal(PrincipalData::Standard(a)) => Some(a),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Tuple(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_optional(&self) -> Option<Option<&Value>> {
        match self {
            Self::Optional(v) => Some(v.as_deref()),
            _ => None,
        }
    }

    pub fn as_response(&self) -> Option<Result<&Value, &Value>> {
        match self {
            Self::Response(Ok(v)) => Some(Ok(v)),
            Self::Response(Err(v)) => Some(Err(v)),
            _ => None,
        }
    }

    pub fn is_response(&self) -> bool {
        matches!(self, Self::Response(_))
    }

    pub fn is_ok_response(&self) -> bool {
        matches!(self, Self::Response(Ok(_)))
    }
}

fn write_ascii_literal(f: &mut Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            '\r' => write!(f, "\\r")?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UInt(n) => write!(f, "u{}", n),
            Self::Int(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Ascii(s) => write_ascii_literal(f, s),
            Self::Principal(p) => write!(f, "{}", p),
            Self::Optional(None) => write!(f, "none"),
            Self::Optional(Some(v)) => write!(f, "(some {})", v),
            Self::Response(Ok(v)) => write!(f, "(ok {})", v),
            Self::Response(Err(v)) => write!(f, "(err {})", v),
            Self::Tuple(fields) => {
                write!(f, "{{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl FromStr for Value {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_value(s)
    }
}

// Receipts are asserted against literal strings
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self.to_string() == *other
    }
}

impl From<Address> for Value {
    fn from(address: Address) -> Self {
        Self::Principal(PrincipalData::Standard(address))
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'a> Deserialize<'a> for Value {
    fn deserialize<D: serde::Deserializer<'a>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        parse_value(&literal).map_err(SerdeError::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types;

    #[test]
    fn test_literals() {
        assert_eq!(types::uint(1), "u1");
        assert_eq!(types::int(-7), "-7");
        assert_eq!(types::ok(types::bool(true)), "(ok true)");
        assert_eq!(types::err(types::uint(100)), "(err u100)");
        assert_eq!(types::none(), "none");
        assert_eq!(types::ascii("say \"hi\""), r#""say \"hi\"""#);
    }

    #[test]
    fn test_tuple_keeps_field_order() {
        let owner = Address::derive_account("wallet_1");
        let value = types::some(types::tuple([
            ("owner", types::principal(owner)),
            ("details", types::ascii("Property 1 details")),
        ]));

        assert_eq!(
            value,
            format!(
                "(some {{owner: {}, details: \"Property 1 details\"}})",
                owner
            )
        );
    }

    #[test]
    fn test_accessors() {
        let value = types::ok(types::uint(5));
        assert!(value.is_ok_response());
        assert_eq!(
            value.as_response().and_then(|r| r.ok()).and_then(Value::as_uint),
            Some(5)
        );
        assert_eq!(types::bool(false).as_uint(), None);
        assert_eq!(types::ascii("x").type_name(), "string-ascii");
    }

    #[test]
    fn test_serde_uses_literal() {
        let value = types::some(types::tuple([("id", types::uint(9))]));
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"(some {id: u9})\"");
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
