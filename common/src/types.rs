//! Typed argument encoders
//!
//! ```
//! use landreg_common::types;
//!
//! let args = vec![types::uint(1), types::ascii("Property 1 details")];
//! assert_eq!(args[0], "u1");
//! assert_eq!(args[1], "\"Property 1 details\"");
//! ```

use crate::value::{PrincipalData, Value};
use indexmap::IndexMap;

pub fn uint(n: u128) -> Value {
    Value::UInt(n)
}

pub fn int(n: i128) -> Value {
    Value::Int(n)
}

pub fn bool(b: bool) -> Value {
    Value::Bool(b)
}

// Length and charset are checked against the parameter's declared bound at call time
pub fn ascii(s: impl Into<String>) -> Value {
    Value::Ascii(s.into())
}

pub fn principal(p: impl Into<PrincipalData>) -> Value {
    Value::Principal(p.into())
}

pub fn some(v: Value) -> Value {
    Value::Optional(Some(Box::new(v)))
}

pub fn none() -> Value {
    Value::Optional(None)
}

pub fn ok(v: Value) -> Value {
    Value::Response(Ok(Box::new(v)))
}

pub fn err(v: Value) -> Value {
    Value::Response(Err(Box::new(v)))
}

pub fn tuple<I, S>(fields: I) -> Value
where
    I: IntoIterator<Item = (S, Value)>,
    S: Into<String>,
{
    Value::Tuple(
        fields
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect::<IndexMap<_, _>>(),
    )
}
