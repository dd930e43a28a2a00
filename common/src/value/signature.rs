use super::Value;
use crate::config::MAX_ASCII_LEN;
use std::fmt::{self, Display, Formatter};

/// Declared type of a function parameter or stored value
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TypeSignature {
    UInt,
    Int,
    Bool,
    // (string-ascii N)
    Ascii(u32),
    Principal,
    Optional(Box<TypeSignature>),
    Response(Box<TypeSignature>, Box<TypeSignature>),
    Tuple(Vec<(String, TypeSignature)>),
}

impl TypeSignature {
    pub fn optional(inner: TypeSignature) -> Self {
        Self::Optional(Box::new(inner))
    }

    pub fn response(ok: TypeSignature, err: TypeSignature) -> Self {
        Self::Response(Box::new(ok), Box::new(err))
    }

    pub fn tuple<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, TypeSignature)>,
        S: Into<String>,
    {
        Self::Tuple(fields.into_iter().map(|(n, t)| (n.into(), t)).collect())
    }

    /// Whether every `(string-ascii N)` inside stays within `MAX_ASCII_LEN`
    pub fn within_limits(&self) -> bool {
        match self {
            Self::Ascii(len) => *len <= MAX_ASCII_LEN,
            Self::Optional(inner) => inner.within_limits(),
            Self::Response(ok, err) => ok.within_limits() && err.within_limits(),
            Self::Tuple(fields) => fields.iter().all(|(_, t)| t.within_limits()),
            _ => true,
        }
    }

    /// Check whether `value` is a member of this type
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::UInt, Value::UInt(_))
            | (Self::Int, Value::Int(_))
            | (Self::Bool, Value::Bool(_))
            | (Self::Principal, Value::Principal(_)) => true,
            (Self::Ascii(max), Value::Ascii(s)) => s.is_ascii() && s.len() <= *max as usize,
            (Self::Optional(inner), Value::Optional(v)) => {
                v.as_deref().map_or(true, |v| inner.admits(v))
            }
            (Self::Response(ok, err), Value::Response(r)) => match r {
                Ok(v) => ok.admits(v),
                Err(v) => err.admits(v),
            },
            (Self::Tuple(fields), Value::Tuple(map)) => {
                fields.len() == map.len()
                    && fields
                        .iter()
                        .all(|(name, t)| map.get(name).is_some_and(|v| t.admits(v)))
            }
            _ => false,
        }
    }
}

impl Display for TypeSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UInt => write!(f, "uint"),
            Self::Int => write!(f, "int"),
            Self::Bool => write!(f, "bool"),
            Self::Ascii(len) => write!(f, "(string-ascii {})", len),
            Self::Principal => write!(f, "principal"),
            Self::Optional(inner) => write!(f, "(optional {})", inner),
            Self::Response(ok, err) => write!(f, "(response {} {})", ok, err),
            Self::Tuple(fields) => {
                write!(f, "(tuple")?;
                for (name, t) in fields {
                    write!(f, " ({} {})", name, t)?;
                }
                write!(f, ")")
            }
        }
    }
}
