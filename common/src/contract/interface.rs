use crate::value::{TypeSignature, Value};
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FunctionKind {
    // May write state; must return a response
    Public,
    // Never writes state
    ReadOnly,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FunctionSignature {
    pub name: String,
    pub kind: FunctionKind,
    pub params: Vec<(String, TypeSignature)>,
}

impl FunctionSignature {
    pub fn public<I, S>(name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = (S, TypeSignature)>,
        S: Into<String>,
    {
        Self::new(name, FunctionKind::Public, params)
    }

    pub fn read_only<I, S>(name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = (S, TypeSignature)>,
        S: Into<String>,
    {
        Self::new(name, FunctionKind::ReadOnly, params)
    }

    fn new<I, S>(name: impl Into<String>, kind: FunctionKind, params: I) -> Self
    where
        I: IntoIterator<Item = (S, TypeSignature)>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind,
            params: params.into_iter().map(|(n, t)| (n.into(), t)).collect(),
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.kind == FunctionKind::ReadOnly
    }

    /// Index and declared type of the first argument that does not fit its parameter
    pub fn first_mismatch<'a>(
        &'a self,
        args: &[Value],
    ) -> Option<(usize, &'a str, &'a TypeSignature)> {
        self.params
            .iter()
            .zip(args)
            .enumerate()
            .find(|(_, ((_, t), arg))| !t.admits(arg))
            .map(|(i, ((name, t), _))| (i, name.as_str(), t))
    }
}

/// Declared key and value types of a data map
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MapSignature {
    pub name: String,
    pub key: TypeSignature,
    pub value: TypeSignature,
}

impl MapSignature {
    pub fn new(name: impl Into<String>, key: TypeSignature, value: TypeSignature) -> Self {
        Self {
            name: name.into(),
            key,
            value,
        }
    }
}

impl Display for MapSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(define-map {} {} {})", self.name, self.key, self.value)
    }
}

impl Display for FunctionSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            FunctionKind::Public => "define-public",
            FunctionKind::ReadOnly => "define-read-only",
        };
        write!(f, "({} ({}", kind, self.name)?;
        for (name, t) in &self.params {
            write!(f, " ({} {})", name, t)?;
        }
        write!(f, "))")
    }
}
