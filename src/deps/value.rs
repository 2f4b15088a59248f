//! Value model of the DEPS dialect.

use std::collections::BTreeMap;
use std::fmt;

/// A string-keyed mapping as produced by a `{...}` literal.
///
/// Ordered by key so that evaluation output is deterministic; the manifest is
/// sorted afterwards anyway.
pub type DepsMap = BTreeMap<String, DepsValue>;

/// A fully evaluated DEPS expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepsValue {
    /// A string, possibly the result of concatenation and `Var(...)` substitution
    Str(String),
    /// An integer literal
    Int(i64),
    /// `True` or `False`
    Bool(bool),
    /// `None`
    None,
    /// A `[...]` literal
    List(Vec<DepsValue>),
    /// A `{...}` literal
    Map(DepsMap),
}

impl DepsValue {
    /// Returns the string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the mapping payload, if this is a mapping.
    #[must_use]
    pub fn as_map(&self) -> Option<&DepsMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Name of the value's type as it appears in diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "str",
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
            Self::None => "NoneType",
            Self::List(_) => "list",
            Self::Map(_) => "dict",
        }
    }
}

impl From<&str> for DepsValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for DepsValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl fmt::Display for DepsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "'{s}'"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::None => f.write_str("None"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{key}': {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}
