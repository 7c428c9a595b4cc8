use std::collections::BTreeMap;
use std::fmt;

/// A property value as it appears on a rendered component.
///
/// This is the unit of data flowing between the node registry, the property
/// editors, and the patch emitter.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Str(String),
    Number(f64),
    Bool(bool),
}

impl PropertyValue {
    /// Get the string content if this is a `Str` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the numeric content if this is a `Number` value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the boolean content if this is a `Bool` value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Str(s) => write!(f, "{}", s),
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Str(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Str(s)
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        PropertyValue::Number(n)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

/// The composite value of a node: property key to value.
///
/// A `BTreeMap` keeps the key order deterministic, which in turn keeps the
/// diff output order deterministic.
pub type CompositeValue = BTreeMap<String, PropertyValue>;
