//! Selector types produced by the path compiler

use std::fmt;

/// One step of a compiled path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonSelector {
    /// Named member of an object (`.name`, `['name']`)
    Child(String),
    /// Any element of an array (`item` in prefix syntax)
    ArrayItems,
    /// Any element of an array or any member of an object (`[*]`, `.*`)
    Wildcard,
}

impl fmt::Display for JsonSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonSelector::Child(name) => write!(f, "['{name}']"),
            JsonSelector::ArrayItems | JsonSelector::Wildcard => f.write_str("[*]"),
        }
    }
}
