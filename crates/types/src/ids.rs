//! Newtype wrapper for symbol identifiers
//!
//! Cards reference symbols by id; keeping the id in its own type prevents it
//! from being mixed up with font family names or image sources, which are
//! plain strings too.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The identifier of a symbol in a deck's symbol table.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(Arc<str>);

impl SymbolId {
    /// Creates a new SymbolId from a string
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this symbol ID
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SymbolId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for SymbolId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl From<Arc<str>> for SymbolId {
    fn from(s: Arc<str>) -> Self {
        Self(s)
    }
}

impl AsRef<str> for SymbolId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
