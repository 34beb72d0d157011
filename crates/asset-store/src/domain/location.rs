//! Storage location selection.

use std::fmt;

/// Which ledger partition an operation targets.
///
/// A record lives in exactly one location; the location is chosen per call,
/// not stored with the record. Callers must use a consistent location for a
/// given key across its lifetime — a read against the wrong partition
/// reports "does not exist" even though data exists elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageLocation {
    /// The shared world state.
    Public,
    /// A named private-data collection, isolated from the public partition
    /// and from every other collection.
    Private(String),
}

impl StorageLocation {
    /// Construct the private variant from anything string-like.
    pub fn private(collection: impl Into<String>) -> Self {
        Self::Private(collection.into())
    }

    /// The collection name, if this is a private location.
    pub fn collection(&self) -> Option<&str> {
        match self {
            Self::Public => None,
            Self::Private(name) => Some(name),
        }
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Private(name) => write!(f, "private:{name}"),
        }
    }
}
