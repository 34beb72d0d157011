//! Ledger port (driven side).
//!
//! This is the full operation set the store assumes from the external
//! ledger platform, per transaction context: keyed get/put/delete against
//! the public world state and against named private-data collections,
//! partial-composite-key range scans, and rich-query pass-through.
//!
//! Implementations translate each call to the platform's transaction
//! context. Calls issued in sequence must be applied in that sequence;
//! the store adds no locking, retries, or caching of its own, so
//! check-then-act correctness against concurrent invocations rests on the
//! platform's commit-time conflict detection.

use async_trait::async_trait;

use crate::domain::{CompositeKey, LedgerError};

/// One entry yielded by a range or rich-query cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntry {
    /// The stored key, as reported by the backend.
    pub key: String,
    /// The stored bytes.
    pub value: Vec<u8>,
}

/// A possibly remote, possibly lazily-paged cursor over state entries.
#[async_trait]
pub trait KeyValueCursor: Send {
    /// Advance the cursor. `None` means the cursor is exhausted.
    async fn next_entry(&mut self) -> Result<Option<StateEntry>, LedgerError>;
}

impl std::fmt::Debug for dyn KeyValueCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyValueCursor")
    }
}

/// Boxed cursor handed back by range and rich-query operations.
pub type StateCursor = Box<dyn KeyValueCursor>;

/// Transaction-scoped handle onto the external ledger.
#[async_trait]
pub trait LedgerStub: Send + Sync {
    /// Read a key from the public world state. `None` when absent.
    async fn get_state(&self, key: &CompositeKey) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Write a key to the public world state.
    async fn put_state(&self, key: &CompositeKey, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Remove a key from the public world state.
    async fn delete_state(&self, key: &CompositeKey) -> Result<(), LedgerError>;

    /// Read a key from a named private-data collection.
    async fn get_private_data(
        &self,
        collection: &str,
        key: &CompositeKey,
    ) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Write a key to a named private-data collection.
    async fn put_private_data(
        &self,
        collection: &str,
        key: &CompositeKey,
        value: Vec<u8>,
    ) -> Result<(), LedgerError>;

    /// Remove a key from a named private-data collection.
    async fn delete_private_data(
        &self,
        collection: &str,
        key: &CompositeKey,
    ) -> Result<(), LedgerError>;

    /// Scan the public world state for every key under the partial
    /// composite key (asset type + leading components).
    async fn get_state_by_partial_composite_key(
        &self,
        prefix: &CompositeKey,
    ) -> Result<StateCursor, LedgerError>;

    /// Scan a private-data collection for every key under the partial
    /// composite key.
    async fn get_private_data_by_partial_composite_key(
        &self,
        collection: &str,
        prefix: &CompositeKey,
    ) -> Result<StateCursor, LedgerError>;

    /// Evaluate a backend-native rich query against the public world
    /// state. The expression is pass-through: this layer does not
    /// interpret it.
    async fn get_query_result(&self, query: &str) -> Result<StateCursor, LedgerError>;

    /// Evaluate a backend-native rich query against a private-data
    /// collection.
    async fn get_private_data_query_result(
        &self,
        collection: &str,
        query: &str,
    ) -> Result<StateCursor, LedgerError>;
}
