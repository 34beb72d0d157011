//! In-memory ledger stub.
//!
//! Stands in for the external ledger platform in tests. The public
//! partition and each private collection are ordered maps, so range scans
//! iterate in lexicographic key order the way the real backend's cursors
//! do. Production deployments implement [`LedgerStub`] over the platform's
//! transaction context instead.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{CompositeKey, LedgerError};
use crate::ports::{KeyValueCursor, LedgerStub, StateCursor, StateEntry};

type PartitionMap = BTreeMap<String, Vec<u8>>;

/// In-memory implementation of [`LedgerStub`] for testing.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    public: RwLock<PartitionMap>,
    private: RwLock<HashMap<String, PartitionMap>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_poisoned() -> LedgerError {
        LedgerError::Backend("lock poisoned".to_string())
    }
}

/// Cursor over a snapshot taken at query time.
struct SnapshotCursor {
    entries: std::vec::IntoIter<StateEntry>,
}

impl SnapshotCursor {
    fn new(entries: Vec<StateEntry>) -> StateCursor {
        Box::new(Self {
            entries: entries.into_iter(),
        })
    }
}

#[async_trait]
impl KeyValueCursor for SnapshotCursor {
    async fn next_entry(&mut self) -> Result<Option<StateEntry>, LedgerError> {
        Ok(self.entries.next())
    }
}

fn scan_prefix(partition: &PartitionMap, prefix: &CompositeKey) -> Vec<StateEntry> {
    partition
        .range(prefix.as_str().to_string()..)
        .take_while(|(key, _)| prefix.covers(key))
        .map(|(key, value)| StateEntry {
            key: key.clone(),
            value: value.clone(),
        })
        .collect()
}

/// Minimal rich-query evaluator: the `{"selector": {field: value, ...}}`
/// equality subset of the backend's query language. Enough to exercise the
/// pass-through and aggregation contracts in tests.
fn run_selector(partition: &PartitionMap, query: &str) -> Result<Vec<StateEntry>, LedgerError> {
    let parsed: Value = serde_json::from_str(query)
        .map_err(|e| LedgerError::MalformedQuery(e.to_string()))?;
    let selector = parsed
        .get("selector")
        .and_then(Value::as_object)
        .ok_or_else(|| LedgerError::MalformedQuery("missing selector object".to_string()))?;

    let mut matches = Vec::new();
    for (key, value) in partition {
        let Ok(record) = serde_json::from_slice::<Value>(value) else {
            continue;
        };
        let hit = selector
            .iter()
            .all(|(field, expected)| record.get(field) == Some(expected));
        if hit {
            matches.push(StateEntry {
                key: key.clone(),
                value: value.clone(),
            });
        }
    }
    Ok(matches)
}

#[async_trait]
impl LedgerStub for InMemoryLedger {
    async fn get_state(&self, key: &CompositeKey) -> Result<Option<Vec<u8>>, LedgerError> {
        let public = self.public.read().map_err(|_| Self::lock_poisoned())?;
        Ok(public.get(key.as_str()).cloned())
    }

    async fn put_state(&self, key: &CompositeKey, value: Vec<u8>) -> Result<(), LedgerError> {
        let mut public = self.public.write().map_err(|_| Self::lock_poisoned())?;
        public.insert(key.as_str().to_string(), value);
        Ok(())
    }

    async fn delete_state(&self, key: &CompositeKey) -> Result<(), LedgerError> {
        let mut public = self.public.write().map_err(|_| Self::lock_poisoned())?;
        public.remove(key.as_str());
        Ok(())
    }

    async fn get_private_data(
        &self,
        collection: &str,
        key: &CompositeKey,
    ) -> Result<Option<Vec<u8>>, LedgerError> {
        let private = self.private.read().map_err(|_| Self::lock_poisoned())?;
        Ok(private
            .get(collection)
            .and_then(|partition| partition.get(key.as_str()))
            .cloned())
    }

    async fn put_private_data(
        &self,
        collection: &str,
        key: &CompositeKey,
        value: Vec<u8>,
    ) -> Result<(), LedgerError> {
        let mut private = self.private.write().map_err(|_| Self::lock_poisoned())?;
        private
            .entry(collection.to_string())
            .or_default()
            .insert(key.as_str().to_string(), value);
        Ok(())
    }

    async fn delete_private_data(
        &self,
        collection: &str,
        key: &CompositeKey,
    ) -> Result<(), LedgerError> {
        let mut private = self.private.write().map_err(|_| Self::lock_poisoned())?;
        if let Some(partition) = private.get_mut(collection) {
            partition.remove(key.as_str());
        }
        Ok(())
    }

    async fn get_state_by_partial_composite_key(
        &self,
        prefix: &CompositeKey,
    ) -> Result<StateCursor, LedgerError> {
        let public = self.public.read().map_err(|_| Self::lock_poisoned())?;
        Ok(SnapshotCursor::new(scan_prefix(&public, prefix)))
    }

    async fn get_private_data_by_partial_composite_key(
        &self,
        collection: &str,
        prefix: &CompositeKey,
    ) -> Result<StateCursor, LedgerError> {
        let private = self.private.read().map_err(|_| Self::lock_poisoned())?;
        let entries = private
            .get(collection)
            .map(|partition| scan_prefix(partition, prefix))
            .unwrap_or_default();
        Ok(SnapshotCursor::new(entries))
    }

    async fn get_query_result(&self, query: &str) -> Result<StateCursor, LedgerError> {
        let public = self.public.read().map_err(|_| Self::lock_poisoned())?;
        Ok(SnapshotCursor::new(run_selector(&public, query)?))
    }

    async fn get_private_data_query_result(
        &self,
        collection: &str,
        query: &str,
    ) -> Result<StateCursor, LedgerError> {
        let private = self.private.read().map_err(|_| Self::lock_poisoned())?;
        let entries = match private.get(collection) {
            Some(partition) => run_selector(partition, query)?,
            None => Vec::new(),
        };
        Ok(SnapshotCursor::new(entries))
    }
}
