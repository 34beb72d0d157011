//! The generic asset store.
//!
//! One CRUD and query engine shared by every contract type, so that key
//! construction, canonical serialization, and existence checks are not
//! reimplemented per type. Contract façades hold an [`AssetStore`] and call
//! it with their fixed asset-type label; they perform no backend calls of
//! their own on the primary CRUD paths.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::aggregate::aggregate;
use crate::domain::{
    canonical::to_canonical_bytes, AssetError, CompositeKey, LedgerError, StorageLocation,
};
use crate::ports::{LedgerStub, StateCursor};

/// Uniform get/put/delete/range/rich-query surface over one partition.
///
/// Dispatches each call to the public world state or to the named
/// private-data collection selected by the location.
pub struct Partition<'a, L: LedgerStub + ?Sized> {
    stub: &'a L,
    location: &'a StorageLocation,
}

impl<'a, L: LedgerStub + ?Sized> Partition<'a, L> {
    pub fn new(stub: &'a L, location: &'a StorageLocation) -> Self {
        Self { stub, location }
    }

    pub async fn get(&self, key: &CompositeKey) -> Result<Option<Vec<u8>>, LedgerError> {
        match self.location.collection() {
            Some(collection) => self.stub.get_private_data(collection, key).await,
            None => self.stub.get_state(key).await,
        }
    }

    pub async fn put(&self, key: &CompositeKey, value: Vec<u8>) -> Result<(), LedgerError> {
        match self.location.collection() {
            Some(collection) => self.stub.put_private_data(collection, key, value).await,
            None => self.stub.put_state(key, value).await,
        }
    }

    pub async fn delete(&self, key: &CompositeKey) -> Result<(), LedgerError> {
        match self.location.collection() {
            Some(collection) => self.stub.delete_private_data(collection, key).await,
            None => self.stub.delete_state(key).await,
        }
    }

    pub async fn range_by_prefix(&self, prefix: &CompositeKey) -> Result<StateCursor, LedgerError> {
        match self.location.collection() {
            Some(collection) => {
                self.stub
                    .get_private_data_by_partial_composite_key(collection, prefix)
                    .await
            }
            None => self.stub.get_state_by_partial_composite_key(prefix).await,
        }
    }

    pub async fn rich_query(&self, query: &str) -> Result<StateCursor, LedgerError> {
        match self.location.collection() {
            Some(collection) => {
                self.stub
                    .get_private_data_query_result(collection, query)
                    .await
            }
            None => self.stub.get_query_result(query).await,
        }
    }
}

/// Generic CRUD and query engine over a ledger stub.
///
/// All operations are parameterized by the asset type, an ordered list of
/// id components, and a [`StorageLocation`]. Isolation between asset types
/// is achieved purely through composite-key namespacing; all types share
/// the same physical partitions.
pub struct AssetStore<L: LedgerStub + ?Sized> {
    stub: Arc<L>,
}

impl<L: LedgerStub + ?Sized> Clone for AssetStore<L> {
    fn clone(&self) -> Self {
        Self {
            stub: Arc::clone(&self.stub),
        }
    }
}

impl<L: LedgerStub + ?Sized> AssetStore<L> {
    /// Wrap a transaction-scoped ledger handle.
    pub fn new(stub: Arc<L>) -> Self {
        Self { stub }
    }

    fn partition<'a>(&'a self, location: &'a StorageLocation) -> Partition<'a, L> {
        Partition::new(self.stub.as_ref(), location)
    }

    /// True iff a non-empty value is stored at (asset_type, id) in the
    /// targeted location. A present-but-empty value counts as absent,
    /// guarding against platform-level tombstones.
    #[instrument(skip(self), level = "debug")]
    pub async fn exists(
        &self,
        asset_type: &str,
        id: &[&str],
        location: &StorageLocation,
    ) -> Result<bool, AssetError> {
        let key = CompositeKey::new(asset_type, id)?;
        let stored = self.partition(location).get(&key).await?;
        Ok(matches!(stored, Some(bytes) if !bytes.is_empty()))
    }

    /// Store a new record. Fails with [`AssetError::AlreadyExists`] when a
    /// non-empty value is already present.
    ///
    /// Returns the submitted value, not a re-read, so callers observe
    /// exactly what they handed in. The exists check and the write are not
    /// atomic against concurrent invocations on the same key; conflict
    /// detection at commit time is the platform's responsibility.
    #[instrument(skip(self, data), level = "debug")]
    pub async fn create(
        &self,
        asset_type: &str,
        id: &[&str],
        data: Value,
        location: &StorageLocation,
    ) -> Result<Value, AssetError> {
        if self.exists(asset_type, id, location).await? {
            return Err(AssetError::AlreadyExists {
                asset_type: asset_type.to_string(),
                id: join_id(id),
            });
        }

        let key = CompositeKey::new(asset_type, id)?;
        let bytes = to_canonical_bytes(&data)?;
        self.partition(location).put(&key, bytes).await?;
        debug!(asset_type, id = %join_id(id), %location, "asset created");
        Ok(data)
    }

    /// Read and decode the record at (asset_type, id). Fails with
    /// [`AssetError::NotFound`] when absent or empty.
    #[instrument(skip(self), level = "debug")]
    pub async fn read(
        &self,
        asset_type: &str,
        id: &[&str],
        location: &StorageLocation,
    ) -> Result<Value, AssetError> {
        let key = CompositeKey::new(asset_type, id)?;
        let stored = self.partition(location).get(&key).await?;
        let bytes = match stored {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => {
                return Err(AssetError::NotFound {
                    asset_type: asset_type.to_string(),
                    id: join_id(id),
                })
            }
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Merge `data`'s top-level fields over the stored record and write
    /// the canonical encoding of the result.
    ///
    /// The merge is shallow: nested objects are replaced wholesale, never
    /// deep-merged, and fields absent from `data` survive. This mirrors
    /// spread-style record update semantics and is intentional. Inherits
    /// [`AssetError::NotFound`] from the internal read.
    #[instrument(skip(self, data), level = "debug")]
    pub async fn update(
        &self,
        asset_type: &str,
        id: &[&str],
        data: Value,
        location: &StorageLocation,
    ) -> Result<Value, AssetError> {
        let stored = self.read(asset_type, id, location).await?;

        let Value::Object(mut merged) = stored else {
            return Err(AssetError::NotAnObject);
        };
        let Value::Object(updates) = data else {
            return Err(AssetError::NotAnObject);
        };
        for (field, value) in updates {
            merged.insert(field, value);
        }
        let merged = Value::Object(merged);

        let key = CompositeKey::new(asset_type, id)?;
        let bytes = to_canonical_bytes(&merged)?;
        self.partition(location).put(&key, bytes).await?;
        debug!(asset_type, id = %join_id(id), %location, "asset updated");
        Ok(merged)
    }

    /// Remove the record at (asset_type, id). Fails with
    /// [`AssetError::NotFound`] when nothing is stored there. Removal is
    /// unconditional: no soft-delete, no versioning.
    #[instrument(skip(self), level = "debug")]
    pub async fn delete(
        &self,
        asset_type: &str,
        id: &[&str],
        location: &StorageLocation,
    ) -> Result<(), AssetError> {
        if !self.exists(asset_type, id, location).await? {
            return Err(AssetError::NotFound {
                asset_type: asset_type.to_string(),
                id: join_id(id),
            });
        }
        let key = CompositeKey::new(asset_type, id)?;
        self.partition(location).delete(&key).await?;
        debug!(asset_type, id = %join_id(id), %location, "asset deleted");
        Ok(())
    }

    /// Every record stored under `asset_type` in the targeted location,
    /// aggregated deterministically (see [`crate::aggregate::aggregate`]).
    #[instrument(skip(self), level = "debug")]
    pub async fn list_all(
        &self,
        asset_type: &str,
        location: &StorageLocation,
    ) -> Result<Vec<Value>, AssetError> {
        let prefix = CompositeKey::prefix(asset_type, &[])?;
        let cursor = self.partition(location).range_by_prefix(&prefix).await?;
        aggregate(cursor).await
    }

    /// Evaluate a backend-native rich query and aggregate its results with
    /// the same determinism contract as [`Self::list_all`]. The query
    /// expression is passed through uninterpreted.
    #[instrument(skip(self, query), level = "debug")]
    pub async fn query(
        &self,
        query: &str,
        location: &StorageLocation,
    ) -> Result<Vec<Value>, AssetError> {
        let cursor = self.partition(location).rich_query(query).await?;
        aggregate(cursor).await
    }
}

fn join_id(id: &[&str]) -> String {
    id.join(":")
}
