//! Readings contract.

use asset_store::{AssetStore, LedgerStub, StorageLocation};
use serde_json::Value;
use tracing::instrument;

use crate::errors::ContractError;

/// Façade over meter readings: primary CRUD via the shared store plus
/// rich-query pass-through.
pub struct ReadingsContract<L: LedgerStub + ?Sized> {
    store: AssetStore<L>,
}

impl<L: LedgerStub + ?Sized> ReadingsContract<L> {
    pub fn new(store: AssetStore<L>) -> Self {
        Self { store }
    }

    /// The shared store, for primary CRUD on reading records.
    pub fn store(&self) -> &AssetStore<L> {
        &self.store
    }

    /// Evaluate a backend-native query against the targeted location and
    /// return the aggregated result set.
    #[instrument(skip(self, query), level = "debug")]
    pub async fn query(
        &self,
        query: &str,
        location: &StorageLocation,
    ) -> Result<Vec<Value>, ContractError> {
        Ok(self.store.query(query, location).await?)
    }
}
