//! Meter info contract.

use asset_store::{AssetStore, LedgerStub, StorageLocation};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::errors::ContractError;
use crate::METERS;

/// Read-side façade over meter master data.
pub struct InfoContract<L: LedgerStub + ?Sized> {
    store: AssetStore<L>,
}

impl<L: LedgerStub + ?Sized> InfoContract<L> {
    pub fn new(store: AssetStore<L>) -> Self {
        Self { store }
    }

    /// The shared store, for primary CRUD on meter records.
    pub fn store(&self) -> &AssetStore<L> {
        &self.store
    }

    /// All meters in the targeted location, projected to their `id` and
    /// `address` fields. Fields absent from a record are omitted from its
    /// projection rather than emitted as null.
    #[instrument(skip(self), level = "debug")]
    pub async fn get_all_meters(
        &self,
        location: &StorageLocation,
    ) -> Result<Vec<Value>, ContractError> {
        let meters = self.store.list_all(METERS, location).await?;
        Ok(meters.into_iter().map(project_meter).collect())
    }
}

fn project_meter(record: Value) -> Value {
    let mut projection = Map::new();
    if let Value::Object(fields) = record {
        for field in ["id", "address"] {
            if let Some(value) = fields.get(field) {
                projection.insert(field.to_string(), value.clone());
            }
        }
    }
    Value::Object(projection)
}
