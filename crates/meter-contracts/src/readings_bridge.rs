//! Readings bridge contract.
//!
//! Links raw meter statuses to meters: computes per-reading consumption,
//! materializes the status-to-meter bridge records, and resolves a batch of
//! statuses back to the owning meter ids.

use asset_store::{AssetStore, LedgerStub, StorageLocation};
use serde_json::{Map, Number, Value};
use tracing::{debug, instrument};

use crate::errors::ContractError;
use crate::METER_TO_METER_STATUS;

/// Façade over the status-to-meter bridge records.
pub struct ReadingsBridgeContract<L: LedgerStub + ?Sized> {
    store: AssetStore<L>,
}

impl<L: LedgerStub + ?Sized> ReadingsBridgeContract<L> {
    pub fn new(store: AssetStore<L>) -> Self {
        Self { store }
    }

    /// The shared store, for primary CRUD on bridge records.
    pub fn store(&self) -> &AssetStore<L> {
        &self.store
    }

    /// Resolve a batch of meter statuses to the ids of the meters they
    /// belong to, deduplicated in first-seen order.
    ///
    /// Each status must carry a `meterstatus_id`; its bridge record must
    /// already have been materialized by [`Self::process_meter_status`],
    /// otherwise the lookup fails with `NotFound`.
    #[instrument(skip(self, statuses), level = "debug")]
    pub async fn meter_statuses_to_meters(
        &self,
        statuses: &[Value],
        location: &StorageLocation,
    ) -> Result<Vec<Value>, ContractError> {
        let mut meter_ids: Vec<Value> = Vec::new();
        for status in statuses {
            let status_id = id_component(status.get("meterstatus_id"))?;
            let record = self
                .store
                .read(METER_TO_METER_STATUS, &[&status_id], location)
                .await?;
            if let Some(meter_id) = record.get("meter_id") {
                if !meter_ids.contains(meter_id) {
                    meter_ids.push(meter_id.clone());
                }
            }
        }
        Ok(meter_ids)
    }

    /// Compute the consumption for one meter status and materialize its
    /// bridge record.
    ///
    /// `consumption = value - lastval`. The bridge record
    /// `{consumption, meter_id, meterstatus_id, sensor_date,
    /// total_consumption}` is written under the stringified
    /// `meterstatus_id` only if absent, so re-processing the same status is
    /// idempotent. Returns the status with `consumption` added and the
    /// `lastval`, `meter_id`, `value` working fields removed.
    #[instrument(skip(self, status), level = "debug")]
    pub async fn process_meter_status(
        &self,
        status: Value,
        location: &StorageLocation,
    ) -> Result<Value, ContractError> {
        let Value::Object(fields) = status else {
            return Err(ContractError::NotAnObject);
        };

        let value = numeric_field(&fields, "value")?;
        let lastval = numeric_field(&fields, "lastval")?;
        let consumption = subtract(&value, &lastval);
        let status_id = id_component(fields.get("meterstatus_id"))?;

        let mut bridge = Map::new();
        bridge.insert("consumption".to_string(), consumption.clone());
        for field in ["meter_id", "meterstatus_id", "sensor_date"] {
            if let Some(v) = fields.get(field) {
                bridge.insert(field.to_string(), v.clone());
            }
        }
        bridge.insert("total_consumption".to_string(), Value::Number(value));

        if !self
            .store
            .exists(METER_TO_METER_STATUS, &[&status_id], location)
            .await?
        {
            self.store
                .create(
                    METER_TO_METER_STATUS,
                    &[&status_id],
                    Value::Object(bridge),
                    location,
                )
                .await?;
        } else {
            debug!(%status_id, "bridge record already materialized, skipping");
        }

        let mut processed = fields;
        processed.remove("lastval");
        processed.remove("meter_id");
        processed.remove("value");
        processed.insert("consumption".to_string(), consumption);
        Ok(Value::Object(processed))
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

fn numeric_field(fields: &Map<String, Value>, name: &'static str) -> Result<Number, ContractError> {
    match fields.get(name) {
        Some(Value::Number(n)) => Ok(n.clone()),
        Some(_) => Err(ContractError::NotANumber(name)),
        None => Err(ContractError::MissingField(name)),
    }
}

/// `value - lastval`, staying integral when both operands are and the
/// difference fits; falls back to float arithmetic otherwise, so extreme
/// readings produce an approximate figure instead of aborting.
fn subtract(value: &Number, lastval: &Number) -> Value {
    if let (Some(v), Some(l)) = (value.as_i64(), lastval.as_i64()) {
        if let Some(difference) = v.checked_sub(l) {
            return Value::from(difference);
        }
    }
    let difference = value.as_f64().unwrap_or(f64::NAN) - lastval.as_f64().unwrap_or(f64::NAN);
    Number::from_f64(difference).map_or(Value::Null, Value::Number)
}

/// Stringified id component, matching host-language `String(x)` coercion
/// for the string and number shapes ids actually take.
fn id_component(value: Option<&Value>) -> Result<String, ContractError> {
    match value {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(ContractError::InvalidId("meterstatus_id")),
        None => Err(ContractError::MissingField("meterstatus_id")),
    }
}
