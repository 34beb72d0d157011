//! # meter-contracts
//!
//! Meter-domain contract façades over the generic
//! [`AssetStore`](asset_store::AssetStore).
//!
//! Each contract holds a store handle and calls it with a fixed asset-type
//! label; none performs direct backend calls on the primary CRUD paths.
//! Composition replaces the inheritance chain such contract families tend
//! to grow: the store is the one shared engine, the façades only add their
//! derived operations (meter projection, consumption computation,
//! status-to-meter resolution, rich-query pass-through).

pub mod errors;
pub mod info;
pub mod readings;
pub mod readings_bridge;

pub use errors::ContractError;
pub use info::InfoContract;
pub use readings::ReadingsContract;
pub use readings_bridge::ReadingsBridgeContract;

/// Asset-type label for meter master data.
pub const METERS: &str = "meters";

/// Asset-type label for meter readings.
pub const READINGS: &str = "readings";

/// Asset-type label for the status-to-meter bridge records.
pub const METER_TO_METER_STATUS: &str = "metertometerstatus";
