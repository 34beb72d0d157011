use asset_store::AssetError;
use thiserror::Error;

/// Failures surfaced by the contract façades.
///
/// Store-level failures pass through transparently so callers still see
/// `AlreadyExists` / `NotFound` with the asset type and id intact.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("meter status is missing required field {0}")]
    MissingField(&'static str),

    #[error("meter status field {0} is not a number")]
    NotANumber(&'static str),

    #[error("meter status field {0} is not a string or number id")]
    InvalidId(&'static str),

    #[error("meter status is not a JSON object")]
    NotAnObject,

    #[error(transparent)]
    Store(#[from] AssetError),
}
