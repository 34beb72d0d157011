use thiserror::Error;

/// Failures reported by the underlying ledger platform.
///
/// The store propagates these unmodified: no retry, no suppression, no
/// wrapping beyond the transparent `AssetError::Ledger` variant. The
/// enclosing transaction's abort semantics are the platform's concern.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger backend error: {0}")]
    Backend(String),

    #[error("access denied to collection {collection}")]
    AccessDenied { collection: String },

    #[error("invalid collection name: {collection}")]
    InvalidCollection { collection: String },

    #[error("malformed rich query: {0}")]
    MalformedQuery(String),
}

/// Failures surfaced by the generic asset store.
///
/// `AlreadyExists` and `NotFound` are deterministic, pure functions of
/// current state — nothing here is transient or retriable.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("the asset {asset_type} with id {id} already exists")]
    AlreadyExists { asset_type: String, id: String },

    #[error("the asset {asset_type} with id {id} does not exist")]
    NotFound { asset_type: String, id: String },

    #[error("invalid key for asset type {asset_type}: {reason}")]
    InvalidKey { asset_type: String, reason: String },

    #[error("asset record is not a JSON object")]
    NotAnObject,

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
