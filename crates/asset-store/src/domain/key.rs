//! Composite key construction.
//!
//! Every asset lives under a namespaced key derived from its asset-type
//! label plus an ordered list of string components. The mapping
//! (type, components) -> key is injective and stable: it is a pure function
//! of its inputs, so the same asset always resolves to the same key across
//! process restarts.

use std::fmt;

use crate::domain::errors::AssetError;

/// Delimiter placed before the asset type and after every key element.
///
/// U+0000 sorts below every other code point, which keeps all keys of one
/// asset type in a contiguous lexicographic range for prefix scans.
const DELIMITER: char = '\u{0}';

/// A namespaced storage key for one asset.
///
/// Opaque to callers above this layer: the inner encoding is not part of
/// the public contract and must not be parsed or reconstructed manually.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompositeKey(String);

impl CompositeKey {
    /// Build the key for `asset_type` with the given ordered components.
    ///
    /// An empty component list is valid and produces the type-only key.
    /// Components (and the type label) must not embed the delimiter;
    /// allowing it would let two distinct component lists collide.
    pub fn new(asset_type: &str, components: &[&str]) -> Result<Self, AssetError> {
        validate_element(asset_type, asset_type)?;
        let mut key = String::with_capacity(asset_type.len() + 2);
        key.push(DELIMITER);
        key.push_str(asset_type);
        key.push(DELIMITER);
        for component in components {
            validate_element(asset_type, component)?;
            key.push_str(component);
            key.push(DELIMITER);
        }
        Ok(Self(key))
    }

    /// Partial-key prefix covering every key of `asset_type` whose leading
    /// components equal `components`.
    ///
    /// With no components this covers the whole asset type. The prefix is
    /// itself a valid string prefix of every matching key.
    pub fn prefix(asset_type: &str, components: &[&str]) -> Result<Self, AssetError> {
        // Same encoding; a full key is its own prefix.
        Self::new(asset_type, components)
    }

    /// The raw key as handed to the ledger backend.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `stored_key` (as reported back by a backend cursor) falls
    /// under this prefix.
    pub fn covers(&self, stored_key: &str) -> bool {
        stored_key.starts_with(&self.0)
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Delimiters are unprintable; show a readable form for diagnostics.
        write!(f, "{}", self.0.replace(DELIMITER, "/"))
    }
}

fn validate_element(asset_type: &str, element: &str) -> Result<(), AssetError> {
    if element.contains(DELIMITER) {
        return Err(AssetError::InvalidKey {
            asset_type: asset_type.to_string(),
            reason: "key element contains the reserved U+0000 delimiter".to_string(),
        });
    }
    Ok(())
}
