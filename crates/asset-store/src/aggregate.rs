//! Result cursor aggregation.

use serde_json::Value;
use tracing::debug;

use crate::domain::{canonical::canonicalize, AssetError};
use crate::ports::StateCursor;

/// Drain a range or rich-query cursor into a deterministic collection.
///
/// The cursor is consumed to completion: no early termination and no
/// pagination token is handed back. Entries are sorted by stored key, so
/// the output does not depend on the backend's physical iteration order,
/// and every record is canonicalized; the canonical encoding of the
/// returned array is therefore byte-identical across calls returning the
/// same logical set.
///
/// Decoding is tolerant: a stored value that is not valid JSON is kept as
/// a string of its (lossy UTF-8) text rather than aborting the whole
/// aggregation. This is the one place malformity is recovered locally;
/// backend failures during cursor advance still propagate unchanged.
pub async fn aggregate(mut cursor: StateCursor) -> Result<Vec<Value>, AssetError> {
    let mut entries: Vec<(String, Value)> = Vec::new();

    while let Some(entry) = cursor.next_entry().await? {
        let record = match serde_json::from_slice::<Value>(&entry.value) {
            Ok(value) => value,
            Err(error) => {
                debug!(key = %entry.key, %error, "stored value is not valid JSON, keeping raw text");
                Value::String(String::from_utf8_lossy(&entry.value).into_owned())
            }
        };
        entries.push((entry.key, record));
    }

    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    Ok(entries
        .into_iter()
        .map(|(_, record)| canonicalize(record))
        .collect())
}
