//! # Asset Lifecycle Tests
//!
//! CRUD invariants of the generic asset store against the in-memory
//! ledger: existence semantics, failure taxonomy, shallow-merge update,
//! and isolation between the public partition and named private
//! collections.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use asset_store::adapters::InMemoryLedger;
    use asset_store::{AssetError, AssetStore, StorageLocation};
    use serde_json::json;

    fn store() -> AssetStore<InMemoryLedger> {
        AssetStore::new(Arc::new(InMemoryLedger::new()))
    }

    /// The full meter lifecycle: create, read, update, read, delete.
    #[tokio::test]
    async fn meter_lifecycle_end_to_end() {
        let store = store();
        let loc = StorageLocation::Public;

        store
            .create("meters", &["m1"], json!({"address": "12 Main St"}), &loc)
            .await
            .unwrap();
        assert_eq!(
            store.read("meters", &["m1"], &loc).await.unwrap(),
            json!({"address": "12 Main St"})
        );

        let merged = store
            .update("meters", &["m1"], json!({"address": "99 Oak Ave"}), &loc)
            .await
            .unwrap();
        assert_eq!(merged, json!({"address": "99 Oak Ave"}));
        assert_eq!(store.read("meters", &["m1"], &loc).await.unwrap(), merged);

        store.delete("meters", &["m1"], &loc).await.unwrap();
        assert!(!store.exists("meters", &["m1"], &loc).await.unwrap());
        assert!(matches!(
            store.read("meters", &["m1"], &loc).await.unwrap_err(),
            AssetError::NotFound { .. }
        ));
    }

    /// Update applied over create is a shallow top-level merge: fields
    /// absent from the update survive.
    #[tokio::test]
    async fn update_preserves_fields_absent_from_the_update() {
        let store = store();
        let loc = StorageLocation::Public;

        store
            .create(
                "meters",
                &["m1"],
                json!({"address": "12 Main St", "owner": "acme", "tier": 2}),
                &loc,
            )
            .await
            .unwrap();
        let merged = store
            .update("meters", &["m1"], json!({"address": "99 Oak Ave"}), &loc)
            .await
            .unwrap();

        assert_eq!(
            merged,
            json!({"address": "99 Oak Ave", "owner": "acme", "tier": 2})
        );
    }

    /// A failed second create must not disturb the stored value, and the
    /// error must carry the asset type and id.
    #[tokio::test]
    async fn already_exists_carries_diagnostics() {
        let store = store();
        let loc = StorageLocation::Public;

        store
            .create("meters", &["m1"], json!({"v": 1}), &loc)
            .await
            .unwrap();
        let err = store
            .create("meters", &["m1"], json!({"v": 2}), &loc)
            .await
            .unwrap_err();

        match err {
            AssetError::AlreadyExists { asset_type, id } => {
                assert_eq!(asset_type, "meters");
                assert_eq!(id, "m1");
            }
            other => panic!("expected AlreadyExists, got {other:?}"),
        }
        assert_eq!(
            store.read("meters", &["m1"], &loc).await.unwrap(),
            json!({"v": 1})
        );
    }

    /// The same composite key in the public partition and in a private
    /// collection addresses two independent records.
    #[tokio::test]
    async fn same_key_in_two_locations_never_collides() {
        let store = store();
        let public = StorageLocation::Public;
        let private = StorageLocation::private("priv");

        store
            .create("readings", &["r1"], json!({"value": 1}), &private)
            .await
            .unwrap();
        store
            .create("readings", &["r1"], json!({"value": 2}), &public)
            .await
            .unwrap();

        assert_eq!(
            store.read("readings", &["r1"], &private).await.unwrap(),
            json!({"value": 1})
        );
        assert_eq!(
            store.read("readings", &["r1"], &public).await.unwrap(),
            json!({"value": 2})
        );
    }

    /// Operations against one collection never observe or mutate another.
    #[tokio::test]
    async fn private_collections_are_mutually_isolated() {
        let store = store();
        let coll_x = StorageLocation::private("x");
        let coll_y = StorageLocation::private("y");

        store
            .create("readings", &["r1"], json!({"from": "x"}), &coll_x)
            .await
            .unwrap();

        assert!(!store.exists("readings", &["r1"], &coll_y).await.unwrap());
        assert!(matches!(
            store.delete("readings", &["r1"], &coll_y).await.unwrap_err(),
            AssetError::NotFound { .. }
        ));

        // The record in x is untouched by the failed delete against y.
        assert_eq!(
            store.read("readings", &["r1"], &coll_x).await.unwrap(),
            json!({"from": "x"})
        );
    }

    /// Deleting in one location leaves the same key alive elsewhere.
    #[tokio::test]
    async fn delete_is_scoped_to_its_location() {
        let store = store();
        let public = StorageLocation::Public;
        let private = StorageLocation::private("priv");

        store
            .create("meters", &["m1"], json!({"a": 1}), &public)
            .await
            .unwrap();
        store
            .create("meters", &["m1"], json!({"b": 2}), &private)
            .await
            .unwrap();

        store.delete("meters", &["m1"], &public).await.unwrap();

        assert!(!store.exists("meters", &["m1"], &public).await.unwrap());
        assert!(store.exists("meters", &["m1"], &private).await.unwrap());
    }

    /// list_all sees exactly the records of the requested type and
    /// location.
    #[tokio::test]
    async fn list_all_is_scoped_by_type_and_location() {
        let store = store();
        let public = StorageLocation::Public;
        let private = StorageLocation::private("priv");

        store
            .create("meters", &["m1"], json!({"id": "m1"}), &public)
            .await
            .unwrap();
        store
            .create("meters", &["m2"], json!({"id": "m2"}), &private)
            .await
            .unwrap();
        store
            .create("readings", &["r1"], json!({"id": "r1"}), &public)
            .await
            .unwrap();

        let public_meters = store.list_all("meters", &public).await.unwrap();
        assert_eq!(public_meters, vec![json!({"id": "m1"})]);

        let private_meters = store.list_all("meters", &private).await.unwrap();
        assert_eq!(private_meters, vec![json!({"id": "m2"})]);
    }
}
