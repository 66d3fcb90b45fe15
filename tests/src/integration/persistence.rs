//! # Persistence Tests
//!
//! The file-backed store across service restarts: containers written by
//! one service instance are readable, byte-for-byte equivalent, by the
//! next.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use redhorn_inventory::{
        ContainerKey, ContainerKind, InventoryApi, InventoryConfig, InventoryDependencies,
        InventoryService, ItemMetadata, JsonFileStore, NullNotificationSink, SystemTimeSource,
    };

    use crate::integration::test_catalog;

    fn service_at(
        path: &std::path::Path,
    ) -> InventoryService<JsonFileStore, NullNotificationSink, SystemTimeSource> {
        InventoryService::new(
            InventoryDependencies {
                store: JsonFileStore::new(path),
                notifier: NullNotificationSink,
                time: SystemTimeSource,
            },
            test_catalog(),
            InventoryConfig::default(),
        )
    }

    #[tokio::test]
    async fn containers_survive_a_service_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("containers.json");
        let player = ContainerKey::player("license_abc");
        let stash = ContainerKey::new(ContainerKind::Stash, "motel_room_2");

        {
            let service = service_at(&path);
            service.add_item(&player, "bandage", 4, None).await.unwrap();
            service
                .add_item(&stash, "pistol_ammo", 120, None)
                .await
                .unwrap();
        }

        let service = service_at(&path);
        assert!(service.has_item(&player, "bandage", 4).await.unwrap());
        assert!(service.has_item(&stash, "pistol_ammo", 120).await.unwrap());
        assert!(!service.has_item(&stash, "pistol_ammo", 121).await.unwrap());
    }

    #[tokio::test]
    async fn item_metadata_round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("containers.json");
        let player = ContainerKey::player("license_abc");

        let mut metadata = ItemMetadata::new();
        metadata.insert("serial".into(), serde_json::json!("RH-00451"));
        metadata.insert("durability".into(), serde_json::json!(87));

        {
            let service = service_at(&path);
            service
                .add_item(&player, "pistol", 1, Some(metadata.clone()))
                .await
                .unwrap();
        }

        let service = service_at(&path);
        let opened = service
            .open_inventory(redhorn_inventory::SessionId(1), player.clone(), None)
            .await
            .unwrap();
        assert_eq!(opened.primary.items.len(), 1);
        assert_eq!(opened.primary.items[0].metadata, metadata);
    }

    #[tokio::test]
    async fn deletes_are_durable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("containers.json");
        let drop = ContainerKey::new_drop();

        {
            let service = service_at(&path);
            service.add_item(&drop, "rock", 2, None).await.unwrap();
            service.delete_container(&drop).await.unwrap();
        }

        let service = service_at(&path);
        assert!(!service.has_item(&drop, "rock", 1).await.unwrap());
    }
}
