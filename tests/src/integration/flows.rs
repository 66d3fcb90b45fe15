//! # Session Flow Tests
//!
//! End-to-end inventory flows driven through the public [`InventoryApi`]:
//! a session opens containers, items stack and split on pickup, moves
//! between player and vehicle containers honor stack limits and weight
//! budgets, and consumables shrink on use.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use redhorn_inventory::{
        ContainerKey, ContainerKind, ContainerStore, InMemoryContainerStore, InventoryApi,
        InventoryConfig, InventoryDependencies, InventoryService, MoveReceipt, MoveRequest,
        RecordingNotificationSink, SessionId, StoredContainer, SystemTimeSource,
    };

    use crate::integration::test_catalog;

    type TestService = InventoryService<
        Arc<InMemoryContainerStore>,
        Arc<RecordingNotificationSink>,
        Arc<SystemTimeSource>,
    >;

    fn service() -> (TestService, Arc<InMemoryContainerStore>, Arc<RecordingNotificationSink>) {
        let store = Arc::new(InMemoryContainerStore::new());
        let sink = Arc::new(RecordingNotificationSink::new());
        let service = InventoryService::new(
            InventoryDependencies {
                store: Arc::clone(&store),
                notifier: Arc::clone(&sink),
                time: Arc::new(SystemTimeSource),
            },
            test_catalog(),
            InventoryConfig::default(),
        );
        (service, store, sink)
    }

    fn player() -> ContainerKey {
        ContainerKey::player("license_abc")
    }

    fn trunk() -> ContainerKey {
        ContainerKey::new(ContainerKind::Trunk, "plate_RH01")
    }

    #[tokio::test]
    async fn loot_cycle_from_pickup_to_use() {
        crate::integration::init_tracing();
        let (service, _store, sink) = service();
        let session = SessionId(100);

        // Pickup phase: server scripts hand the player their loot.
        service.add_item(&player(), "bandage", 3, None).await.unwrap();
        service.add_item(&player(), "pistol", 1, None).await.unwrap();

        let opened = service
            .open_inventory(session, player(), None)
            .await
            .unwrap();
        assert_eq!(opened.primary.items.len(), 2);
        let total_weight: u64 = opened
            .primary
            .items
            .iter()
            .map(|item| item.weight * u64::from(item.count))
            .sum();
        assert_eq!(total_weight, 3 * 100 + 1000);

        // Consume one bandage.
        let bandage_slot = opened
            .primary
            .items
            .iter()
            .find(|item| item.name == "bandage")
            .map(|item| item.slot)
            .unwrap();
        let receipt = service
            .use_item(session, player(), bandage_slot)
            .await
            .unwrap();
        assert!(receipt.ok);
        assert!(service.has_item(&player(), "bandage", 2).await.unwrap());
        assert!(!service.has_item(&player(), "bandage", 3).await.unwrap());

        // The pistol is usable but not consumable.
        let pistol_slot = opened
            .primary
            .items
            .iter()
            .find(|item| item.name == "pistol")
            .map(|item| item.slot)
            .unwrap();
        let receipt = service
            .use_item(session, player(), pistol_slot)
            .await
            .unwrap();
        assert!(receipt.ok);
        assert!(service.has_item(&player(), "pistol", 1).await.unwrap());

        service.close_inventory(session).await;

        let names = sink.event_names();
        assert!(names.contains(&"inventory:open".to_string()));
        assert!(names.contains(&"inventory:itemUsed".to_string()));
        assert!(names.contains(&"inventory:refresh".to_string()));
        assert!(names.contains(&"inventory:close".to_string()));
    }

    #[tokio::test]
    async fn oversized_pickup_splits_across_slots() {
        let (service, _store, _sink) = service();
        let session = SessionId(101);

        // 60 rounds against a stack limit of 50.
        service
            .add_item(&player(), "pistol_ammo", 60, None)
            .await
            .unwrap();

        let opened = service
            .open_inventory(session, player(), None)
            .await
            .unwrap();
        let mut counts: Vec<u32> = opened
            .primary
            .items
            .iter()
            .map(|item| item.count)
            .collect();
        counts.sort_unstable();
        assert_eq!(counts, vec![10, 50]);
    }

    #[tokio::test]
    async fn trunk_merge_respects_the_stack_limit() {
        let (service, _store, _sink) = service();
        let session = SessionId(102);

        service
            .add_item(&player(), "pistol_ammo", 30, None)
            .await
            .unwrap();
        service
            .add_item(&trunk(), "pistol_ammo", 40, None)
            .await
            .unwrap();
        service
            .open_inventory(session, player(), Some(trunk()))
            .await
            .unwrap();

        // 40 + 30 would exceed the 50-round stack: rejected, nothing moves.
        let receipt = service
            .move_item(
                session,
                MoveRequest {
                    from: player(),
                    to: trunk(),
                    from_slot: 1,
                    to_slot: 1,
                    count: 30,
                },
            )
            .await;
        assert_eq!(receipt.reason, Some("capacity_exceeded"));
        assert!(service.has_item(&player(), "pistol_ammo", 30).await.unwrap());
        assert!(service.has_item(&trunk(), "pistol_ammo", 40).await.unwrap());

        // Topping the stack up to exactly 50 is fine.
        let receipt = service
            .move_item(
                session,
                MoveRequest {
                    from: player(),
                    to: trunk(),
                    from_slot: 1,
                    to_slot: 1,
                    count: 10,
                },
            )
            .await;
        assert_eq!(receipt, MoveReceipt::ok());
        assert!(service.has_item(&player(), "pistol_ammo", 20).await.unwrap());
        assert!(service.has_item(&trunk(), "pistol_ammo", 50).await.unwrap());
    }

    #[tokio::test]
    async fn destination_weight_budget_bounds_transfers() {
        let (service, store, _sink) = service();
        let session = SessionId(103);
        let glovebox = ContainerKey::new(ContainerKind::Glovebox, "plate_RH01");

        // A glovebox seeded with a tight budget: two water bottles at most.
        store
            .put(&glovebox, &StoredContainer::empty(1_000))
            .await
            .unwrap();
        service.add_item(&player(), "water", 3, None).await.unwrap();
        service
            .open_inventory(session, player(), Some(glovebox.clone()))
            .await
            .unwrap();

        let receipt = service
            .move_item(
                session,
                MoveRequest {
                    from: player(),
                    to: glovebox.clone(),
                    from_slot: 1,
                    to_slot: 1,
                    count: 3,
                },
            )
            .await;
        assert_eq!(receipt.reason, Some("capacity_exceeded"));
        assert!(service.has_item(&player(), "water", 3).await.unwrap());

        // Exactly at the budget.
        let receipt = service
            .move_item(
                session,
                MoveRequest {
                    from: player(),
                    to: glovebox.clone(),
                    from_slot: 1,
                    to_slot: 1,
                    count: 2,
                },
            )
            .await;
        assert_eq!(receipt, MoveReceipt::ok());
        assert!(service.has_item(&player(), "water", 1).await.unwrap());
        assert!(service.has_item(&glovebox, "water", 2).await.unwrap());
    }

    #[tokio::test]
    async fn swap_needs_room_on_both_sides() {
        let (service, store, _sink) = service();
        let session = SessionId(104);
        let glovebox = ContainerKey::new(ContainerKind::Glovebox, "plate_RH02");

        // Glovebox holds a pistol and nothing else fits beyond it.
        store
            .put(&glovebox, &StoredContainer::empty(1_000))
            .await
            .unwrap();
        service.add_item(&glovebox, "pistol", 1, None).await.unwrap();
        service.add_item(&player(), "water", 3, None).await.unwrap();
        service
            .open_inventory(session, player(), Some(glovebox.clone()))
            .await
            .unwrap();

        // Swapping the 3-bottle stack (1500) into the 1000 budget fails;
        // the pistol coming back out would fit, but both sides must fit.
        let receipt = service
            .move_item(
                session,
                MoveRequest {
                    from: player(),
                    to: glovebox.clone(),
                    from_slot: 1,
                    to_slot: 1,
                    count: 3,
                },
            )
            .await;
        assert_eq!(receipt.reason, Some("capacity_exceeded"));
        assert!(service.has_item(&player(), "water", 3).await.unwrap());
        assert!(service.has_item(&glovebox, "pistol", 1).await.unwrap());
    }

    #[tokio::test]
    async fn sessions_only_reach_their_open_containers() {
        let (service, _store, _sink) = service();
        let session = SessionId(105);
        let stash = ContainerKey::new(ContainerKind::Stash, "gang_hideout");

        service.add_item(&player(), "rock", 4, None).await.unwrap();
        service
            .open_inventory(session, player(), None)
            .await
            .unwrap();

        // The stash was never opened by this session.
        let receipt = service
            .move_item(
                session,
                MoveRequest {
                    from: player(),
                    to: stash.clone(),
                    from_slot: 1,
                    to_slot: 1,
                    count: 4,
                },
            )
            .await;
        assert_eq!(receipt.reason, Some("session_closed"));

        // A session that never opened at all gets the same answer.
        let receipt = service
            .move_item(
                SessionId(9_999),
                MoveRequest {
                    from: player(),
                    to: player(),
                    from_slot: 1,
                    to_slot: 2,
                    count: 4,
                },
            )
            .await;
        assert_eq!(receipt.reason, Some("session_closed"));
        assert!(service.has_item(&player(), "rock", 4).await.unwrap());
    }

    #[tokio::test]
    async fn drop_containers_carry_items_between_players() {
        let (service, _store, _sink) = service();
        let drop = ContainerKey::new_drop();
        let finder = ContainerKey::player("license_xyz");

        // One player drops a pistol; another picks it up.
        service.add_item(&drop, "pistol", 1, None).await.unwrap();

        let session = SessionId(106);
        service
            .open_inventory(session, finder.clone(), Some(drop.clone()))
            .await
            .unwrap();
        let receipt = service
            .move_item(
                session,
                MoveRequest {
                    from: drop.clone(),
                    to: finder.clone(),
                    from_slot: 1,
                    to_slot: 1,
                    count: 1,
                },
            )
            .await;
        assert_eq!(receipt, MoveReceipt::ok());
        assert!(service.has_item(&finder, "pistol", 1).await.unwrap());
        assert!(!service.has_item(&drop, "pistol", 1).await.unwrap());

        // Emptied drop containers are deleted by the pickup script.
        service.delete_container(&drop).await.unwrap();
    }
}
