//! Public API surface tests
//!
//! Exercises the `pantrydb` facade end to end: lifecycle, CRUD with
//! revision tracking, file-backed persistence across reopen, legacy data
//! migration, change notifications, and low-stock queries.

use pantrydb::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Route store logs through the test harness so `--nocapture` shows what
/// the migration and read paths warned about.
fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

// ============================================================================
// Lifecycle
// ============================================================================

mod lifecycle {
    use super::*;

    #[test]
    fn ephemeral_store_starts_empty() {
        let db = Pantry::ephemeral();
        assert!(db.items.all().is_empty());
        assert_eq!(db.items.revision(), 0);
        assert_eq!(db.items.schema_version(), SCHEMA_VERSION);
    }

    #[test]
    fn open_creates_the_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("pantry");
        let _db = Pantry::open(&root).unwrap();
        assert!(root.exists());
    }

    #[test]
    fn builder_configures_the_store() {
        let db = Pantry::builder()
            .storage_key("household_inventory")
            .max_retries(5)
            .low_stock_threshold(1.0)
            .open()
            .unwrap();
        db.items.add(InventoryItem::new("Milk", 2.0, "Fridge")).unwrap();
        assert_eq!(db.items.revision(), 1);
        // Threshold of 1.0: a quantity of 2.0 is not low.
        assert!(db.items.low_stock().is_empty());
    }
}

// ============================================================================
// CRUD and revision tracking
// ============================================================================

mod crud {
    use super::*;

    #[test]
    fn add_update_remove_walkthrough() {
        let db = Pantry::ephemeral();

        let milk = db.items.create("Milk", 1.0, "Fridge").unwrap();
        let t0 = milk.date_updated;
        assert_eq!(db.items.revision(), 1);
        assert_eq!(db.items.all().len(), 1);

        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(db.items.update(milk.id, &ItemPatch::quantity(0.0)).unwrap());
        assert_eq!(db.items.revision(), 2);
        let updated = &db.items.all()[0];
        assert_eq!(updated.quantity, 0.0);
        assert_ne!(updated.date_updated, t0);
        assert_eq!(updated.date_added, milk.date_added);

        assert!(db.items.remove(milk.id).unwrap());
        assert_eq!(db.items.revision(), 3);
        assert!(db.items.all().is_empty());
    }

    #[test]
    fn update_on_missing_id_returns_false_without_commit() {
        let db = Pantry::ephemeral();
        db.items.create("Milk", 1.0, "Fridge").unwrap();
        assert!(!db.items.update(Uuid::new_v4(), &ItemPatch::quantity(9.0)).unwrap());
        assert!(!db.items.remove(Uuid::new_v4()).unwrap());
        assert_eq!(db.items.revision(), 1);
    }

    #[test]
    fn set_all_replaces_wholesale() {
        let db = Pantry::ephemeral();
        db.items.create("Old", 1.0, "Shelf").unwrap();
        db.items
            .set_all(vec![
                InventoryItem::new("Flour", 1.0, "Pantry"),
                InventoryItem::new("Rice", 2.0, "Pantry"),
            ])
            .unwrap();
        let names: Vec<_> = db.items.all().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Flour", "Rice"]);
        assert_eq!(db.items.revision(), 2);
    }

    #[test]
    fn validation_errors_carry_field_feedback() {
        let db = Pantry::ephemeral();
        let err = db.items.create("", -1.0, "").unwrap_err();
        assert!(err.is_validation());
        assert!(!err.is_retryable());
        match err {
            Error::Validation(v) => {
                assert_eq!(v.fields(), vec!["name", "quantity", "location"]);
            }
            other => panic!("expected validation error, got {other}"),
        }
        assert_eq!(db.items.revision(), 0);
    }
}

// ============================================================================
// Persistence
// ============================================================================

mod persistence {
    use super::*;

    #[test]
    fn data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let id = {
            let db = Pantry::open(dir.path()).unwrap();
            let milk = db.items.create("Milk", 2.0, "Fridge").unwrap();
            db.items.update(milk.id, &ItemPatch::quantity(1.0)).unwrap();
            milk.id
        };

        let db = Pantry::open(dir.path()).unwrap();
        assert_eq!(db.items.revision(), 2);
        let items = db.items.all();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, id);
        assert_eq!(items[0].quantity, 1.0);
    }

    #[test]
    fn two_handles_share_one_substrate() {
        let dir = TempDir::new().unwrap();
        let a = Pantry::open(dir.path()).unwrap();
        let b = Pantry::open(dir.path()).unwrap();

        let milk = a.items.create("Milk", 1.0, "Fridge").unwrap();
        assert_eq!(b.items.all().len(), 1);

        // Serial writers interleave cleanly: each commit bumps the shared
        // revision by one.
        b.items.update(milk.id, &ItemPatch::quantity(5.0)).unwrap();
        a.items.create("Eggs", 12.0, "Fridge").unwrap();
        assert_eq!(a.items.revision(), 3);
        assert_eq!(b.items.all().len(), 2);
        assert_eq!(b.items.all()[0].quantity, 5.0);
    }

    #[test]
    fn corrupt_stored_data_degrades_to_empty() {
        init_tracing();
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("inventory_items.json"), "not json at all").unwrap();
        let db = Pantry::open(dir.path()).unwrap();
        assert!(db.items.all().is_empty());
        assert_eq!(db.items.revision(), 0);
        // The store is writable again immediately.
        db.items.create("Milk", 1.0, "Fridge").unwrap();
        assert_eq!(db.items.revision(), 1);
    }
}

// ============================================================================
// Legacy migration
// ============================================================================

mod migration {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_array_is_accepted_and_rewrapped() {
        init_tracing();
        let dir = TempDir::new().unwrap();
        let legacy = json!([
            {
                "id": "7f2c1b8e-4a3d-4e6f-9b0a-1c2d3e4f5a6b",
                "name": "Milk",
                "quantity": 1,
                "location": "Fridge"
            },
            {"invalid": true},
            {
                "id": "0a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9",
                "name": "Eggs",
                "quantity": 12,
                "location": "Fridge",
                "tags": ["breakfast"]
            }
        ]);
        std::fs::write(
            dir.path().join("inventory_items.json"),
            legacy.to_string(),
        )
        .unwrap();

        let db = Pantry::open(dir.path()).unwrap();
        let items = db.items.all();
        // The invalid element was dropped, not corrected.
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Milk");
        assert_eq!(items[1].tags.as_deref(), Some(&["breakfast".to_string()][..]));
        assert_eq!(db.items.revision(), 0);

        // The first mutation persists the migrated data as an envelope.
        db.items.create("Flour", 1.0, "Pantry").unwrap();
        assert_eq!(db.items.revision(), 1);
        let raw = std::fs::read_to_string(dir.path().join("inventory_items.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["schemaVersion"], json!(SCHEMA_VERSION));
        assert_eq!(value["revision"], json!(1));
        assert_eq!(value["items"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn envelope_on_disk_is_read_back_verbatim() {
        let dir = TempDir::new().unwrap();
        let envelope = json!({
            "schemaVersion": 1,
            "revision": 41,
            "items": [{
                "id": "7f2c1b8e-4a3d-4e6f-9b0a-1c2d3e4f5a6b",
                "name": "Milk",
                "quantity": 1,
                "location": "Fridge",
                "dateAdded": "2026-02-03T10:00:00Z",
                "dateUpdated": "2026-02-03T10:00:00Z"
            }]
        });
        std::fs::write(
            dir.path().join("inventory_items.json"),
            envelope.to_string(),
        )
        .unwrap();

        let db = Pantry::open(dir.path()).unwrap();
        assert_eq!(db.items.revision(), 41);
        db.items.create("Eggs", 12.0, "Fridge").unwrap();
        assert_eq!(db.items.revision(), 42);
    }
}

// ============================================================================
// Change notification
// ============================================================================

mod notifications {
    use super::*;

    #[test]
    fn every_commit_signals_once() {
        let db = Pantry::ephemeral();
        let signals = Arc::new(AtomicU32::new(0));
        {
            let signals = signals.clone();
            db.items.on_change(move || {
                signals.fetch_add(1, Ordering::SeqCst);
            });
        }

        let milk = db.items.create("Milk", 1.0, "Fridge").unwrap();
        db.items.update(milk.id, &ItemPatch::quantity(2.0)).unwrap();
        db.items.remove(milk.id).unwrap();
        assert_eq!(signals.load(Ordering::SeqCst), 3);

        // Reads and no-op mutations stay silent.
        db.items.all();
        db.items.remove(milk.id).unwrap();
        assert_eq!(signals.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn store_instances_do_not_cross_signal() {
        let a = Pantry::ephemeral();
        let b = Pantry::ephemeral();
        let signals = Arc::new(AtomicU32::new(0));
        {
            let signals = signals.clone();
            a.items.on_change(move || {
                signals.fetch_add(1, Ordering::SeqCst);
            });
        }
        b.items.create("Milk", 1.0, "Fridge").unwrap();
        assert_eq!(signals.load(Ordering::SeqCst), 0);
    }
}

// ============================================================================
// Low stock
// ============================================================================

mod low_stock {
    use super::*;

    #[test]
    fn global_default_applies_when_item_has_no_threshold() {
        let db = Pantry::builder().low_stock_threshold(3.0).open().unwrap();
        db.items.create("Milk", 2.0, "Fridge").unwrap();
        db.items.create("Rice", 10.0, "Pantry").unwrap();

        let names: Vec<_> = db.items.low_stock().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Milk"]);
    }

    #[test]
    fn per_item_threshold_wins_over_global() {
        let db = Pantry::builder().low_stock_threshold(0.0).open().unwrap();
        let mut bulbs = InventoryItem::new("Bulbs", 4.0, "Closet");
        bulbs.low_stock_threshold = Some(6.0);
        db.items.add(bulbs).unwrap();
        db.items.create("Rice", 4.0, "Pantry").unwrap();

        let names: Vec<_> = db.items.low_stock().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Bulbs"]);
    }
}
