//! Cross-module integration tests exercising the inventory service through
//! its public API over the shipped adapters.

pub mod flows;
pub mod persistence;

use redhorn_inventory::ItemCatalog;

/// Install a global tracing subscriber honoring `RUST_LOG`. Safe to call
/// from every test; only the first call wins.
#[cfg(test)]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Catalog used across the integration suite, loaded the way a server
/// would load it from a data file.
pub fn test_catalog() -> ItemCatalog {
    ItemCatalog::from_json_str(
        r#"[
        {
            "name": "rock",
            "label": "Rock",
            "weight": 10,
            "stackable": true,
            "max_stack": 5,
            "usable": false,
            "category": "misc"
        },
        {
            "name": "bandage",
            "label": "Bandage",
            "description": "Stops bleeding",
            "weight": 100,
            "stackable": true,
            "max_stack": 10,
            "usable": true,
            "category": "medical"
        },
        {
            "name": "water",
            "label": "Water Bottle",
            "weight": 500,
            "stackable": true,
            "max_stack": 6,
            "usable": true,
            "category": "drink"
        },
        {
            "name": "pistol",
            "label": "Pistol",
            "weight": 1000,
            "stackable": false,
            "max_stack": 1,
            "usable": true,
            "unique": true,
            "category": "weapon"
        },
        {
            "name": "pistol_ammo",
            "label": "9mm Rounds",
            "weight": 2,
            "stackable": true,
            "max_stack": 50,
            "usable": false,
            "category": "ammo"
        }
    ]"#,
    )
    .expect("integration catalog parses")
}
