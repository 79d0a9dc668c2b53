#![cfg(target_arch = "wasm32")]

use core_nav::NavWorld;
use wasm_bindgen_test::*;

const WORLD: &str = r#"{
    "grid": { "origin": [0.0, 0.0], "extent": [10.0, 10.0], "cell_radius": 1.0 }
}"#;

#[wasm_bindgen_test]
fn test_world_builds_from_json() {
    let world = NavWorld::new(WORLD.to_string()).unwrap();
    assert_eq!(world.grid_width(), 5);
    assert_eq!(world.grid_height(), 5);
    assert_eq!(world.cell_count(), 25);
}

#[wasm_bindgen_test]
fn test_find_path_returns_object() {
    let world = NavWorld::new(WORLD.to_string()).unwrap();
    let value = world.find_path(-4.0, -4.0, 4.0, -4.0).unwrap();
    assert!(value.is_object());
}

#[wasm_bindgen_test]
fn test_bad_config_is_rejected() {
    assert!(NavWorld::new("{}".to_string()).is_err());
}
