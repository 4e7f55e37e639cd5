//! Browser-only checks, run with `wasm-pack test --headless --firefox`
#![cfg(target_arch = "wasm32")]

use frogger_wasm::storage::{HighScoreStore, LocalStorageHighScore};
use frogger_wasm::util::to_time_string;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_storage_round_trips_the_high_score() {
    let mut store = LocalStorageHighScore::open("frogger-test-high-score").unwrap();
    store.save(0).unwrap();
    assert_eq!(store.load().unwrap(), 0);

    store.save(1250).unwrap();
    assert_eq!(store.load().unwrap(), 1250);

    let reopened = LocalStorageHighScore::open("frogger-test-high-score").unwrap();
    assert_eq!(reopened.load().unwrap(), 1250);
}

#[wasm_bindgen_test]
fn missing_key_reads_as_zero() {
    let store = LocalStorageHighScore::open("frogger-test-never-written").unwrap();
    assert_eq!(store.load().unwrap(), 0);
}

#[wasm_bindgen_test]
fn clock_formats_in_the_browser_too() {
    assert_eq!(to_time_string(120.0), "00:02:00");
}
