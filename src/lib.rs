// ==================== Imports ====================
use wasm_bindgen::prelude::*;

#[macro_use]
mod browser;
pub mod config;
pub mod engine;
pub mod game;
pub mod session;
pub mod sprite;
pub mod storage;
pub mod util;

use engine::GameLoop;
use game::Frogger;

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - installs the panic hook
/// - loads images and config
/// - starts the game loop
#[wasm_bindgen(start)]
pub fn main_js() -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();

    // spawns a new asynchronous task in local thread, for web assembly
    // environment, using wasm_bindgen_futures
    browser::spawn_local(async move {
        if let Err(err) = GameLoop::start(Frogger::new()).await {
            error!("Could not start game loop : {:#}", err);
        }
    });

    Ok(())
}
