//! Agentscape Engine - patch-grid agent models in WASM
//!
//! Architecture:
//! - core/       - errors, logging, RNG and numeric helpers
//! - spatial/    - world coordinates, neighbor topology, line walks
//! - domain/     - agent sets, patches, colors, datasets
//! - systems/    - diffusion, stable fluids, charges, arena collisions
//! - render/     - draw target interface and recorded draw commands
//! - simulation/ - animator, model runner, demos, hockey game
//! - api/        - wasm-bindgen facades

pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod render;
pub mod simulation;
pub mod api;

use wasm_bindgen::prelude::*;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// Thread pool for the rayon kernels, initialized from JS before use
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine: panic hook, console logger, banner
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    core::logging::init_logger();
    log::info!("Agentscape engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use api::wasm::{DemoWorld, Hockey};
pub use core::{EngineError, Result};
pub use domain::{AgentSet, Patches};
pub use simulation::{HockeyGame, Model, ModelRunner};
