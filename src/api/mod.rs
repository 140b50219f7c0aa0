//! API - JavaScript-facing facades
//!
//! Thin `#[wasm_bindgen]` wrappers that own a runner plus the draw commands
//! of its last frame. Engine errors cross the boundary as strings.

pub mod wasm;

pub use wasm::{DemoWorld, Hockey};
