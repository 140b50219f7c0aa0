//! Core - crate-wide plumbing
//!
//! - error:   EngineError + Result alias shared by every module
//! - logging: `log` facade backend that writes to the browser console
//! - utils:   deterministic RNG and small numeric helpers

pub mod error;
pub mod logging;
pub mod utils;

pub use error::{EngineError, Result};
