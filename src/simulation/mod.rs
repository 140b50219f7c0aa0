//! Simulation - models, their scheduling and the hockey game
//!
//! - animator: rate-limited step/draw scheduling driven by host frames
//! - model:    `Model` trait and the `ModelRunner` that owns world state
//! - demos:    fire, diffusion and wind models
//! - hockey:   charged-puck game with its level state machine

#[path = "perf/perf_timer.rs"]
mod perf_timer;

pub mod animator;
pub mod demos;
pub mod hockey;
pub mod model;

pub use animator::Animator;
pub use hockey::{GameState, HockeyConfig, HockeyGame, LevelConfig};
pub use model::{Model, ModelContext, ModelRunner};
pub use perf_timer::PerfTimer;
