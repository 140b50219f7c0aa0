use thiserror::Error;

use crate::domain::agentset::AgentId;

/// Errors surfaced by the engine.
///
/// The wasm facade turns these into `JsValue` strings; native callers get the
/// typed variant.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid world bounds: {0}")]
    InvalidWorld(String),
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),
    #[error("`{0}` is not a variable of every patch")]
    NotSharedVariable(String),
    #[error("unknown breed `{0}`")]
    UnknownBreed(String),
    #[error("agent {0} does not exist")]
    UnknownAgent(AgentId),
    #[error("diffusion neighbor count must be 4 or 8, got {0}")]
    InvalidNeighborCount(u8),
    #[error("{0}: agent set is empty")]
    EmptyAgentSet(&'static str),
    #[error("{op}: requested {requested} agents but the set has {available}")]
    SampleTooLarge {
        op: &'static str,
        requested: usize,
        available: usize,
    },
    #[error("image buffer is {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    ImageSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("no arena is loaded")]
    ArenaMissing,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("image decode: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
