//! Spatial - coordinate systems and grid adjacency
//!
//! - world:    patch coordinate space <-> dense id space
//! - topology: lazily cached 8/4 neighbor lists with closed edges
//! - line:     integer line rasterization used by collision sampling

pub mod line;
pub mod topology;
pub mod world;

pub use line::LineWalk;
pub use topology::{NeighborCache, Neighborhood};
pub use world::{WorldBounds, WorldOptions};
