//! Demo models built on the patch toolkit
//!
//! - fire:      patch breeds, 4-neighbor spread, color-map fading
//! - diffusion: own-variables, 8-neighbor diffusion, mouse flooding
//! - wind:      stable-fluids jet painted through the Jet color map

pub mod diffusion;
pub mod fire;
pub mod wind;

pub use diffusion::DiffusionModel;
pub use fire::FireModel;
pub use wind::WindModel;

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
