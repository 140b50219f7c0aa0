//! Systems - the numerical kernels models are built from
//!
//! - diffusion: two-pass neighbor diffusion over a patch variable
//! - fluid:     stable-fluids solver with obstacle boundaries
//! - charges:   Coulomb field, puck integrators and the field overlay
//! - arena:     image classification mask and puck collision sweep

pub mod arena;
pub mod charges;
pub mod diffusion;
pub mod fluid;
