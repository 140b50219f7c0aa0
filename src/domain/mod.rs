//! Domain - agents, patches and the data they carry
//!
//! - agentset: generic agent collection with breeds and SoA own-variables
//! - patches:  the patch grid built on an agent set, plus its pixel buffer
//! - patch:    borrowed single-patch view
//! - color:    packed colors and color maps
//! - dataset:  flat float fields for import/export and resampling

pub mod agentset;
pub mod color;
pub mod dataset;
pub mod patch;
pub mod patches;

pub use agentset::{AgentId, AgentSet, BreedId};
pub use color::{Color, ColorMap};
pub use dataset::DataSet;
pub use patch::Patch;
pub use patches::{PixelBuffer, Patches};
