//! Patches - the fixed background grid as an agent set
//!
//! One agent per world cell, ids in row-major order from the top-left.
//! Own-variables live in `AgentSet` columns, colors in a `PixelBuffer` the
//! canvas can alias directly, labels in a sparse map.

use crate::core::{EngineError, Result};
use crate::domain::agentset::{AgentId, AgentSet, BreedId};
use crate::domain::color::{Color, ColorMap};
use crate::domain::patch::Patch;
use crate::render::DrawTarget;
use crate::spatial::{NeighborCache, Neighborhood, WorldBounds, WorldOptions};
use crate::systems::diffusion;

mod dataset_io;
mod geometry;
mod labels;
mod pixels;

pub use labels::{Label, Labels};
pub use pixels::{rgba_image, PixelBuffer};

/// Label text size in pixels
const LABEL_SIZE: f64 = 10.0;

pub struct Patches {
    world: WorldBounds,
    agents: AgentSet,
    pixels: PixelBuffer,
    labels: Labels,
    neighbors: NeighborCache,
    /// Diffusion shadow buffer, all zeros between sweeps
    diffuse_next: Vec<f64>,
}

impl Patches {
    pub fn new(world: WorldBounds) -> Self {
        let size = world.size();
        let mut patches = Self {
            world,
            agents: AgentSet::new("patches"),
            pixels: PixelBuffer::new(world.num_x, world.num_y),
            labels: Labels::new(),
            neighbors: NeighborCache::new(size),
            diffuse_next: vec![0.0; size],
        };
        patches.populate();
        patches
    }

    /// Create one patch per world cell
    fn populate(&mut self) {
        for _ in 0..self.world.size() {
            self.agents.add();
        }
    }

    #[inline]
    pub fn world(&self) -> &WorldBounds { &self.world }

    /// Change the on-screen patch size; ids, values and colors are untouched
    pub fn set_patch_size(&mut self, patch_size: u32) -> Result<()> {
        let w = &self.world;
        self.world = WorldBounds::new(&WorldOptions {
            patch_size,
            min_x: w.min_x,
            max_x: w.max_x,
            min_y: w.min_y,
            max_y: w.max_y,
        })?;
        Ok(())
    }

    #[inline]
    pub fn agents(&self) -> &AgentSet { &self.agents }

    #[inline]
    pub fn agents_mut(&mut self) -> &mut AgentSet { &mut self.agents }

    #[inline]
    pub fn pixels(&self) -> &PixelBuffer { &self.pixels }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut PixelBuffer { &mut self.pixels }

    #[inline]
    pub fn labels(&self) -> &Labels { &self.labels }

    #[inline]
    pub fn labels_mut(&mut self) -> &mut Labels { &mut self.labels }

    #[inline]
    pub fn len(&self) -> usize { self.world.size() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.world.size() == 0 }

    /// Borrowed view of one patch, `None` for an id past the last patch
    #[inline]
    pub fn get(&self, id: AgentId) -> Option<Patch<'_>> {
        ((id as usize) < self.world.size()).then(|| Patch::new(self, id))
    }

    pub fn ids(&self) -> std::ops::Range<AgentId> {
        0..self.world.size() as AgentId
    }

    // === Neighbors ===

    #[inline]
    pub fn neighbors(&self, id: AgentId) -> Result<&[AgentId]> {
        self.neighbors.get(&self.world, id, Neighborhood::Eight).ok_or(EngineError::UnknownAgent(id))
    }

    #[inline]
    pub fn neighbors4(&self, id: AgentId) -> Result<&[AgentId]> {
        self.neighbors.get(&self.world, id, Neighborhood::Four).ok_or(EngineError::UnknownAgent(id))
    }

    // === Colors / labels ===

    #[inline]
    pub fn color(&self, id: AgentId) -> Option<Color> {
        self.pixels.get(id as usize)
    }

    #[inline]
    pub fn set_color(&mut self, id: AgentId, color: Color) -> Result<()> {
        if self.pixels.set(id as usize, color) {
            Ok(())
        } else {
            Err(EngineError::UnknownAgent(id))
        }
    }

    pub fn label(&self, id: AgentId) -> Option<&str> {
        self.labels.get(id).map(|l| l.text.as_str())
    }

    /// Set a label, `None` erases it
    pub fn set_label(&mut self, id: AgentId, text: Option<&str>) {
        self.labels.set(id, text);
    }

    // === Variables / breeds ===

    /// Declare own-variables on the base patch set
    pub fn own(&mut self, names: &str) -> Result<()> {
        self.agents.own(BreedId::BASE, names)
    }

    #[inline]
    pub fn value(&self, id: AgentId, var: &str) -> Result<f64> {
        self.agents.get(id, var)
    }

    #[inline]
    pub fn set_value(&mut self, id: AgentId, var: &str, value: f64) -> Result<()> {
        self.agents.set(id, var, value)
    }

    /// Create (or look up) space-separated patch breeds
    pub fn patch_breeds(&mut self, names: &str) -> Vec<BreedId> {
        names.split_whitespace().map(|name| self.agents.breed(name)).collect()
    }

    pub fn set_breed(&mut self, id: AgentId, breed: BreedId) -> Result<()> {
        self.agents.set_breed(id, breed)
    }

    // === Diffusion ===

    /// 8-neighbor diffusion of `var`
    pub fn diffuse(&mut self, var: &str, rate: f64, color_map: Option<&ColorMap>, min: f64, max: f64) -> Result<()> {
        self.diffuse_n(8, var, rate, color_map, min, max)
    }

    /// 4-neighbor diffusion of `var`
    pub fn diffuse4(&mut self, var: &str, rate: f64, color_map: Option<&ColorMap>, min: f64, max: f64) -> Result<()> {
        self.diffuse_n(4, var, rate, color_map, min, max)
    }

    /// Give `rate` of each patch's `var` to its `n` neighbors (4 or 8), then
    /// optionally recolor every patch from its new value over [min, max].
    ///
    /// Every patch takes part, so `var` must be owned by the base patch set;
    /// a breed-only variable is rejected.
    pub fn diffuse_n(
        &mut self,
        n: u8,
        var: &str,
        rate: f64,
        color_map: Option<&ColorMap>,
        min: f64,
        max: f64,
    ) -> Result<()> {
        let kind = Neighborhood::from_count(n).ok_or(EngineError::InvalidNeighborCount(n))?;
        if !self.agents.owns(BreedId::BASE, var) {
            return Err(if self.agents.column(var).is_some() {
                EngineError::NotSharedVariable(var.to_string())
            } else {
                EngineError::UnknownVariable(var.to_string())
            });
        }
        let size = self.world.size();
        let values = &mut self.agents.column_mut(var)?[..size];
        diffusion::diffuse_n(&self.world, &self.neighbors, kind, values, &mut self.diffuse_next, rate);

        if let Some(map) = color_map {
            for (px, &v) in self.pixels.data_mut().iter_mut().zip(values.iter()) {
                *px = map.scale_color(v, min, max).to_pixel();
            }
        }
        Ok(())
    }

    // === Drawing ===

    /// Patch colors scaled up by the patch size, then labels on top
    pub fn draw(&self, target: &mut dyn DrawTarget) {
        target.put_pixels(self.pixels.width(), self.pixels.height(), self.pixels.data(), self.world.patch_size);
        for (id, label) in self.labels.iter() {
            let (x, y) = self.world.patch_index_to_xy(id as usize);
            let (px, py) = self.world.patch_xy_to_pixel_xy(x as f64, y as f64);
            target.draw_text(&label.text, px + label.offset.0, py + label.offset.1, label.color, LABEL_SIZE);
        }
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
