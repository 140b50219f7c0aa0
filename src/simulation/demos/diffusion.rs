//! Diffusion playground: random `ran` values spread over 8 neighbors and
//! are painted through the 256-color cube. A held mouse floods a disc.

use log::info;

use crate::core::Result;
use crate::domain::color::ColorMap;
use crate::simulation::model::{Model, ModelContext};
use crate::spatial::world::WorldOptions;

pub const RATE: f64 = 0.05;
pub const MOUSE_RADIUS: i32 = 4;
pub const STOP_TICK: u64 = 500;

pub struct DiffusionModel {
    color_map: ColorMap,
    /// Mouse position in patch coordinates while the button is down
    mouse: Option<(f64, f64)>,
}

impl DiffusionModel {
    pub fn new() -> Self {
        Self { color_map: ColorMap::rgb256(), mouse: None }
    }

    pub fn world() -> WorldOptions {
        WorldOptions { patch_size: 2, min_x: -200, max_x: 200, min_y: -100, max_y: 100 }
    }

    pub fn set_mouse(&mut self, mouse: Option<(f64, f64)>) {
        self.mouse = mouse;
    }
}

impl Default for DiffusionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for DiffusionModel {
    fn setup(&mut self, ctx: &mut ModelContext) -> Result<()> {
        ctx.anim.set_rate(60.0);
        ctx.patches.own("ran ds")?;
        for id in ctx.patches.ids() {
            let ran = ctx.rng.next_f64();
            ctx.patches.set_value(id, "ran", ran)?;
        }
        Ok(())
    }

    fn step(&mut self, ctx: &mut ModelContext) -> Result<()> {
        if let Some((x, y)) = self.mouse {
            if let Some(center) = ctx.patches.patch(x, y) {
                for id in ctx.patches.in_radius(center, MOUSE_RADIUS, true) {
                    ctx.patches.set_value(id, "ran", 1.0)?;
                }
            }
        }
        ctx.patches.diffuse("ran", RATE, Some(&self.color_map), 0.0, 1.0)?;
        if ctx.anim.ticks() == STOP_TICK {
            info!("{}", ctx.anim);
            ctx.anim.stop();
        }
        Ok(())
    }
}
