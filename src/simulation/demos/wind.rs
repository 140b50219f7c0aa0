//! Wind: a stable-fluids jet blowing from the world center along a
//! settable heading, past a wavy obstacle band and the border walls.
//!
//! The solver grid is the patch grid in dataset orientation, so a cell
//! index equals the patch id.

use log::info;

use crate::core::{EngineError, Result};
use crate::domain::color::{Color, ColorMap};
use crate::render::{DrawTarget, Path};
use crate::simulation::model::{Model, ModelContext};
use crate::spatial::world::{WorldBounds, WorldOptions};
use crate::systems::fluid::{FluidParams, FluidSolver};

/// Density painted on obstacle cells
pub const OBSTACLE_DENSITY: f64 = 4.0;
pub const JET_SPEED: f32 = 10.0;
pub const LOG_EVERY: u64 = 30;
pub const STOP_TICK: u64 = 600;
/// Velocity vectors are drawn on every 5th patch in x and y
const VECTOR_SPACING: i32 = 5;

pub struct WindModel {
    params: FluidParams,
    /// Jet direction in radians, dataset orientation (y down)
    heading: f64,
    color_map: ColorMap,
    solver: Option<FluidSolver>,
    draw_vectors: bool,
}

impl WindModel {
    pub fn new(params: FluidParams) -> Self {
        Self {
            params,
            heading: std::f64::consts::FRAC_PI_2,
            color_map: ColorMap::jet(),
            solver: None,
            draw_vectors: true,
        }
    }

    pub fn world() -> WorldOptions {
        WorldOptions::centered(64, 4)
    }

    pub fn heading(&self) -> f64 { self.heading }

    pub fn set_heading(&mut self, heading: f64) {
        self.heading = heading;
    }

    pub fn set_draw_vectors(&mut self, on: bool) {
        self.draw_vectors = on;
    }

    pub fn solver(&self) -> Option<&FluidSolver> {
        self.solver.as_ref()
    }

    fn solver_mut(&mut self) -> Result<&mut FluidSolver> {
        self.solver.as_mut().ok_or_else(|| EngineError::InvalidWorld("wind model is not set up".to_string()))
    }

    /// Wavy band `0 < y - (34 cos(x/9) + 21 + 4 sin x) < 20` plus the border
    fn carve_obstacles(solver: &mut FluidSolver, world: &WorldBounds) {
        for y in world.min_y..=world.max_y {
            for x in world.min_x..=world.max_x {
                let xf = x as f64;
                let wave = (xf / 9.0).cos() * 34.0 + 21.0 + xf.sin() * 4.0;
                let diff = y as f64 - wave;
                let border = x <= world.min_x || x >= world.max_x || y <= world.min_y || y >= world.max_y;
                if (diff > 0.0 && diff < 20.0) || border {
                    solver.set_obstacle((x - world.min_x) as usize, (world.max_y - y) as usize, true);
                }
            }
        }
    }

    /// 4x4 lattice of jet cells, every other cell from the center
    fn add_forces(&mut self, world: &WorldBounds) -> Result<()> {
        let (cx, cy) = ((world.max_x - world.min_x) as usize / 2, (world.max_y - world.min_y) as usize / 2);
        let (u, v) = (JET_SPEED * self.heading.cos() as f32, JET_SPEED * self.heading.sin() as f32);
        let solver = self.solver_mut()?;
        for i in (0..=6).step_by(2) {
            for j in (0..=6).step_by(2) {
                solver.set_density(cx + i, cy + j, 1.0);
                solver.set_velocity(cx + i, cy + j, u, v);
            }
        }
        Ok(())
    }

    fn velocity_paths(&self, ctx: &ModelContext) -> Option<Path> {
        let solver = self.solver.as_ref()?;
        let world = ctx.world();
        let mut path = Path::new().stroke(Color::BLACK, 1.0);
        for y in world.min_y..=world.max_y {
            for x in world.min_x..=world.max_x {
                if x.rem_euclid(VECTOR_SPACING) != 0 || y.rem_euclid(VECTOR_SPACING) != 0 {
                    continue;
                }
                let (dx, dy) = ((x - world.min_x) as usize, (world.max_y - y) as usize);
                let (u, v) = (solver.u().get_xy(dx, dy) as f64, solver.v().get_xy(dx, dy) as f64);
                let (x0, y0) = world.patch_xy_to_pixel_xy(x as f64, y as f64);
                let (x1, y1) = world.patch_xy_to_pixel_xy(x as f64 + u, y as f64 - v);
                path = path.move_to(x0, y0).line_to(x1, y1);
            }
        }
        Some(path)
    }
}

impl Default for WindModel {
    fn default() -> Self {
        Self::new(FluidParams::default())
    }
}

impl Model for WindModel {
    fn setup(&mut self, ctx: &mut ModelContext) -> Result<()> {
        ctx.anim.set_rate(60.0);
        ctx.patches.own("dens")?;
        let world = *ctx.world();
        let mut solver = FluidSolver::new(world.num_x as usize, world.num_y as usize, self.params.clone())?;
        Self::carve_obstacles(&mut solver, &world);
        self.solver = Some(solver);
        Ok(())
    }

    fn step(&mut self, ctx: &mut ModelContext) -> Result<()> {
        let world = *ctx.world();
        self.add_forces(&world)?;
        let solver = self.solver_mut()?;
        solver.step();

        let size = world.size();
        let dens = &mut ctx.patches.agents_mut().column_mut("dens")?[..size];
        for ((d, &rho), &blocked) in dens.iter_mut().zip(solver.density().data()).zip(solver.obstacles()) {
            *d = if blocked { OBSTACLE_DENSITY } else { rho as f64 };
        }
        ctx.patches.scale_colors("dens", &self.color_map, 0.0, 1.0)?;

        let ticks = ctx.anim.ticks();
        if ticks % LOG_EVERY == 0 {
            info!("{}", ctx.anim);
        }
        if ticks == STOP_TICK {
            ctx.anim.stop();
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &ModelContext, target: &mut dyn DrawTarget) {
        ctx.patches.draw(target);
        if self.draw_vectors {
            if let Some(path) = self.velocity_paths(ctx) {
                target.draw_paths(&[path]);
            }
        }
    }
}
