//! Fluid - stable-fluids solver on DataSet fields with an obstacle mask
//!
//! Per step: velocity (sources, diffuse, project, advect, project) then
//! density (sources, diffuse, advect). Fields are in dataset orientation:
//! x to the right, y (row) downward, velocities in cells per time unit.
//! Current/previous buffers are exchanged with `mem::swap`.

use std::mem;

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, Result};
use crate::domain::dataset::DataSet;

pub mod boundary;
pub mod solver;

pub use boundary::BoundaryKind;
use solver::Domain;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FluidParams {
    pub dt: f32,
    pub solver_iterations: usize,
    /// Density diffusion coefficient
    pub diffusion: f32,
    /// Velocity diffusion coefficient
    pub viscosity: f32,
    /// Fraction of velocity kept (and reversed) next to a wall
    pub elasticity: f32,
}

impl Default for FluidParams {
    fn default() -> Self {
        Self {
            dt: 1.0,
            solver_iterations: 12,
            diffusion: 1.0,
            viscosity: 1.0,
            elasticity: 1.0,
        }
    }
}

impl FluidParams {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

pub struct FluidSolver {
    width: usize,
    height: usize,
    params: FluidParams,
    density: DataSet,
    density_prev: DataSet,
    u: DataSet,
    u_prev: DataSet,
    v: DataSet,
    v_prev: DataSet,
    pressure: DataSet,
    divergence: DataSet,
    obstacles: Vec<bool>,
}

impl FluidSolver {
    pub fn new(width: usize, height: usize, params: FluidParams) -> Result<Self> {
        if width < 3 || height < 3 {
            return Err(EngineError::InvalidWorld(format!(
                "fluid grid {}x{} needs at least 3x3 cells",
                width, height
            )));
        }
        let field = || DataSet::empty(width, height);
        Ok(Self {
            width,
            height,
            params,
            density: field(),
            density_prev: field(),
            u: field(),
            u_prev: field(),
            v: field(),
            v_prev: field(),
            pressure: field(),
            divergence: field(),
            obstacles: vec![false; width * height],
        })
    }

    #[inline]
    pub fn width(&self) -> usize { self.width }

    #[inline]
    pub fn height(&self) -> usize { self.height }

    pub fn params(&self) -> &FluidParams { &self.params }

    pub fn params_mut(&mut self) -> &mut FluidParams { &mut self.params }

    pub fn density(&self) -> &DataSet { &self.density }

    pub fn density_prev(&self) -> &DataSet { &self.density_prev }

    pub fn u(&self) -> &DataSet { &self.u }

    pub fn v(&self) -> &DataSet { &self.v }

    pub fn pressure(&self) -> &DataSet { &self.pressure }

    pub fn divergence(&self) -> &DataSet { &self.divergence }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| x + y * self.width)
    }

    // === Obstacles ===

    pub fn set_obstacle(&mut self, x: usize, y: usize, blocked: bool) {
        if let Some(idx) = self.index(x, y) {
            self.obstacles[idx] = blocked;
        }
    }

    #[inline]
    pub fn is_obstacle(&self, x: usize, y: usize) -> bool {
        self.index(x, y).map(|i| self.obstacles[i]).unwrap_or(false)
    }

    pub fn obstacles(&self) -> &[bool] { &self.obstacles }

    /// Block the outermost ring of cells
    pub fn add_border_walls(&mut self) {
        let (w, h) = (self.width, self.height);
        for x in 0..w {
            self.obstacles[x] = true;
            self.obstacles[x + (h - 1) * w] = true;
        }
        for y in 0..h {
            self.obstacles[y * w] = true;
            self.obstacles[w - 1 + y * w] = true;
        }
    }

    pub fn clear_obstacles(&mut self) {
        self.obstacles.fill(false);
    }

    // === Sources ===

    /// Queue density to be added (times dt) on the next step
    pub fn add_density(&mut self, x: usize, y: usize, amount: f32) {
        if let Some(idx) = self.index(x, y) {
            self.density_prev.data_mut()[idx] += amount;
        }
    }

    /// Queue a velocity impulse for the next step
    pub fn add_velocity(&mut self, x: usize, y: usize, du: f32, dv: f32) {
        if let Some(idx) = self.index(x, y) {
            self.u_prev.data_mut()[idx] += du;
            self.v_prev.data_mut()[idx] += dv;
        }
    }

    /// Overwrite the current density of a cell
    pub fn set_density(&mut self, x: usize, y: usize, value: f32) {
        if let Some(idx) = self.index(x, y) {
            self.density.data_mut()[idx] = value;
        }
    }

    /// Overwrite the current velocity of a cell
    pub fn set_velocity(&mut self, x: usize, y: usize, u: f32, v: f32) {
        if let Some(idx) = self.index(x, y) {
            self.u.data_mut()[idx] = u;
            self.v.data_mut()[idx] = v;
        }
    }

    // === Buffer swaps ===

    pub fn swap_density(&mut self) {
        mem::swap(&mut self.density, &mut self.density_prev);
    }

    pub fn swap_velocity(&mut self) {
        mem::swap(&mut self.u, &mut self.u_prev);
        mem::swap(&mut self.v, &mut self.v_prev);
    }

    // === Stepping ===

    /// Full frame: velocity, density, then clear the source buffers
    pub fn step(&mut self) {
        self.velocity_step();
        self.density_step();
        self.density_prev.fill(0.0);
        self.u_prev.fill(0.0);
        self.v_prev.fill(0.0);
    }

    pub fn velocity_step(&mut self) {
        let FluidParams { dt, solver_iterations: iters, viscosity, elasticity, .. } = self.params;
        let dom = Domain { width: self.width, height: self.height, obstacles: &self.obstacles, elasticity };
        let a = dt * viscosity;

        solver::add_source(self.u.data_mut(), self.u_prev.data(), dt);
        solver::add_source(self.v.data_mut(), self.v_prev.data(), dt);

        mem::swap(&mut self.u, &mut self.u_prev);
        solver::diffuse(&dom, BoundaryKind::U, self.u.data_mut(), self.u_prev.data(), a, iters);
        mem::swap(&mut self.v, &mut self.v_prev);
        solver::diffuse(&dom, BoundaryKind::V, self.v.data_mut(), self.v_prev.data(), a, iters);

        solver::project(
            &dom,
            self.u.data_mut(),
            self.v.data_mut(),
            self.pressure.data_mut(),
            self.divergence.data_mut(),
            iters,
        );

        mem::swap(&mut self.u, &mut self.u_prev);
        mem::swap(&mut self.v, &mut self.v_prev);
        let (u0, v0) = (self.u_prev.data(), self.v_prev.data());
        solver::advect(&dom, BoundaryKind::U, self.u.data_mut(), u0, u0, v0, dt);
        solver::advect(&dom, BoundaryKind::V, self.v.data_mut(), v0, u0, v0, dt);

        solver::project(
            &dom,
            self.u.data_mut(),
            self.v.data_mut(),
            self.pressure.data_mut(),
            self.divergence.data_mut(),
            iters,
        );
    }

    pub fn density_step(&mut self) {
        let FluidParams { dt, solver_iterations: iters, diffusion, elasticity, .. } = self.params;
        let dom = Domain { width: self.width, height: self.height, obstacles: &self.obstacles, elasticity };

        solver::add_source(self.density.data_mut(), self.density_prev.data(), dt);
        mem::swap(&mut self.density, &mut self.density_prev);
        solver::diffuse(
            &dom,
            BoundaryKind::Density,
            self.density.data_mut(),
            self.density_prev.data(),
            dt * diffusion,
            iters,
        );
        mem::swap(&mut self.density, &mut self.density_prev);
        solver::advect(
            &dom,
            BoundaryKind::Density,
            self.density.data_mut(),
            self.density_prev.data(),
            self.u.data(),
            self.v.data(),
            dt,
        );
    }

    /// Project the current velocity onto its divergence-free part
    pub fn project(&mut self) {
        let dom = Domain {
            width: self.width,
            height: self.height,
            obstacles: &self.obstacles,
            elasticity: self.params.elasticity,
        };
        solver::project(
            &dom,
            self.u.data_mut(),
            self.v.data_mut(),
            self.pressure.data_mut(),
            self.divergence.data_mut(),
            self.params.solver_iterations,
        );
    }

    /// Sum of |div| of the current velocity over interior open cells
    pub fn divergence_norm(&self) -> f64 {
        let dom = Domain { width: self.width, height: self.height, obstacles: &self.obstacles, elasticity: 1.0 };
        let mut div = vec![0.0; self.width * self.height];
        solver::divergence(&dom, self.u.data(), self.v.data(), &mut div);
        div.iter()
            .zip(&self.obstacles)
            .filter(|(_, &blocked)| !blocked)
            .map(|(&d, _)| d.abs() as f64)
            .sum()
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
