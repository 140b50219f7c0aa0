//! Stable-fluids kernels on flat f32 fields (one cell = one grid unit)
//!
//! Rows that only read other buffers (source add, advection, divergence,
//! gradient correction) run row-parallel with the `parallel` feature. The
//! Gauss-Seidel relaxations update in place and stay sequential.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::boundary::{self, BoundaryKind};

/// Grid shape, obstacle mask and wall elasticity shared by every kernel
#[derive(Clone, Copy)]
pub struct Domain<'a> {
    pub width: usize,
    pub height: usize,
    pub obstacles: &'a [bool],
    pub elasticity: f32,
}

impl Domain<'_> {
    #[inline]
    fn bound(&self, kind: BoundaryKind, field: &mut [f32]) {
        boundary::apply(kind, field, self.obstacles, self.width, self.height, self.elasticity);
    }

    #[inline]
    fn has_interior(&self) -> bool {
        self.width > 2 && self.height > 2
    }
}

/// x += s * dt
pub fn add_source(x: &mut [f32], s: &[f32], dt: f32) {
    #[cfg(feature = "parallel")]
    x.par_iter_mut().zip(s.par_iter()).for_each(|(x, &s)| *x += s * dt);
    #[cfg(not(feature = "parallel"))]
    x.iter_mut().zip(s.iter()).for_each(|(x, &s)| *x += s * dt);
}

/// Implicit diffusion by Gauss-Seidel relaxation: x = (x0 + a * sum(nbrs)) / (1 + 4a)
pub fn diffuse(dom: &Domain, kind: BoundaryKind, x: &mut [f32], x0: &[f32], a: f32, iterations: usize) {
    x.copy_from_slice(x0);
    if dom.has_interior() {
        let w = dom.width;
        let c_inv = 1.0 / (1.0 + 4.0 * a);
        for _ in 0..iterations {
            for j in 1..dom.height - 1 {
                for i in 1..w - 1 {
                    let idx = i + j * w;
                    let nbrs = x[idx - 1] + x[idx + 1] + x[idx - w] + x[idx + w];
                    x[idx] = (x0[idx] + a * nbrs) * c_inv;
                }
            }
            dom.bound(kind, x);
        }
    }
    dom.bound(kind, x);
}

/// Semi-Lagrangian advection: each cell pulls `d0` from where the flow came
/// from, `dt` earlier. Back-traces leaving the grid read 0.
pub fn advect(dom: &Domain, kind: BoundaryKind, d: &mut [f32], d0: &[f32], u: &[f32], v: &[f32], dt: f32) {
    let (w, h) = (dom.width, dom.height);
    let (max_x, max_y) = ((w - 1) as f32, (h - 1) as f32);
    let sample = |i: usize, j: usize| -> f32 {
        let idx = i + j * w;
        let x = i as f32 - dt * u[idx];
        let y = j as f32 - dt * v[idx];
        if !(x >= 0.0 && y >= 0.0 && x <= max_x && y <= max_y) {
            return 0.0;
        }
        bilinear(d0, w, h, x, y)
    };

    #[cfg(feature = "parallel")]
    d.par_chunks_mut(w).enumerate().for_each(|(j, row)| {
        for (i, cell) in row.iter_mut().enumerate() {
            *cell = sample(i, j);
        }
    });
    #[cfg(not(feature = "parallel"))]
    d.chunks_mut(w).enumerate().for_each(|(j, row)| {
        for (i, cell) in row.iter_mut().enumerate() {
            *cell = sample(i, j);
        }
    });

    dom.bound(kind, d);
}

#[inline]
fn bilinear(f: &[f32], w: usize, h: usize, x: f32, y: f32) -> f32 {
    let i0 = x.floor() as usize;
    let j0 = y.floor() as usize;
    let i1 = (i0 + 1).min(w - 1);
    let j1 = (j0 + 1).min(h - 1);
    let s1 = x - i0 as f32;
    let t1 = y - j0 as f32;
    let (s0, t0) = (1.0 - s1, 1.0 - t1);
    s0 * (t0 * f[i0 + j0 * w] + t1 * f[i0 + j1 * w]) + s1 * (t0 * f[i1 + j0 * w] + t1 * f[i1 + j1 * w])
}

/// Pressure projection in its three fixed substeps
pub fn project(dom: &Domain, u: &mut [f32], v: &mut [f32], p: &mut [f32], div: &mut [f32], iterations: usize) {
    if !dom.has_interior() {
        return;
    }
    divergence(dom, u, v, div);
    p.fill(0.0);
    dom.bound(BoundaryKind::Density, div);
    dom.bound(BoundaryKind::Density, p);

    relax_pressure(dom, p, div, iterations);

    subtract_gradient(dom, u, v, p);
    dom.bound(BoundaryKind::U, u);
    dom.bound(BoundaryKind::V, v);
}

/// Step 1: div = -0.5 * (du/dx + dv/dy), interior only
pub fn divergence(dom: &Domain, u: &[f32], v: &[f32], div: &mut [f32]) {
    let (w, h) = (dom.width, dom.height);
    let row = |j: usize, out: &mut [f32]| {
        if j == 0 || j == h - 1 {
            out.fill(0.0);
            return;
        }
        out[0] = 0.0;
        out[w - 1] = 0.0;
        for i in 1..w - 1 {
            let idx = i + j * w;
            out[i] = -0.5 * (u[idx + 1] - u[idx - 1] + v[idx + w] - v[idx - w]);
        }
    };

    #[cfg(feature = "parallel")]
    div.par_chunks_mut(w).enumerate().for_each(|(j, out)| row(j, out));
    #[cfg(not(feature = "parallel"))]
    div.chunks_mut(w).enumerate().for_each(|(j, out)| row(j, out));
}

/// Step 2: Gauss-Seidel on 4p - sum(nbrs) = div
fn relax_pressure(dom: &Domain, p: &mut [f32], div: &[f32], iterations: usize) {
    let w = dom.width;
    for _ in 0..iterations {
        for j in 1..dom.height - 1 {
            for i in 1..w - 1 {
                let idx = i + j * w;
                p[idx] = (div[idx] + p[idx - 1] + p[idx + 1] + p[idx - w] + p[idx + w]) * 0.25;
            }
        }
        dom.bound(BoundaryKind::Density, p);
    }
}

/// Step 3: u -= dp/dx, v -= dp/dy (central differences), interior only
fn subtract_gradient(dom: &Domain, u: &mut [f32], v: &mut [f32], p: &[f32]) {
    let (w, h) = (dom.width, dom.height);
    let row = |j: usize, urow: &mut [f32], vrow: &mut [f32]| {
        if j == 0 || j == h - 1 {
            return;
        }
        for i in 1..w - 1 {
            let idx = i + j * w;
            urow[i] -= 0.5 * (p[idx + 1] - p[idx - 1]);
            vrow[i] -= 0.5 * (p[idx + w] - p[idx - w]);
        }
    };

    #[cfg(feature = "parallel")]
    u.par_chunks_mut(w)
        .zip(v.par_chunks_mut(w))
        .enumerate()
        .for_each(|(j, (urow, vrow))| row(j, urow, vrow));
    #[cfg(not(feature = "parallel"))]
    u.chunks_mut(w)
        .zip(v.chunks_mut(w))
        .enumerate()
        .for_each(|(j, (urow, vrow))| row(j, urow, vrow));
}
