//! Patch diffusion - share a fraction of each cell's value with its neighbors
//!
//! Two passes over the whole grid: pass 1 scatters every cell's contribution
//! into a shadow buffer, pass 2 commits it and zeroes the shadow. Every cell
//! reads pre-update values, so the result does not depend on visit order.
//!
//! Edge cells have fewer than `n` neighbors; the shares that would have gone
//! off-world stay with the cell (closed boundary).

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::spatial::{NeighborCache, Neighborhood, WorldBounds};

/// One diffusion sweep over `values` (indexed by patch id).
/// `next` is the shadow buffer; it must hold zeros on entry and is left zeroed.
pub fn diffuse_n(
    world: &WorldBounds,
    cache: &NeighborCache,
    kind: Neighborhood,
    values: &mut [f64],
    next: &mut [f64],
    rate: f64,
) {
    debug_assert_eq!(values.len(), world.size());
    debug_assert_eq!(next.len(), values.len());
    let n = kind.count();

    // Pass 1: scatter
    for (id, &value) in values.iter().enumerate() {
        let dv = value * rate;
        let dvn = dv / n as f64;
        let neighbors = cache.get(world, id as u32, kind).unwrap_or_default();
        next[id] += value - dv + (n - neighbors.len()) as f64 * dvn;
        for &nb in neighbors {
            next[nb as usize] += dvn;
        }
    }

    // Pass 2: commit
    let row = world.num_x as usize;
    #[cfg(feature = "parallel")]
    {
        values
            .par_chunks_mut(row)
            .zip(next.par_chunks_mut(row))
            .for_each(|(dst, src)| commit_row(dst, src));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for (dst, src) in values.chunks_mut(row).zip(next.chunks_mut(row)) {
            commit_row(dst, src);
        }
    }
}

#[inline]
fn commit_row(dst: &mut [f64], src: &mut [f64]) {
    for (d, s) in dst.iter_mut().zip(src.iter_mut()) {
        *d = *s;
        *s = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::WorldOptions;

    fn world(n: i32) -> WorldBounds {
        WorldBounds::new(&WorldOptions::centered(n, 1)).unwrap()
    }

    #[test]
    fn single_spike_spreads_evenly() {
        let w = world(2);
        let cache = NeighborCache::new(w.size());
        let mut values = vec![0.0; w.size()];
        let mut next = vec![0.0; w.size()];
        let center = w.patch_xy_to_index(0, 0);
        values[center] = 8.0;

        diffuse_n(&w, &cache, Neighborhood::Eight, &mut values, &mut next, 0.5);

        assert!((values[center] - 4.0).abs() < 1e-12);
        for &nb in cache.get(&w, center as u32, Neighborhood::Eight).unwrap() {
            assert!((values[nb as usize] - 0.5).abs() < 1e-12);
        }
        assert!(next.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn corner_keeps_missing_shares() {
        let w = world(2);
        let cache = NeighborCache::new(w.size());
        let mut values = vec![0.0; w.size()];
        let mut next = vec![0.0; w.size()];
        values[0] = 4.0;

        diffuse_n(&w, &cache, Neighborhood::Four, &mut values, &mut next, 1.0);

        // two of four shares leave the corner, two stay
        assert!((values[0] - 2.0).abs() < 1e-12);
        let total: f64 = values.iter().sum();
        assert!((total - 4.0).abs() < 1e-12);
    }
}
