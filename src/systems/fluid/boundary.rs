/// Field-specific boundary policy against the obstacle mask
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryKind {
    /// Scalars: obstacle cells are zeroed
    Density,
    /// Horizontal velocity: reflected next to a left/right obstacle
    U,
    /// Vertical velocity: reflected next to an obstacle above/below
    V,
}

/// Apply `kind` to `field` in place. Neighbors outside the grid count as open.
/// Reflection scales the value by `-elasticity`; obstacle cells end up 0.
pub fn apply(kind: BoundaryKind, field: &mut [f32], obstacles: &[bool], width: usize, height: usize, elasticity: f32) {
    debug_assert_eq!(field.len(), width * height);
    debug_assert_eq!(obstacles.len(), field.len());

    let blocked = |x: isize, y: isize| -> bool {
        x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height && obstacles[x as usize + y as usize * width]
    };

    for y in 0..height {
        for x in 0..width {
            let idx = x + y * width;
            if obstacles[idx] {
                field[idx] = 0.0;
                continue;
            }
            let (xi, yi) = (x as isize, y as isize);
            let reflect = match kind {
                BoundaryKind::Density => false,
                BoundaryKind::U => blocked(xi - 1, yi) || blocked(xi + 1, yi),
                BoundaryKind::V => blocked(xi, yi - 1) || blocked(xi, yi + 1),
            };
            if reflect {
                field[idx] *= -elasticity;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obstacle_cells_are_zeroed() {
        let mut f = vec![1.0; 9];
        let mut obs = vec![false; 9];
        obs[4] = true;
        apply(BoundaryKind::Density, &mut f, &obs, 3, 3, 1.0);
        assert_eq!(f[4], 0.0);
        assert_eq!(f.iter().filter(|&&v| v == 1.0).count(), 8);
    }

    #[test]
    fn u_reflects_beside_and_v_above_below() {
        let mut obs = vec![false; 9];
        obs[4] = true; // center

        let mut u = vec![2.0; 9];
        apply(BoundaryKind::U, &mut u, &obs, 3, 3, 0.5);
        assert_eq!(u[3], -1.0); // left of center
        assert_eq!(u[5], -1.0);
        assert_eq!(u[1], 2.0); // above: untouched for u

        let mut v = vec![2.0; 9];
        apply(BoundaryKind::V, &mut v, &obs, 3, 3, 1.0);
        assert_eq!(v[1], -2.0);
        assert_eq!(v[7], -2.0);
        assert_eq!(v[3], 2.0);
    }

    #[test]
    fn grid_edge_is_not_an_obstacle() {
        let obs = vec![false; 4];
        let mut u = vec![1.0; 4];
        apply(BoundaryKind::U, &mut u, &obs, 2, 2, 1.0);
        assert!(u.iter().all(|&v| v == 1.0));
    }
}
