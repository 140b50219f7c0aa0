/// Integer line walk between two points (Bresenham error term, 4-connected)
///
/// Each step moves along exactly one axis, so the walk never slips diagonally
/// between two blocked pixels. Endpoints are rounded to the nearest pixel and
/// both are included. A line of extents (dx, dy) yields `dx + dy + 1` points.
#[derive(Clone, Debug)]
pub struct LineWalk {
    x: i32,
    y: i32,
    x_end: i32,
    y_end: i32,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    remaining: u32,
}

impl LineWalk {
    pub fn new(start_x: f64, start_y: f64, end_x: f64, end_y: f64) -> Self {
        let x = start_x.round() as i32;
        let y = start_y.round() as i32;
        let x_end = end_x.round() as i32;
        let y_end = end_y.round() as i32;
        let dx = (x_end - x).abs();
        let dy = (y_end - y).abs();
        Self {
            x,
            y,
            x_end,
            y_end,
            dx,
            dy,
            sx: if x < x_end { 1 } else { -1 },
            sy: if y < y_end { 1 } else { -1 },
            err: dx - dy,
            remaining: (dx + dy + 1) as u32,
        }
    }
}

impl Iterator for LineWalk {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = (self.x, self.y);

        if self.remaining > 0 {
            let e2 = self.err * 2;
            // Never overshoot an axis that is already at its end.
            if (e2 > -self.dy && self.x != self.x_end) || self.y == self.y_end {
                self.err -= self.dy;
                self.x += self.sx;
            } else {
                self.err += self.dx;
                self.y += self.sy;
            }
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl ExactSizeIterator for LineWalk {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_line_includes_both_ends() {
        let pts: Vec<_> = LineWalk::new(0.0, 0.0, 3.0, 0.0).collect();
        assert_eq!(pts, vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn single_point_when_endpoints_round_together() {
        let pts: Vec<_> = LineWalk::new(1.2, 1.4, 0.9, 0.6).collect();
        assert_eq!(pts, vec![(1, 1)]);
    }

    #[test]
    fn diagonal_walk_is_four_connected() {
        let pts: Vec<_> = LineWalk::new(0.0, 0.0, -4.0, 3.0).collect();
        assert_eq!(pts.len(), 8);
        assert_eq!(*pts.first().unwrap(), (0, 0));
        assert_eq!(*pts.last().unwrap(), (-4, 3));
        for w in pts.windows(2) {
            let step = (w[1].0 - w[0].0).abs() + (w[1].1 - w[0].1).abs();
            assert_eq!(step, 1);
        }
    }

    #[test]
    fn steep_line_reaches_end() {
        let pts: Vec<_> = LineWalk::new(0.0, 0.0, 1.0, 7.0).collect();
        assert_eq!(*pts.last().unwrap(), (1, 7));
        assert_eq!(pts.len(), 9);
    }
}
