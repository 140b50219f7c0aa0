use super::*;
use crate::core::utils::{heading_to_angle, sub_radians, Xorshift32};

/// Round half up, matching canvas/NetLogo patch rounding
#[inline]
fn round_coord(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

impl Patches {
    /// Patch under float coords, `None` off-world
    pub fn patch(&self, x: f64, y: f64) -> Option<AgentId> {
        if !self.world.is_on_world(x, y) {
            return None;
        }
        self.patch_xy(round_coord(x), round_coord(y))
    }

    /// Patch at integer patch coords, `None` off-world
    #[inline]
    pub fn patch_xy(&self, x: i32, y: i32) -> Option<AgentId> {
        if !self.world.contains(x, y) {
            return None;
        }
        Some(self.world.patch_xy_to_index(x, y) as AgentId)
    }

    #[inline]
    pub fn xy(&self, id: AgentId) -> (i32, i32) {
        self.world.patch_index_to_xy(id as usize)
    }

    /// Patches within `dx` columns and `dy` rows of `id`, clipped to the world
    pub fn patch_rect(&self, id: AgentId, dx: i32, dy: i32, me_too: bool) -> Vec<AgentId> {
        let (px, py) = self.xy(id);
        let w = &self.world;
        let (x0, x1) = (w.min_x.max(px - dx), w.max_x.min(px + dx));
        let (y0, y1) = (w.min_y.max(py - dy), w.max_y.min(py + dy));
        let mut rect = Vec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let next = w.patch_xy_to_index(x, y) as AgentId;
                if me_too || next != id {
                    rect.push(next);
                }
            }
        }
        rect
    }

    pub fn in_rect(&self, id: AgentId, dx: i32, dy: i32, me_too: bool) -> Vec<AgentId> {
        self.patch_rect(id, dx, dy, me_too)
    }

    pub fn in_square(&self, id: AgentId, radius: i32, me_too: bool) -> Vec<AgentId> {
        self.patch_rect(id, radius, radius, me_too)
    }

    /// Patches whose centers are within `radius` of the patch center
    pub fn in_radius(&self, id: AgentId, radius: i32, me_too: bool) -> Vec<AgentId> {
        let (px, py) = self.xy(id);
        let r_sq = radius * radius;
        self.in_square(id, radius, me_too)
            .into_iter()
            .filter(|&p| {
                let (x, y) = self.xy(p);
                (x - px) * (x - px) + (y - py) * (y - py) <= r_sq
            })
            .collect()
    }

    /// Patches in the cone of `width` radians centered on `angle` (radians,
    /// counter-clockwise from east) and within `radius`
    pub fn in_cone(&self, id: AgentId, radius: i32, width: f64, angle: f64, me_too: bool) -> Vec<AgentId> {
        let (px, py) = self.xy(id);
        let r_sq = (radius * radius) as f64;
        self.in_square(id, radius, me_too)
            .into_iter()
            .filter(|&p| {
                if p == id {
                    return me_too;
                }
                let (x, y) = self.xy(p);
                let (dx, dy) = ((x - px) as f64, (y - py) as f64);
                dx * dx + dy * dy <= r_sq && sub_radians(dy.atan2(dx), angle).abs() <= width / 2.0
            })
            .collect()
    }

    /// Patch `distance` away from (x, y) along `angle` (radians), rounded
    pub fn patch_at_angle_and_distance(&self, x: f64, y: f64, angle: f64, distance: f64) -> Option<AgentId> {
        let tx = round_coord(x + distance * angle.cos());
        let ty = round_coord(y + distance * angle.sin());
        self.patch_xy(tx, ty)
    }

    /// As above with a heading in degrees clockwise from north
    pub fn patch_at_heading_and_distance(&self, x: f64, y: f64, heading: f64, distance: f64) -> Option<AgentId> {
        self.patch_at_angle_and_distance(x, y, heading_to_angle(heading), distance)
    }

    pub fn random_patch(&self, rng: &mut Xorshift32) -> AgentId {
        rng.below(self.world.size()) as AgentId
    }
}
