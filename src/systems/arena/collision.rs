use std::f64::consts::TAU;

use super::{ArenaMap, Cell};
use crate::spatial::line::LineWalk;
use crate::systems::charges::Puck;

/// Distance beyond the arena edge at which a puck is lost
pub const OUTER_SPACE_PADDING: f64 = 100.0;

/// Angular step between perimeter samples, radians
pub const PERIMETER_STEP: f64 = 0.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionHits {
    pub outer_space: bool,
    pub wall: bool,
    pub goal: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    OuterSpace,
    Wall,
    Goal,
}

impl CollisionHits {
    /// Out of bounds beats a wall, a wall beats a goal
    pub fn outcome(&self) -> Option<Collision> {
        if self.outer_space {
            Some(Collision::OuterSpace)
        } else if self.wall {
            Some(Collision::Wall)
        } else if self.goal {
            Some(Collision::Goal)
        } else {
            None
        }
    }

    #[inline]
    pub fn any(&self) -> bool {
        self.outer_space || self.wall || self.goal
    }
}

impl ArenaMap {
    fn outside(&self, puck: &Puck, pad: f64) -> bool {
        let (w, h) = (self.width as f64, self.height as f64);
        puck.pos.x < -pad || puck.pos.y < -pad || puck.pos.x > w + pad || puck.pos.y > h + pad
    }

    /// Sweep the perimeter of `prev` to that of `next`.
    ///
    /// A previous position off the arena never hits walls or goals; it only
    /// reports outer space once past `padding`. Swept points off the image
    /// are ignored.
    pub fn check_collisions(&self, prev: &Puck, next: &Puck, padding: f64) -> CollisionHits {
        let mut hits = CollisionHits::default();
        if self.outside(prev, 0.0) {
            hits.outer_space = self.outside(prev, padding);
            return hits;
        }

        let mut angle = 0.0;
        while angle < TAU {
            let (sin, cos) = angle.sin_cos();
            let walk = LineWalk::new(
                prev.pos.x + prev.radius * cos,
                prev.pos.y + prev.radius * sin,
                next.pos.x + next.radius * cos,
                next.pos.y + next.radius * sin,
            );
            for (x, y) in walk {
                match self.cell_at(x, y) {
                    Some(Cell::Wall) => hits.wall = true,
                    Some(Cell::Goal) => hits.goal = true,
                    _ => {}
                }
            }
            angle += PERIMETER_STEP;
        }
        hits
    }
}
