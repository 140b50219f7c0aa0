//! Force-field overlay: one arrow per lattice point, length and opacity
//! growing with the local field strength.

use std::f64::consts::PI;

use super::{ChargeField, Vec2};
use crate::domain::color::Color;
use crate::render::Path;

/// Lattice points per axis
pub const ARROW_GRID: usize = 30;

const MIN_LENGTH: f64 = 4.0;
const MAX_LENGTH: f64 = 20.0;
const MAX_HEAD: f64 = 5.0;
const LINE_WIDTH: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrow {
    pub from: Vec2,
    pub to: Vec2,
    pub head_left: Vec2,
    pub head_right: Vec2,
    pub opacity: f64,
}

impl Arrow {
    fn new(from: Vec2, force: Vec2) -> Option<Self> {
        let mag = force.length();
        if !(mag > 0.0) {
            return None;
        }
        let len = (200_000.0 * mag).sqrt().clamp(MIN_LENGTH, MAX_LENGTH);
        let to = from + force / mag * len;
        let head = MAX_HEAD.min(len / 2.0);
        let angle = force.angle();
        Some(Self {
            from,
            to,
            head_left: to - Vec2::from_angle(angle - PI / 6.0) * head,
            head_right: to - Vec2::from_angle(angle + PI / 6.0) * head,
            opacity: (2000.0 * mag).clamp(0.2, 1.0),
        })
    }

    pub fn to_path(&self) -> Path {
        let alpha = (self.opacity * 255.0).round() as u8;
        Path::new()
            .move_to(self.from.x, self.from.y)
            .line_to(self.to.x, self.to.y)
            .line_to(self.head_left.x, self.head_left.y)
            .move_to(self.to.x, self.to.y)
            .line_to(self.head_right.x, self.head_right.y)
            .stroke(Color::rgba(0, 0, 0, alpha), LINE_WIDTH)
    }
}

/// Arrows for a unit positive test charge over a `width x height` arena.
/// Points where the field vanishes get no arrow.
pub fn field_arrows(field: &ChargeField, width: f64, height: f64) -> Vec<Arrow> {
    let (step_x, step_y) = (width / ARROW_GRID as f64, height / ARROW_GRID as f64);
    let mut arrows = Vec::with_capacity(ARROW_GRID * ARROW_GRID);
    for i in 0..ARROW_GRID {
        for j in 0..ARROW_GRID {
            let at = Vec2::new(i as f64 * step_x, j as f64 * step_y);
            if let Some(arrow) = Arrow::new(at, field.force_at(at, 1.0)) {
                arrows.push(arrow);
            }
        }
    }
    arrows
}
