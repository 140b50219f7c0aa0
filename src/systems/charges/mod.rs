//! Charges - point charges, a charged puck and its integrators
//!
//! Coulomb force on a test charge q at p from each source charge Q at c:
//!   F = k * q * Q / r^2 along (p - c) / r
//! so like charges repel. Sources closer than `MIN_DISTANCE` are skipped.

use serde::{Deserialize, Serialize};

mod arrows;
mod vec2;

pub use arrows::{field_arrows, Arrow, ARROW_GRID};
pub use vec2::Vec2;

/// Below this distance a source charge contributes nothing
pub const MIN_DISTANCE: f64 = 1e-6;

/// Default puck radius in pixels
pub const PUCK_RADIUS: f64 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl Charge {
    pub const fn new(x: f64, y: f64, value: f64) -> Self {
        Self { x, y, value }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Puck {
    pub pos: Vec2,
    pub vel: Vec2,
    pub charge: f64,
    pub mass: f64,
    pub radius: f64,
}

impl Puck {
    /// Unit charge and mass at rest
    pub fn at(pos: Vec2) -> Self {
        Self { pos, vel: Vec2::ZERO, charge: 1.0, mass: 1.0, radius: PUCK_RADIUS }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }
}

/// Fixed set of source charges
#[derive(Clone, Debug, Default)]
pub struct ChargeField {
    pub k: f64,
    charges: Vec<Charge>,
}

impl ChargeField {
    pub fn new(k: f64) -> Self {
        Self { k, charges: Vec::new() }
    }

    pub fn add_charge(&mut self, x: f64, y: f64, value: f64) {
        self.charges.push(Charge::new(x, y, value));
    }

    pub fn clear_charges(&mut self) {
        self.charges.clear();
    }

    pub fn charges(&self) -> &[Charge] {
        &self.charges
    }

    /// Force on a test charge `charge` at `pos`
    pub fn force_at(&self, pos: Vec2, charge: f64) -> Vec2 {
        let mut force = Vec2::ZERO;
        for source in &self.charges {
            let d = pos - source.pos();
            let r = d.length();
            if r > MIN_DISTANCE {
                let f = self.k * charge * source.value / (r * r);
                force += d / r * f;
            }
        }
        force
    }

    #[inline]
    fn accel(&self, pos: Vec2, puck: &Puck) -> Vec2 {
        self.force_at(pos, puck.charge) / puck.mass
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Integrator {
    /// `substeps` fixed Euler steps of dt / substeps
    Euler { substeps: u32 },
    /// One classical RK4 step of dt
    RungeKutta4,
}

impl Default for Integrator {
    fn default() -> Self {
        Integrator::Euler { substeps: 200 }
    }
}

impl Integrator {
    /// Advance `puck` by `dt` through `field`
    pub fn advance(&self, field: &ChargeField, puck: &Puck, dt: f64) -> Puck {
        match *self {
            Integrator::Euler { substeps } => {
                let n = substeps.max(1);
                let h = dt / n as f64;
                (0..n).fold(*puck, |p, _| euler_step(field, &p, h))
            }
            Integrator::RungeKutta4 => rk4_step(field, puck, dt),
        }
    }
}

/// x += v*dt + a*dt^2/2, v += a*dt
pub fn euler_step(field: &ChargeField, puck: &Puck, dt: f64) -> Puck {
    let a = field.accel(puck.pos, puck);
    Puck {
        pos: puck.pos + puck.vel * dt + a * (dt * dt / 2.0),
        vel: puck.vel + a * dt,
        ..*puck
    }
}

/// Classical RK4 on (position, velocity)
pub fn rk4_step(field: &ChargeField, puck: &Puck, dt: f64) -> Puck {
    let (x0, v0) = (puck.pos, puck.vel);

    let k1x = v0;
    let k1v = field.accel(x0, puck);
    let k2x = v0 + k1v * (dt / 2.0);
    let k2v = field.accel(x0 + k1x * (dt / 2.0), puck);
    let k3x = v0 + k2v * (dt / 2.0);
    let k3v = field.accel(x0 + k2x * (dt / 2.0), puck);
    let k4x = v0 + k3v * dt;
    let k4v = field.accel(x0 + k3x * dt, puck);

    Puck {
        pos: x0 + (k1x + k2x * 2.0 + k3x * 2.0 + k4x) * (dt / 6.0),
        vel: v0 + (k1v + k2v * 2.0 + k3v * 2.0 + k4v) * (dt / 6.0),
        ..*puck
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn like_charges_repel() {
        let mut field = ChargeField::new(1.0);
        field.add_charge(0.0, 0.0, 2.0);
        let f = field.force_at(Vec2::new(2.0, 0.0), 1.0);
        assert!(close(f, Vec2::new(0.5, 0.0)));
        let f = field.force_at(Vec2::new(0.0, -2.0), -1.0);
        assert!(close(f, Vec2::new(0.0, 0.5)));
    }

    #[test]
    fn coincident_charge_is_ignored() {
        let mut field = ChargeField::new(1.0);
        field.add_charge(5.0, 5.0, 1.0);
        assert_eq!(field.force_at(Vec2::new(5.0, 5.0), 1.0), Vec2::ZERO);
        field.clear_charges();
        assert!(field.charges().is_empty());
    }

    #[test]
    fn rk4_in_empty_field_moves_linearly() {
        let field = ChargeField::new(1.0);
        let puck = Puck::at(Vec2::new(10.0, 20.0)).with_velocity(Vec2::new(0.2, -0.1));
        let next = Integrator::RungeKutta4.advance(&field, &puck, 25.0);
        assert!(close(next.vel, puck.vel));
        assert!(close(next.pos, Vec2::new(15.0, 17.5)));
    }

    #[test]
    fn euler_in_empty_field_moves_linearly() {
        let field = ChargeField::new(1.0);
        let puck = Puck::at(Vec2::ZERO).with_velocity(Vec2::new(0.09, 0.05));
        let next = Integrator::default().advance(&field, &puck, 25.0);
        assert!(close(next.pos, Vec2::new(2.25, 1.25)));
        assert!(close(next.vel, puck.vel));
    }

    #[test]
    fn integrators_agree_in_a_smooth_field() {
        let mut field = ChargeField::new(1.0);
        field.add_charge(200.0, 150.0, -1.8);
        let puck = Puck::at(Vec2::new(100.0, 100.0));
        let euler = Integrator::Euler { substeps: 2000 }.advance(&field, &puck, 25.0);
        let rk4 = Integrator::RungeKutta4.advance(&field, &puck, 25.0);
        assert!((euler.pos - rk4.pos).length() < 1e-3);
        // attracted toward the negative charge
        assert!(rk4.pos.x > 100.0 && rk4.pos.y > 100.0);
    }

    #[test]
    fn integrator_from_json() {
        let euler: Integrator = serde_json::from_str(r#"{"kind":"euler","substeps":50}"#).unwrap();
        assert_eq!(euler, Integrator::Euler { substeps: 50 });
        let rk: Integrator = serde_json::from_str(r#"{"kind":"rungeKutta4"}"#).unwrap();
        assert_eq!(rk, Integrator::RungeKutta4);
    }
}
