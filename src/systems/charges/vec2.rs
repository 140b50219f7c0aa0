use serde::{Deserialize, Serialize};

/// 2D vector in arena pixel space (y down)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector at `angle` radians
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        Self { x: angle.cos(), y: angle.sin() }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn dot(&self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

macro_rules! vec_op {
    ($trait:ident, $f:ident, $op:tt) => {
        impl std::ops::$trait for Vec2 {
            type Output = Vec2;
            #[inline]
            fn $f(self, rhs: Vec2) -> Vec2 {
                Vec2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }
    };
    ($trait:ident, $f:ident, $op:tt, f64) => {
        impl std::ops::$trait<f64> for Vec2 {
            type Output = Vec2;
            #[inline]
            fn $f(self, s: f64) -> Vec2 {
                Vec2::new(self.x $op s, self.y $op s)
            }
        }
    };
}

vec_op!(Add, add, +);
vec_op!(Sub, sub, -);
vec_op!(Mul, mul, *, f64);
vec_op!(Div, div, /, f64);

impl std::ops::AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        *self = *self + rhs;
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}
