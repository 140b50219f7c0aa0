mod rng;

pub use rng::{xorshift32, Xorshift32};

/// Linear scale of `value` from [min, max] into [0, 1], clamped.
#[inline]
pub fn lerp_scale(value: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// NetLogo heading (degrees, clockwise from north) to math angle (radians,
/// counter-clockwise from east).
#[inline]
pub fn heading_to_angle(heading: f64) -> f64 {
    (90.0 - heading).to_radians()
}

/// Smallest signed difference between two angles, in (-PI, PI].
#[inline]
pub fn sub_radians(a: f64, b: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let mut d = (a - b) % TAU;
    if d > PI {
        d -= TAU;
    } else if d <= -PI {
        d += TAU;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_zero_points_north() {
        let a = heading_to_angle(0.0);
        assert!((a - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!(heading_to_angle(90.0).abs() < 1e-12);
    }

    #[test]
    fn sub_radians_wraps() {
        let d = sub_radians(0.1, std::f64::consts::TAU - 0.1);
        assert!((d - 0.2).abs() < 1e-9);
    }

    #[test]
    fn lerp_scale_clamps() {
        assert_eq!(lerp_scale(5.0, 0.0, 1.0), 1.0);
        assert_eq!(lerp_scale(-1.0, 0.0, 1.0), 0.0);
        assert_eq!(lerp_scale(0.25, 0.0, 1.0), 0.25);
        assert_eq!(lerp_scale(3.0, 1.0, 1.0), 0.0);
    }
}
