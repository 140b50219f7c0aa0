//! Colors - packed pixels and color maps
//!
//! Pixels are stored as ABGR u32 (little-endian bytes [R, G, B, A]) so the
//! patch pixel buffer can be handed to a canvas ImageData without conversion.

use serde::{Deserialize, Serialize};

use crate::core::utils::lerp_scale;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Packed ABGR pixel
    #[inline]
    pub const fn to_pixel(self) -> u32 {
        ((self.a as u32) << 24) | ((self.b as u32) << 16) | ((self.g as u32) << 8) | self.r as u32
    }

    #[inline]
    pub const fn from_pixel(pixel: u32) -> Self {
        Self {
            r: (pixel & 0xFF) as u8,
            g: ((pixel >> 8) & 0xFF) as u8,
            b: ((pixel >> 16) & 0xFF) as u8,
            a: (pixel >> 24) as u8,
        }
    }

    pub fn css(&self) -> String {
        if self.a == 255 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a as f64 / 255.0)
        }
    }

    /// Component-wise blend, t in [0, 1]
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8;
        Color::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

/// Ordered palette; values are mapped onto it by linear scaling
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMap {
    colors: Vec<Color>,
}

impl ColorMap {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// `n` colors spread evenly across the given stops
    pub fn gradient(n: usize, stops: &[Color]) -> Self {
        let colors = match stops {
            [] => Vec::new(),
            [only] => vec![*only; n],
            _ => (0..n)
                .map(|i| {
                    let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
                    let pos = t * (stops.len() - 1) as f64;
                    let lo = (pos.floor() as usize).min(stops.len() - 2);
                    stops[lo].lerp(stops[lo + 1], pos - lo as f64)
                })
                .collect(),
        };
        Self { colors }
    }

    /// Classic "jet" blue -> cyan -> yellow -> red ramp, 256 entries
    pub fn jet() -> Self {
        Self::gradient(
            256,
            &[
                Color::rgb(0, 0, 127),
                Color::rgb(0, 0, 255),
                Color::rgb(0, 127, 255),
                Color::rgb(0, 255, 255),
                Color::rgb(127, 255, 127),
                Color::rgb(255, 255, 0),
                Color::rgb(255, 127, 0),
                Color::rgb(255, 0, 0),
                Color::rgb(127, 0, 0),
            ],
        )
    }

    pub fn gray(n: usize) -> Self {
        Self::gradient(n, &[Color::BLACK, Color::WHITE])
    }

    /// Evenly spaced RGB color cube, blue varying fastest
    pub fn rgb_color_cube(r_levels: usize, g_levels: usize, b_levels: usize) -> Self {
        let level = |i: usize, n: usize| if n > 1 { (i * 255 / (n - 1)) as u8 } else { 0 };
        let mut colors = Vec::with_capacity(r_levels * g_levels * b_levels);
        for r in 0..r_levels {
            for g in 0..g_levels {
                for b in 0..b_levels {
                    colors.push(Color::rgb(level(r, r_levels), level(g, g_levels), level(b, b_levels)));
                }
            }
        }
        Self { colors }
    }

    /// 8x8x4 cube: 256 colors
    pub fn rgb256() -> Self {
        Self::rgb_color_cube(8, 8, 4)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn index_of(&self, color: Color) -> Option<usize> {
        self.colors.iter().position(|&c| c == color)
    }

    /// Map `value` in [min, max] onto the palette (clamped). Empty maps give black.
    pub fn scale_color(&self, value: f64, min: f64, max: f64) -> Color {
        if self.colors.is_empty() {
            return Color::BLACK;
        }
        let t = if value.is_finite() { lerp_scale(value, min, max) } else { 0.0 };
        let index = (t * (self.colors.len() - 1) as f64).round() as usize;
        self.colors[index.min(self.colors.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_packing_is_canvas_byte_order() {
        let c = Color::rgba(1, 2, 3, 4);
        assert_eq!(c.to_pixel().to_le_bytes(), [1, 2, 3, 4]);
        assert_eq!(Color::from_pixel(c.to_pixel()), c);
    }

    #[test]
    fn gradient_hits_both_stops() {
        let map = ColorMap::gradient(6, &[Color::RED, Color::rgb(128, 0, 0)]);
        assert_eq!(map.len(), 6);
        assert_eq!(map.get(0), Some(Color::RED));
        assert_eq!(map.get(5), Some(Color::rgb(128, 0, 0)));
    }

    #[test]
    fn scale_color_clamps_to_ends() {
        let map = ColorMap::gray(256);
        assert_eq!(map.scale_color(-3.0, 0.0, 1.0), Color::BLACK);
        assert_eq!(map.scale_color(9.0, 0.0, 1.0), Color::WHITE);
        assert_eq!(map.scale_color(f64::NAN, 0.0, 1.0), Color::BLACK);
    }

    #[test]
    fn prebuilt_maps_have_256_entries() {
        assert_eq!(ColorMap::jet().len(), 256);
        assert_eq!(ColorMap::rgb256().len(), 256);
        assert_eq!(ColorMap::rgb256().get(255), Some(Color::WHITE));
    }

    #[test]
    fn css_strings() {
        assert_eq!(Color::rgb(1, 2, 3).css(), "rgb(1,2,3)");
        assert_eq!(Color::rgba(0, 0, 0, 0).css(), "rgba(0,0,0,0.000)");
    }
}
