//! World - the patch coordinate system
//!
//! Integer patch coordinates [min_x, max_x] x [min_y, max_y] map 1:1 onto a
//! dense row-major id space. Row 0 is the TOP row (y = max_y), matching canvas
//! image data, so `id = (x - min_x) + num_x * (max_y - y)`.

use serde::{Deserialize, Serialize};

use crate::core::utils::Xorshift32;
use crate::core::{EngineError, Result};

/// User-facing world settings (JSON: `{"patchSize":13,"minX":-16,...}`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldOptions {
    pub patch_size: u32,
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Default for WorldOptions {
    fn default() -> Self {
        Self {
            patch_size: 13,
            min_x: -16,
            max_x: 16,
            min_y: -16,
            max_y: 16,
        }
    }
}

impl WorldOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Centered square world of the given "radius" in patches
    pub fn centered(max: i32, patch_size: u32) -> Self {
        Self {
            patch_size,
            min_x: -max,
            max_x: max,
            min_y: -max,
            max_y: max,
        }
    }
}

/// Validated world geometry with all derived values precomputed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
    pub num_x: u32,
    pub num_y: u32,
    pub patch_size: u32,
    pub px_width: u32,
    pub px_height: u32,
    pub min_xcor: f64,
    pub max_xcor: f64,
    pub min_ycor: f64,
    pub max_ycor: f64,
}

impl WorldBounds {
    pub fn new(options: &WorldOptions) -> Result<Self> {
        if options.max_x < options.min_x || options.max_y < options.min_y {
            return Err(EngineError::InvalidWorld(format!(
                "x [{}, {}] y [{}, {}]",
                options.min_x, options.max_x, options.min_y, options.max_y
            )));
        }
        if options.patch_size == 0 {
            return Err(EngineError::InvalidWorld("patch size must be > 0".to_string()));
        }

        let num_x = span(options.min_x, options.max_x)?;
        let num_y = span(options.min_y, options.max_y)?;
        // patch ids are u32
        if num_x.checked_mul(num_y).is_none() {
            return Err(EngineError::InvalidWorld(format!("{} x {} patches is too many", num_x, num_y)));
        }
        let too_wide = || EngineError::InvalidWorld(format!("patch size {} overflows the canvas", options.patch_size));
        let px_width = num_x.checked_mul(options.patch_size).ok_or_else(too_wide)?;
        let px_height = num_y.checked_mul(options.patch_size).ok_or_else(too_wide)?;
        Ok(Self {
            min_x: options.min_x,
            max_x: options.max_x,
            min_y: options.min_y,
            max_y: options.max_y,
            num_x,
            num_y,
            patch_size: options.patch_size,
            px_width,
            px_height,
            min_xcor: options.min_x as f64 - 0.5,
            max_xcor: options.max_x as f64 + 0.5,
            min_ycor: options.min_y as f64 - 0.5,
            max_ycor: options.max_y as f64 + 0.5,
        })
    }

    /// Patch count, at most `u32::MAX`
    #[inline]
    pub fn size(&self) -> usize {
        self.num_x as usize * self.num_y as usize
    }

    /// True if integer patch coords are inside the world
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// True if float coords fall on some patch (edges extend half a patch)
    #[inline]
    pub fn is_on_world(&self, x: f64, y: f64) -> bool {
        self.min_xcor <= x && x <= self.max_xcor && self.min_ycor <= y && y <= self.max_ycor
    }

    /// Patch id for valid integer patch coords
    #[inline]
    pub fn patch_xy_to_index(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.contains(x, y), "patch_xy_to_index: ({}, {}) off world", x, y);
        (x - self.min_x) as usize + self.num_x as usize * (self.max_y - y) as usize
    }

    /// Integer patch coords for a valid patch id
    #[inline]
    pub fn patch_index_to_xy(&self, id: usize) -> (i32, i32) {
        let num_x = self.num_x as usize;
        ((id % num_x) as i32 + self.min_x, self.max_y - (id / num_x) as i32)
    }

    pub fn pixel_xy_to_patch_xy(&self, x: f64, y: f64) -> (f64, f64) {
        let size = self.patch_size as f64;
        (self.min_xcor + x / size, self.max_ycor - y / size)
    }

    pub fn patch_xy_to_pixel_xy(&self, x: f64, y: f64) -> (f64, f64) {
        let size = self.patch_size as f64;
        ((x - self.min_xcor) * size, (self.max_ycor - y) * size)
    }

    /// Random float point anywhere on the world
    pub fn random_pt(&self, rng: &mut Xorshift32) -> (f64, f64) {
        (
            rng.range_f64(self.min_xcor, self.max_xcor),
            rng.range_f64(self.min_ycor, self.max_ycor),
        )
    }
}

/// Patches from `min` to `max` inclusive. Capped at `i32::MAX` so in-world
/// coordinate differences stay in range.
fn span(min: i32, max: i32) -> Result<u32> {
    max.checked_sub(min)
        .and_then(|d| d.checked_add(1))
        .map(|n| n as u32)
        .ok_or_else(|| EngineError::InvalidWorld(format!("[{}, {}] spans too many patches", min, max)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_world_is_33_square() {
        let w = WorldBounds::new(&WorldOptions::default()).unwrap();
        assert_eq!((w.num_x, w.num_y), (33, 33));
        assert_eq!(w.px_width, 33 * 13);
        assert_eq!(w.min_xcor, -16.5);
    }

    #[test]
    fn top_left_is_id_zero() {
        let w = WorldBounds::new(&WorldOptions::default()).unwrap();
        assert_eq!(w.patch_xy_to_index(-16, 16), 0);
        assert_eq!(w.patch_xy_to_index(16, -16), w.size() - 1);
        assert_eq!(w.patch_index_to_xy(33), (-16, 15));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let opts = WorldOptions { min_x: 3, max_x: 1, ..WorldOptions::default() };
        assert!(matches!(WorldBounds::new(&opts), Err(EngineError::InvalidWorld(_))));
    }

    #[test]
    fn rejects_overflowing_bounds() {
        let wide = WorldOptions { min_x: -2_000_000_000, max_x: 2_000_000_000, ..WorldOptions::default() };
        assert!(matches!(WorldBounds::new(&wide), Err(EngineError::InvalidWorld(_))));

        let full = WorldOptions { min_x: 0, max_x: i32::MAX, ..WorldOptions::default() };
        assert!(matches!(WorldBounds::new(&full), Err(EngineError::InvalidWorld(_))));

        let square = WorldOptions { patch_size: 1, min_x: 0, max_x: 99_999, min_y: 0, max_y: 99_999 };
        assert!(matches!(WorldBounds::new(&square), Err(EngineError::InvalidWorld(_))));

        let huge_patches = WorldOptions { patch_size: u32::MAX, ..WorldOptions::default() };
        assert!(matches!(WorldBounds::new(&huge_patches), Err(EngineError::InvalidWorld(_))));

        let json = WorldOptions::from_json(r#"{"minY": -2147483648, "maxY": 2147483647}"#).unwrap();
        assert!(WorldBounds::new(&json).is_err());
    }

    #[test]
    fn pixel_round_trip_at_patch_center() {
        let w = WorldBounds::new(&WorldOptions::default()).unwrap();
        let (px, py) = w.patch_xy_to_pixel_xy(0.0, 0.0);
        assert_eq!((px, py), (16.5 * 13.0, 16.5 * 13.0));
        assert_eq!(w.pixel_xy_to_patch_xy(px, py), (0.0, 0.0));
    }

    #[test]
    fn options_from_json_fill_defaults() {
        let o = WorldOptions::from_json(r#"{"minX": -64, "maxX": 64}"#).unwrap();
        assert_eq!(o.min_x, -64);
        assert_eq!(o.max_y, 16);
        assert_eq!(o.patch_size, 13);
    }
}
