//! DataSet - flat row-major f32 field
//!
//! Row 0 is the top row, same orientation as patch ids and canvas pixels, so
//! a dataset sized num_x x num_y indexes exactly like the patches.

use crate::core::{EngineError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct DataSet {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl DataSet {
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != width * height {
            return Err(EngineError::InvalidWorld(format!(
                "dataset {}x{} needs {} values, got {}",
                width,
                height,
                width * height,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// Zero-filled dataset
    pub fn empty(width: usize, height: usize) -> Self {
        Self { width, height, data: vec![0.0; width * height] }
    }

    #[inline]
    pub fn width(&self) -> usize { self.width }

    #[inline]
    pub fn height(&self) -> usize { self.height }

    #[inline]
    pub fn data(&self) -> &[f32] { &self.data }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] { &mut self.data }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "dataset index ({}, {}) out of range", x, y);
        x + y * self.width
    }

    #[inline]
    pub fn get_xy(&self, x: usize, y: usize) -> f32 {
        self.data[self.index(x, y)]
    }

    #[inline]
    pub fn set_xy(&mut self, x: usize, y: usize, value: f32) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Signed lookup, `None` outside the dataset
    #[inline]
    pub fn try_get(&self, x: i32, y: i32) -> Option<f32> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.data[x as usize + y as usize * self.width])
    }

    /// True if (x, y) can be sampled bilinearly
    #[inline]
    pub fn in_bounds(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x <= (self.width - 1) as f64 && y <= (self.height - 1) as f64
    }

    /// Bilinear sample; coordinates are clamped into the dataset
    pub fn bilinear(&self, x: f64, y: f64) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let max_x = (self.width - 1) as f64;
        let max_y = (self.height - 1) as f64;
        let x = x.clamp(0.0, max_x);
        let y = y.clamp(0.0, max_y);
        let x0 = x.floor() as usize;
        let y0 = y.floor() as usize;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let fx = (x - x0 as f64) as f32;
        let fy = (y - y0 as f64) as f32;

        let top = self.get_xy(x0, y0) * (1.0 - fx) + self.get_xy(x1, y0) * fx;
        let bottom = self.get_xy(x0, y1) * (1.0 - fx) + self.get_xy(x1, y1) * fx;
        top * (1.0 - fy) + bottom * fy
    }

    /// Resample to a new size, nearest-neighbor or bilinear
    pub fn resample(&self, width: usize, height: usize, use_nearest: bool) -> DataSet {
        if width == self.width && height == self.height {
            return self.clone();
        }
        let sx = if width > 1 { (self.width - 1) as f64 / (width - 1) as f64 } else { 0.0 };
        let sy = if height > 1 { (self.height - 1) as f64 / (height - 1) as f64 } else { 0.0 };
        let mut out = DataSet::empty(width, height);
        for y in 0..height {
            for x in 0..width {
                let (fx, fy) = (x as f64 * sx, y as f64 * sy);
                let v = if use_nearest {
                    self.get_xy(fx.round() as usize, fy.round() as usize)
                } else {
                    self.bilinear(fx, fy)
                };
                out.set_xy(x, y, v);
            }
        }
        out
    }

    /// 3x3 convolution over interior cells, edge cells copied through.
    /// Kernel is row-major, top row first.
    pub fn convolve(&self, kernel: &[f32; 9], factor: f32) -> DataSet {
        let mut out = self.clone();
        if self.width < 3 || self.height < 3 {
            return out;
        }
        for y in 1..self.height - 1 {
            for x in 1..self.width - 1 {
                let mut acc = 0.0;
                for ky in 0..3 {
                    for kx in 0..3 {
                        acc += kernel[ky * 3 + kx] * self.get_xy(x + kx - 1, y + ky - 1);
                    }
                }
                out.set_xy(x, y, acc * factor);
            }
        }
        out
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().map(|&v| v as f64).sum()
    }

    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: usize, h: usize) -> DataSet {
        DataSet::new(w, h, (0..w * h).map(|i| i as f32).collect()).unwrap()
    }

    #[test]
    fn new_rejects_wrong_length() {
        assert!(DataSet::new(2, 2, vec![0.0; 3]).is_err());
    }

    #[test]
    fn bilinear_midpoint() {
        let ds = ramp(2, 2); // [0 1; 2 3]
        assert_eq!(ds.bilinear(0.5, 0.5), 1.5);
        assert_eq!(ds.bilinear(1.0, 1.0), 3.0);
        assert_eq!(ds.bilinear(5.0, -2.0), 1.0);
    }

    #[test]
    fn resample_nearest_keeps_corners() {
        let ds = ramp(4, 4);
        let small = ds.resample(2, 2, true);
        assert_eq!(small.data(), &[0.0, 3.0, 12.0, 15.0]);
    }

    #[test]
    fn convolve_box_preserves_constant_field() {
        let mut ds = DataSet::empty(5, 5);
        ds.fill(2.0);
        let out = ds.convolve(&[0.0, 1.0, 0.0, 1.0, 2.0, 1.0, 0.0, 1.0, 0.0], 1.0 / 6.0);
        for &v in out.data() {
            assert!((v - 2.0).abs() < 1e-6);
        }
    }

    #[test]
    fn try_get_is_none_off_grid() {
        let ds = ramp(3, 3);
        assert_eq!(ds.try_get(-1, 0), None);
        assert_eq!(ds.try_get(2, 2), Some(8.0));
        assert_eq!(ds.try_get(3, 0), None);
    }
}
