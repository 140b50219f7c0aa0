use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::core::{EngineError, Result};
use crate::domain::color::Color;

/// One ABGR pixel per patch, row 0 at the top. JS aliases it as the bytes of
/// an `ImageData` via `ptr()` / `len()`.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![Color::BLACK.to_pixel(); (width * height) as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn data(&self) -> &[u32] { &self.data }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] { &mut self.data }

    #[inline]
    pub fn ptr(&self) -> *const u32 { self.data.as_ptr() }

    /// Length in pixels (bytes = len * 4)
    #[inline]
    pub fn len(&self) -> usize { self.data.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    #[inline]
    pub fn get(&self, id: usize) -> Option<Color> {
        self.data.get(id).map(|&px| Color::from_pixel(px))
    }

    /// Returns false when `id` is past the end of the buffer
    #[inline]
    pub fn set(&mut self, id: usize, color: Color) -> bool {
        match self.data.get_mut(id) {
            Some(px) => {
                *px = color.to_pixel();
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.data.fill(color.to_pixel());
    }

    /// Scale an image onto the buffer (nearest neighbor), one image pixel per patch
    pub fn install_colors(&mut self, image: &RgbaImage) {
        let scaled;
        let src = if image.dimensions() == (self.width, self.height) {
            image
        } else {
            scaled = imageops::resize(image, self.width, self.height, FilterType::Nearest);
            &scaled
        };
        for (dst, px) in self.data.iter_mut().zip(src.pixels()) {
            *dst = Color::rgba(px[0], px[1], px[2], px[3]).to_pixel();
        }
    }

    /// `install_colors` from raw RGBA bytes
    pub fn install_rgba(&mut self, width: u32, height: u32, rgba: Vec<u8>) -> Result<()> {
        let image = rgba_image(width, height, rgba)?;
        self.install_colors(&image);
        Ok(())
    }
}

/// Wrap raw RGBA bytes, checking the length
pub fn rgba_image(width: u32, height: u32, rgba: Vec<u8>) -> Result<RgbaImage> {
    let expected = width as usize * height as usize * 4;
    let actual = rgba.len();
    RgbaImage::from_raw(width, height, rgba).ok_or(EngineError::ImageSize {
        width,
        height,
        expected,
        actual,
    })
}
