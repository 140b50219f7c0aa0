//! Arena - image-derived classification mask for the hockey puck
//!
//! Every pixel of the level image is thresholded once into a `Cell`:
//! - GOAL:   r > 200, g < 50, b < 50
//! - SOURCE: r < 50, g > 200, b < 50 (spawn nest)
//! - WALL:   r, g, b < 50
//! - EMPTY:  everything else
//!
//! Collisions sweep the puck perimeter from its previous to its next
//! position and look each rasterized point up in the mask.

mod collision;

pub use collision::{Collision, CollisionHits, OUTER_SPACE_PADDING, PERIMETER_STEP};

use image::RgbaImage;
use log::{info, warn};

use crate::core::Result;
use crate::domain::patches::rgba_image;
use crate::systems::charges::Vec2;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty = 0,
    Wall = 1,
    Source = 2,
    Goal = 3,
}

impl Cell {
    #[inline]
    pub fn classify(r: u8, g: u8, b: u8) -> Cell {
        if r > 200 && g < 50 && b < 50 {
            Cell::Goal
        } else if r < 50 && g > 200 && b < 50 {
            Cell::Source
        } else if r < 50 && g < 50 && b < 50 {
            Cell::Wall
        } else {
            Cell::Empty
        }
    }
}

pub struct ArenaMap {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    /// Pixel counts indexed by `Cell as usize`
    counts: [usize; 4],
}

impl ArenaMap {
    pub fn from_image(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let mut counts = [0usize; 4];
        let cells: Vec<Cell> = image
            .pixels()
            .map(|p| {
                let cell = Cell::classify(p[0], p[1], p[2]);
                counts[cell as usize] += 1;
                cell
            })
            .collect();

        info!(
            "arena {}x{}: empty {} wall {} source {} goal {}",
            width, height, counts[0], counts[1], counts[2], counts[3]
        );
        Self { width, height, cells, counts }
    }

    /// Raw RGBA bytes, row-major
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        Ok(Self::from_image(&rgba_image(width, height, rgba)?))
    }

    /// Encoded image file (PNG)
    pub fn from_png(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self::from_image(&image))
    }

    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    pub fn cells(&self) -> &[Cell] { &self.cells }

    pub fn count(&self, cell: Cell) -> usize {
        self.counts[cell as usize]
    }

    /// Cell at integer pixel (x, y), `None` off the image
    #[inline]
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.cells[x as usize + y as usize * self.width as usize])
    }

    /// Mean pixel position of all SOURCE cells
    pub fn source_centroid(&self) -> Option<Vec2> {
        let w = self.width as usize;
        let (mut sx, mut sy, mut n) = (0.0, 0.0, 0usize);
        for (i, _) in self.cells.iter().enumerate().filter(|(_, &c)| c == Cell::Source) {
            sx += (i % w) as f64;
            sy += (i / w) as f64;
            n += 1;
        }
        (n > 0).then(|| Vec2::new(sx / n as f64, sy / n as f64))
    }

    /// Spawn point: the source centroid, or the arena center when the
    /// image has no source pixels
    pub fn spawn_point(&self) -> Vec2 {
        self.source_centroid().unwrap_or_else(|| {
            warn!("arena has no source pixels, spawning at the center");
            Vec2::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
        })
    }
}
