//! Neighbor topology for the patch grid
//!
//! Closed boundary (no wraparound): edge patches get 5 (or 3 at corners)
//! 8-neighbors and 3 (or 2) 4-neighbors. Neighbor lists are computed on first
//! use and cached per patch.

use std::cell::OnceCell;

use super::world::WorldBounds;

/// (dx, dy) in patch coords, y up. Clockwise from north-west.
const OFFSETS_8: [(i32, i32); 8] = [
    (-1, 1),  // NW
    (0, 1),   // N
    (1, 1),   // NE
    (1, 0),   // E
    (1, -1),  // SE
    (0, -1),  // S
    (-1, -1), // SW
    (-1, 0),  // W
];

/// N, E, S, W
const OFFSETS_4: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Neighborhood {
    Four,
    Eight,
}

impl Neighborhood {
    pub fn from_count(n: u8) -> Option<Self> {
        match n {
            4 => Some(Self::Four),
            8 => Some(Self::Eight),
            _ => None,
        }
    }

    #[inline]
    pub fn count(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
        }
    }

    fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Self::Four => &OFFSETS_4,
            Self::Eight => &OFFSETS_8,
        }
    }
}

/// Id offsets (relative to the patch's own id) of the in-world neighbors of
/// patch (x, y). Moving up one row is `-num_x`.
pub fn neighbor_offsets(world: &WorldBounds, x: i32, y: i32, kind: Neighborhood) -> Vec<isize> {
    let num_x = world.num_x as isize;
    kind.offsets()
        .iter()
        .filter(|(dx, dy)| world.contains(x + dx, y + dy))
        .map(|&(dx, dy)| dx as isize - dy as isize * num_x)
        .collect()
}

/// Ids of the in-world neighbors of patch `id`
pub fn neighbor_ids(world: &WorldBounds, id: u32, kind: Neighborhood) -> Vec<u32> {
    let (x, y) = world.patch_index_to_xy(id as usize);
    neighbor_offsets(world, x, y, kind)
        .into_iter()
        .map(|o| (id as isize + o) as u32)
        .collect()
}

/// Lazily filled neighbor lists, one slot per patch and neighborhood
pub struct NeighborCache {
    eight: Vec<OnceCell<Box<[u32]>>>,
    four: Vec<OnceCell<Box<[u32]>>>,
}

impl NeighborCache {
    pub fn new(size: usize) -> Self {
        Self {
            eight: (0..size).map(|_| OnceCell::new()).collect(),
            four: (0..size).map(|_| OnceCell::new()).collect(),
        }
    }

    /// Neighbors of `id`, `None` when the cache has no slot for it
    pub fn get(&self, world: &WorldBounds, id: u32, kind: Neighborhood) -> Option<&[u32]> {
        let slots = match kind {
            Neighborhood::Eight => &self.eight,
            Neighborhood::Four => &self.four,
        };
        let slot = slots.get(id as usize)?;
        Some(slot.get_or_init(|| neighbor_ids(world, id, kind).into_boxed_slice()))
    }

    /// Number of slots already computed (both neighborhoods)
    pub fn cached_count(&self) -> usize {
        self.eight.iter().chain(self.four.iter()).filter(|c| c.get().is_some()).count()
    }
}
