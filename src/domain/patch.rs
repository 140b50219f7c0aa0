//! Patch - borrowed view of one cell
//!
//! Nothing is stored per patch except its id; coordinates come from the id,
//! color from the pixel buffer, values from the agent-set columns.

use crate::core::Result;
use crate::domain::agentset::{AgentId, BreedId};
use crate::domain::color::Color;
use crate::domain::patches::Patches;

#[derive(Clone, Copy)]
pub struct Patch<'a> {
    patches: &'a Patches,
    id: AgentId,
}

/// Only built by `Patches` for ids inside the world
impl<'a> Patch<'a> {
    pub(crate) fn new(patches: &'a Patches, id: AgentId) -> Self {
        Self { patches, id }
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.patches.xy(self.id).0
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.patches.xy(self.id).1
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.patches.color(self.id).unwrap_or(Color::BLACK)
    }

    pub fn label(&self) -> Option<&'a str> {
        self.patches.label(self.id)
    }

    pub fn get(&self, var: &str) -> Result<f64> {
        self.patches.value(self.id, var)
    }

    pub fn neighbors(&self) -> &'a [AgentId] {
        self.patches.neighbors(self.id).unwrap_or_default()
    }

    pub fn neighbors4(&self) -> &'a [AgentId] {
        self.patches.neighbors4(self.id).unwrap_or_default()
    }

    /// Patch `dx`, `dy` away, `None` off-world
    pub fn patch_at(&self, dx: i32, dy: i32) -> Option<Patch<'a>> {
        let (x, y) = self.patches.xy(self.id);
        self.patches.patch_xy(x + dx, y + dy).map(|id| Patch::new(self.patches, id))
    }

    pub fn breed(&self) -> Result<BreedId> {
        self.patches.agents().breed_of(self.id)
    }
}

impl std::fmt::Debug for Patch<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Patch({} @ {}, {})", self.id, self.x(), self.y())
    }
}
