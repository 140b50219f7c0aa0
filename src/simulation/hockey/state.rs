/// Hockey game phases. Timestamps are host milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameState {
    /// Waiting for the arena image of `level`
    Loading { level: usize },
    Running,
    /// Puck hit a wall or left the arena; it respawns at `resume_at`
    Crashed { resume_at: f64 },
    /// Puck reached the goal. The banner appears at `banner_at`, the next
    /// level starts loading at `next_level_at`.
    Scored { banner_at: f64, next_level_at: f64, banner: bool },
}

impl GameState {
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, GameState::Running)
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        matches!(self, GameState::Crashed { .. } | GameState::Scored { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameState::Loading { .. } => "loading",
            GameState::Running => "running",
            GameState::Crashed { .. } => "crashed",
            GameState::Scored { .. } => "scored",
        }
    }
}
