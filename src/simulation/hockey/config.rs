use serde::{Deserialize, Serialize};

use crate::core::{EngineError, Result};
use crate::systems::arena::OUTER_SPACE_PADDING;
use crate::systems::charges::{Charge, Integrator, Vec2, PUCK_RADIUS};

/// One arena image plus the fixed charges placed on it
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LevelConfig {
    pub arena_url: String,
    pub charges: Vec<Charge>,
    /// Puck velocity on every (re)spawn, at rest when absent
    pub spawn_velocity: Option<Vec2>,
}

impl LevelConfig {
    fn new(url: &str, charges: &[(f64, f64, f64)]) -> Self {
        Self {
            arena_url: url.to_string(),
            charges: charges.iter().map(|&(x, y, q)| Charge::new(x, y, q)).collect(),
            spawn_velocity: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HockeyConfig {
    /// Coulomb constant
    pub k: f64,
    /// Simulated time per frame
    pub dt: f64,
    pub integrator: Integrator,
    /// Frames per second
    pub rate: f64,
    pub puck_radius: f64,
    pub crash_delay_ms: f64,
    pub banner_delay_ms: f64,
    pub goal_delay_ms: f64,
    pub outer_space_padding: f64,
    /// Log animator stats every this many ticks
    pub log_every: u64,
    pub levels: Vec<LevelConfig>,
}

impl Default for HockeyConfig {
    fn default() -> Self {
        Self {
            k: 1.0,
            dt: 25.0,
            integrator: Integrator::default(),
            rate: 60.0,
            puck_radius: PUCK_RADIUS,
            crash_delay_ms: 400.0,
            banner_delay_ms: 60.0,
            goal_delay_ms: 3000.0,
            outer_space_padding: OUTER_SPACE_PADDING,
            log_every: 200,
            levels: default_levels(),
        }
    }
}

impl HockeyConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            return Err(EngineError::InvalidConfig("hockey needs at least one level".to_string()));
        }
        if !(self.rate > 0.0) || !(self.dt > 0.0) {
            return Err(EngineError::InvalidConfig(format!("rate {} and dt {} must be positive", self.rate, self.dt)));
        }
        Ok(())
    }
}

/// The four stock levels, played 1, 2, 3, then 0
pub fn default_levels() -> Vec<LevelConfig> {
    let mut level0 = LevelConfig::new("levels/hockeyLevel0.png", &[(200.0, 150.0, -1.8)]);
    level0.spawn_velocity = Some(Vec2::new(0.09, 0.05));
    vec![
        LevelConfig::new(
            "levels/hockeyLevel1.png",
            &[
                (10.0, 200.0, 1.0),
                (400.0, 90.0, -1.0),
                (420.0, 100.0, -1.0),
                (440.0, 110.0, -1.0),
                (460.0, 120.0, -1.0),
                (30.0, 240.0, 1.0),
            ],
        ),
        LevelConfig::new(
            "levels/hockeyLevel2.png",
            &[(10.0, 170.0, 1.0), (180.0, 370.0, 1.0), (380.0, 20.0, 1.0), (380.0, 210.0, -1.0)],
        ),
        LevelConfig::new(
            "levels/hockeyLevel3.png",
            &[(345.0, 290.0, 1.0), (185.0, 210.0, -1.0), (40.0, 90.0, 1.0), (40.0, 100.0, 1.0)],
        ),
        level0,
    ]
}
