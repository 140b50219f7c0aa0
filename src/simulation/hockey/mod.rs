//! Hockey - steer a charged puck into the goal with fixed point charges
//!
//! Each running frame advances the puck one `dt` through the Coulomb field,
//! sweeps its perimeter against the arena mask and reacts:
//!   wall / outer space -> Crashed -> (crash delay) respawn -> Running
//!   goal               -> Scored  -> (banner delay) "GOAL!"
//!                                 -> (goal delay) next level -> Loading
//! Arena images are decoded by the host: `pending_url` names the image the
//! game waits for, `load_arena*` hands it over.

mod config;
mod state;

pub use config::{default_levels, HockeyConfig, LevelConfig};
pub use state::GameState;

use image::RgbaImage;
use log::info;

use crate::core::{EngineError, Result};
use crate::domain::color::Color;
use crate::domain::patches::{rgba_image, PixelBuffer};
use crate::render::{DrawTarget, Path};
use crate::simulation::animator::Animator;
use crate::systems::arena::{ArenaMap, Collision};
use crate::systems::charges::{field_arrows, ChargeField, Puck, Vec2};

const CHARGE_RADIUS: f64 = 10.0;
const OUTLINE_WIDTH: f64 = 2.0;
const BANNER: &str = "GOAL!";
const BANNER_SIZE: f64 = 90.0;

pub struct HockeyGame {
    config: HockeyConfig,
    level: usize,
    state: GameState,
    field: ChargeField,
    puck: Puck,
    arena: Option<ArenaMap>,
    /// Arena image as canvas pixels
    image: PixelBuffer,
    anim: Animator,
}

impl HockeyGame {
    pub fn new(config: HockeyConfig) -> Result<Self> {
        config.validate()?;
        let mut game = Self {
            field: ChargeField::new(config.k),
            puck: Puck::at(Vec2::ZERO),
            anim: Animator::new(config.rate),
            config,
            level: 0,
            state: GameState::Loading { level: 0 },
            arena: None,
            image: PixelBuffer::new(0, 0),
        };
        game.goto_level(0);
        Ok(game)
    }

    pub fn config(&self) -> &HockeyConfig { &self.config }

    pub fn level(&self) -> usize { self.level }

    pub fn state(&self) -> GameState { self.state }

    pub fn puck(&self) -> &Puck { &self.puck }

    pub fn field(&self) -> &ChargeField { &self.field }

    pub fn arena(&self) -> Option<&ArenaMap> { self.arena.as_ref() }

    pub fn image(&self) -> &PixelBuffer { &self.image }

    pub fn animator(&self) -> &Animator { &self.anim }

    fn level_config(&self) -> &LevelConfig {
        &self.config.levels[self.level]
    }

    // === Levels ===

    /// Switch to level `n` (wrapping) and wait for its arena image
    pub fn goto_level(&mut self, n: usize) {
        self.anim.stop();
        self.level = n % self.config.levels.len();
        self.state = GameState::Loading { level: self.level };
        info!("hockey: loading level {} from {}", self.level, self.level_config().arena_url);
    }

    /// Arena URL the game is waiting for, if any
    pub fn pending_url(&self) -> Option<&str> {
        match self.state {
            GameState::Loading { .. } => Some(&self.level_config().arena_url),
            _ => None,
        }
    }

    pub fn load_arena_image(&mut self, image: &RgbaImage) {
        let arena = ArenaMap::from_image(image);
        let (w, h) = image.dimensions();
        let mut pixels = PixelBuffer::new(w, h);
        for (dst, p) in pixels.data_mut().iter_mut().zip(image.pixels()) {
            *dst = Color::rgba(p[0], p[1], p[2], p[3]).to_pixel();
        }
        info!("hockey: arena loaded for level {}", self.level);
        self.arena = Some(arena);
        self.image = pixels;
        self.start_level();
    }

    pub fn load_arena_rgba(&mut self, width: u32, height: u32, rgba: Vec<u8>) -> Result<()> {
        let image = rgba_image(width, height, rgba)?;
        self.load_arena_image(&image);
        Ok(())
    }

    pub fn load_arena_png(&mut self, bytes: &[u8]) -> Result<()> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        self.load_arena_image(&image);
        Ok(())
    }

    fn start_level(&mut self) {
        self.field = ChargeField::new(self.config.k);
        for ch in &self.config.levels[self.level].charges {
            self.field.add_charge(ch.x, ch.y, ch.value);
        }
        self.respawn();
        self.state = GameState::Running;
        self.anim.start();
    }

    fn respawn(&mut self) {
        let Some(arena) = &self.arena else {
            return;
        };
        let mut puck = Puck::at(arena.spawn_point());
        puck.radius = self.config.puck_radius;
        if let Some(vel) = self.level_config().spawn_velocity {
            puck.vel = vel;
        }
        self.puck = puck;
    }

    // === Charges ===

    pub fn add_charge(&mut self, x: f64, y: f64, value: f64) {
        self.field.add_charge(x, y, value);
    }

    pub fn clear_charges(&mut self) {
        self.field.clear_charges();
    }

    pub fn force_at(&self, x: f64, y: f64, charge: f64) -> Vec2 {
        self.field.force_at(Vec2::new(x, y), charge)
    }

    // === Frames ===

    /// Host animation callback. Runs pending transitions, then a step and a
    /// draw when one is due. Returns whether anything was drawn.
    pub fn frame(&mut self, now_ms: f64, target: &mut dyn DrawTarget) -> Result<bool> {
        match self.state {
            GameState::Loading { .. } => return Ok(false),
            GameState::Crashed { resume_at } => {
                if now_ms < resume_at {
                    return Ok(false);
                }
                self.respawn();
                self.state = GameState::Running;
                self.anim.start();
            }
            GameState::Scored { banner_at, next_level_at, banner } => {
                if now_ms >= next_level_at {
                    self.goto_level(self.level + 1);
                    return Ok(false);
                }
                if !banner && now_ms >= banner_at {
                    self.state = GameState::Scored { banner_at, next_level_at, banner: true };
                    self.draw(target);
                    return Ok(true);
                }
                return Ok(false);
            }
            GameState::Running => {}
        }

        if !self.anim.tick(now_ms) {
            return Ok(false);
        }
        self.anim.begin_step();
        self.step(now_ms)?;
        self.draw(target);
        self.anim.end_draw();
        Ok(true)
    }

    /// Advance the puck one frame and react to collisions
    pub fn step(&mut self, now_ms: f64) -> Result<()> {
        let arena = self.arena.as_ref().ok_or(EngineError::ArenaMissing)?;
        let next = self.config.integrator.advance(&self.field, &self.puck, self.config.dt);
        let hits = arena.check_collisions(&self.puck, &next, self.config.outer_space_padding);
        self.puck = next;

        match hits.outcome() {
            Some(Collision::OuterSpace) => {
                info!("hockey: puck lost in outer space");
                self.crash(now_ms);
            }
            Some(Collision::Wall) => {
                info!("hockey: puck hit a wall");
                self.crash(now_ms);
            }
            Some(Collision::Goal) => {
                info!("hockey: goal on level {}", self.level);
                self.anim.stop();
                self.state = GameState::Scored {
                    banner_at: now_ms + self.config.banner_delay_ms,
                    next_level_at: now_ms + self.config.goal_delay_ms,
                    banner: false,
                };
            }
            None => {}
        }

        if self.config.log_every > 0 && self.anim.ticks() % self.config.log_every == 0 {
            info!("{}", self.anim);
        }
        Ok(())
    }

    fn crash(&mut self, now_ms: f64) {
        self.anim.stop();
        self.state = GameState::Crashed { resume_at: now_ms + self.config.crash_delay_ms };
    }

    // === Drawing ===

    /// Arena image, field arrows, charges and puck, plus the banner after a goal
    pub fn draw(&self, target: &mut dyn DrawTarget) {
        let Some(arena) = &self.arena else {
            return;
        };
        let (w, h) = (arena.width() as f64, arena.height() as f64);
        target.put_pixels(self.image.width(), self.image.height(), self.image.data(), 1);

        let arrows: Vec<Path> = field_arrows(&self.field, w, h).iter().map(|a| a.to_path()).collect();
        target.draw_paths(&arrows);

        let mut bodies: Vec<Path> = self.field.charges().iter().map(|ch| charge_path(ch.x, ch.y, ch.value)).collect();
        bodies.push(puck_path(&self.puck));
        target.draw_paths(&bodies);

        if let GameState::Scored { banner: true, .. } = self.state {
            target.draw_text(BANNER, w / 2.0, h / 4.0, Color::GREEN, BANNER_SIZE);
        }
    }
}

/// Disc with a "+" (positive, red) or "-" (negative, blue) mark
fn charge_path(x: f64, y: f64, value: f64) -> Path {
    let r = CHARGE_RADIUS;
    let path = Path::new().circle(x, y, r).move_to(x - r / 2.0, y).line_to(x + r / 2.0, y);
    let path = if value > 0.0 {
        path.move_to(x, y - r / 2.0).line_to(x, y + r / 2.0).fill(Color::RED)
    } else {
        path.fill(Color::BLUE)
    };
    path.stroke(Color::WHITE, OUTLINE_WIDTH)
}

fn puck_path(puck: &Puck) -> Path {
    let (x, y, r) = (puck.pos.x, puck.pos.y, puck.radius);
    Path::new()
        .circle(x, y, r)
        .move_to(x - r / 2.0, y)
        .line_to(x + r / 2.0, y)
        .move_to(x, y - r / 2.0)
        .line_to(x, y + r / 2.0)
        .fill(Color::BLACK)
        .stroke(Color::WHITE, OUTLINE_WIDTH)
}
