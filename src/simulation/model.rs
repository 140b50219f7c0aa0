//! Model framework - user models plug `setup` / `step` / `draw` into a
//! runner that owns the world, the patches, the animator and the RNG.

use crate::core::utils::Xorshift32;
use crate::core::Result;
use crate::domain::patches::Patches;
use crate::render::DrawTarget;
use crate::spatial::world::{WorldBounds, WorldOptions};

use super::animator::Animator;

/// Everything a model reads and mutates besides its own fields
pub struct ModelContext {
    pub patches: Patches,
    pub anim: Animator,
    pub rng: Xorshift32,
}

impl ModelContext {
    pub fn new(options: &WorldOptions, rng: Xorshift32) -> Result<Self> {
        Ok(Self {
            patches: Patches::new(WorldBounds::new(options)?),
            anim: Animator::default(),
            rng,
        })
    }

    #[inline]
    pub fn world(&self) -> &WorldBounds {
        self.patches.world()
    }
}

pub trait Model {
    /// (Re)initialize model state on fresh patches
    fn setup(&mut self, ctx: &mut ModelContext) -> Result<()>;

    fn step(&mut self, ctx: &mut ModelContext) -> Result<()>;

    fn draw(&mut self, ctx: &ModelContext, target: &mut dyn DrawTarget) {
        ctx.patches.draw(target);
    }
}

pub struct ModelRunner<M: Model> {
    options: WorldOptions,
    ctx: ModelContext,
    model: M,
}

impl<M: Model> ModelRunner<M> {
    pub fn new(options: WorldOptions, model: M) -> Result<Self> {
        Self::with_rng(options, model, Xorshift32::default())
    }

    pub fn with_rng(options: WorldOptions, model: M, rng: Xorshift32) -> Result<Self> {
        let ctx = ModelContext::new(&options, rng)?;
        let mut runner = Self { options, ctx, model };
        runner.model.setup(&mut runner.ctx)?;
        Ok(runner)
    }

    pub fn model(&self) -> &M { &self.model }

    pub fn model_mut(&mut self) -> &mut M { &mut self.model }

    pub fn context(&self) -> &ModelContext { &self.ctx }

    pub fn context_mut(&mut self) -> &mut ModelContext { &mut self.ctx }

    pub fn patches(&self) -> &Patches { &self.ctx.patches }

    pub fn animator(&self) -> &Animator { &self.ctx.anim }

    pub fn options(&self) -> &WorldOptions { &self.options }

    /// Fresh patches and animator, then `setup`. The RNG stream continues.
    pub fn reset(&mut self, restart: bool) -> Result<()> {
        self.ctx.anim.stop();
        let rng = self.ctx.rng.clone();
        self.ctx = ModelContext::new(&self.options, rng)?;
        self.model.setup(&mut self.ctx)?;
        if restart {
            self.start();
        }
        Ok(())
    }

    pub fn start(&mut self) {
        self.ctx.anim.start();
    }

    pub fn stop(&mut self) {
        self.ctx.anim.stop();
    }

    /// Stop, then run exactly one step + draw
    pub fn once(&mut self, target: &mut dyn DrawTarget) -> Result<()> {
        self.stop();
        self.frame(target)
    }

    /// Host animation callback. Returns whether a frame ran.
    pub fn tick(&mut self, now_ms: f64, target: &mut dyn DrawTarget) -> Result<bool> {
        if !self.ctx.anim.tick(now_ms) {
            return Ok(false);
        }
        self.frame(target)?;
        Ok(true)
    }

    fn frame(&mut self, target: &mut dyn DrawTarget) -> Result<()> {
        self.ctx.anim.begin_step();
        self.model.step(&mut self.ctx)?;
        self.model.draw(&self.ctx, target);
        self.ctx.anim.end_draw();
        Ok(())
    }

    /// New world geometry; always rebuilds the model
    pub fn resize_world(&mut self, options: WorldOptions, restart: bool) -> Result<()> {
        WorldBounds::new(&options)?;
        self.options = options;
        self.reset(restart)
    }

    /// Pixel scale only; model state is kept
    pub fn set_patch_size(&mut self, patch_size: u32) -> Result<()> {
        self.ctx.patches.set_patch_size(patch_size)?;
        self.options.patch_size = patch_size;
        Ok(())
    }
}
