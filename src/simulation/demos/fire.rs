//! Forest fire: trees ignite from burning 4-neighbors, burning patches
//! turn into embers that fade through a red gradient and die out.

use log::info;

use crate::core::Result;
use crate::domain::agentset::{AgentId, BreedId};
use crate::domain::color::{Color, ColorMap};
use crate::domain::patches::Patches;
use crate::simulation::model::{Model, ModelContext};
use crate::spatial::world::WorldOptions;

const TREE: Color = Color::rgb(0, 255, 0);
const DIRT: Color = Color::YELLOW;

pub struct FireModel {
    /// Percent of non-edge patches that start as trees
    pub density: usize,
    fires: BreedId,
    embers: BreedId,
    fire_colors: ColorMap,
    burned_trees: usize,
    initial_trees: usize,
}

impl FireModel {
    pub fn new(density: usize) -> Self {
        Self {
            density,
            fires: BreedId::BASE,
            embers: BreedId::BASE,
            fire_colors: ColorMap::gradient(6, &[Color::RED, Color::rgb(128, 0, 0)]),
            burned_trees: 0,
            initial_trees: 0,
        }
    }

    pub fn world() -> WorldOptions {
        WorldOptions::centered(125, 2)
    }

    pub fn fires(&self) -> BreedId { self.fires }

    pub fn embers(&self) -> BreedId { self.embers }

    pub fn burned_trees(&self) -> usize { self.burned_trees }

    pub fn initial_trees(&self) -> usize { self.initial_trees }

    pub fn percent_burned(&self) -> f64 {
        if self.initial_trees == 0 {
            return 0.0;
        }
        self.burned_trees as f64 / self.initial_trees as f64 * 100.0
    }

    fn ignite(&mut self, patches: &mut Patches, id: AgentId) -> Result<()> {
        patches.set_color(id, self.fire_colors.colors()[0])?;
        patches.set_breed(id, self.fires)?;
        self.burned_trees += 1;
        Ok(())
    }

    fn fade_embers(&self, patches: &mut Patches) -> Result<()> {
        let embers = patches.agents().members(self.embers)?.to_vec();
        let last = self.fire_colors.len() - 1;
        for id in embers {
            match patches.color(id).and_then(|c| self.fire_colors.index_of(c)) {
                Some(ix) if ix < last => patches.set_color(id, self.fire_colors.colors()[ix + 1])?,
                _ => patches.set_breed(id, BreedId::BASE)?,
            }
        }
        Ok(())
    }
}

impl Default for FireModel {
    fn default() -> Self {
        Self::new(60)
    }
}

impl Model for FireModel {
    fn setup(&mut self, ctx: &mut ModelContext) -> Result<()> {
        ctx.anim.set_rate(60.0);
        self.fires = ctx.patches.agents_mut().breed("fires");
        self.embers = ctx.patches.agents_mut().breed("embers");

        let min_x = ctx.world().min_x;
        for id in ctx.patches.ids() {
            let (x, _) = ctx.patches.xy(id);
            if x == min_x {
                self.ignite(&mut ctx.patches, id)?;
            } else if ctx.rng.below(100) < self.density {
                ctx.patches.set_color(id, TREE)?;
            } else {
                ctx.patches.set_color(id, DIRT)?;
            }
        }

        self.burned_trees = 0;
        self.initial_trees = ctx.patches.ids().filter(|&id| ctx.patches.color(id) == Some(TREE)).count();
        Ok(())
    }

    fn step(&mut self, ctx: &mut ModelContext) -> Result<()> {
        let fires = ctx.patches.agents().members(self.fires)?.to_vec();
        if fires.is_empty() && !ctx.patches.agents().any(self.embers)? {
            info!("fire out: {}", ctx.anim);
            info!("percent burned {:.2}", self.percent_burned());
            ctx.anim.stop();
            return Ok(());
        }

        for id in fires {
            let neighbors = ctx.patches.neighbors4(id)?.to_vec();
            for n in neighbors {
                if ctx.patches.color(n) == Some(TREE) {
                    self.ignite(&mut ctx.patches, n)?;
                }
            }
            ctx.patches.set_breed(id, self.embers)?;
        }
        self.fade_embers(&mut ctx.patches)?;

        if ctx.anim.ticks() % 100 == 0 {
            info!("{}", ctx.anim);
        }
        Ok(())
    }
}
