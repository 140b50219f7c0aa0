use wasm_bindgen::prelude::*;

use crate::core::{EngineError, Result};
use crate::domain::agentset::AgentId;
use crate::domain::patches::Patches;
use crate::render::CommandList;
use crate::simulation::demos::{DiffusionModel, FireModel, WindModel};
use crate::simulation::hockey::{HockeyConfig, HockeyGame};
use crate::simulation::model::ModelRunner;
use crate::spatial::world::WorldOptions;

fn to_js(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

enum Demo {
    Fire(ModelRunner<FireModel>),
    Diffusion(ModelRunner<DiffusionModel>),
    Wind(ModelRunner<WindModel>),
}

/// Run the same expression against whichever runner is active
macro_rules! with_runner {
    ($demo:expr, $r:ident => $body:expr) => {
        match $demo {
            Demo::Fire($r) => $body,
            Demo::Diffusion($r) => $body,
            Demo::Wind($r) => $body,
        }
    };
}

impl Demo {
    fn create(kind: &str, options: Option<WorldOptions>) -> Result<Self> {
        match kind {
            "fire" => Ok(Demo::Fire(ModelRunner::new(options.unwrap_or_else(FireModel::world), FireModel::default())?)),
            "diffusion" => Ok(Demo::Diffusion(ModelRunner::new(
                options.unwrap_or_else(DiffusionModel::world),
                DiffusionModel::default(),
            )?)),
            "wind" => Ok(Demo::Wind(ModelRunner::new(options.unwrap_or_else(WindModel::world), WindModel::default())?)),
            other => Err(EngineError::InvalidConfig(format!("unknown demo `{}`", other))),
        }
    }

    fn patches(&self) -> &Patches {
        with_runner!(self, r => r.patches())
    }

    fn patches_mut(&mut self) -> &mut Patches {
        with_runner!(self, r => &mut r.context_mut().patches)
    }
}

/// One patch demo model behind a JS handle
#[wasm_bindgen]
pub struct DemoWorld {
    demo: Demo,
    commands: CommandList,
}

#[wasm_bindgen]
impl DemoWorld {
    /// `kind` is "fire", "diffusion" or "wind"; `world_json` overrides the
    /// demo's default world (`{"patchSize":4,"minX":-64,...}`)
    #[wasm_bindgen(constructor)]
    pub fn new(kind: &str, world_json: Option<String>) -> std::result::Result<DemoWorld, JsValue> {
        let options = world_json.as_deref().map(WorldOptions::from_json).transpose().map_err(to_js)?;
        let demo = Demo::create(kind, options).map_err(to_js)?;
        Ok(Self { demo, commands: CommandList::new() })
    }

    pub fn start(&mut self) {
        with_runner!(&mut self.demo, r => r.start())
    }

    pub fn stop(&mut self) {
        with_runner!(&mut self.demo, r => r.stop())
    }

    pub fn once(&mut self) -> std::result::Result<(), JsValue> {
        self.commands.clear();
        with_runner!(&mut self.demo, r => r.once(&mut self.commands)).map_err(to_js)
    }

    /// Animation frame callback; true when a frame ran and new draw
    /// commands are available
    pub fn tick(&mut self, now_ms: f64) -> std::result::Result<bool, JsValue> {
        let mut commands = CommandList::new();
        let ran = with_runner!(&mut self.demo, r => r.tick(now_ms, &mut commands)).map_err(to_js)?;
        if ran {
            self.commands = commands;
        }
        Ok(ran)
    }

    pub fn reset(&mut self, restart: bool) -> std::result::Result<(), JsValue> {
        with_runner!(&mut self.demo, r => r.reset(restart)).map_err(to_js)
    }

    #[wasm_bindgen(js_name = resizeWorld)]
    pub fn resize_world(&mut self, world_json: &str, restart: bool) -> std::result::Result<(), JsValue> {
        let options = WorldOptions::from_json(world_json).map_err(to_js)?;
        with_runner!(&mut self.demo, r => r.resize_world(options, restart)).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setPatchSize)]
    pub fn set_patch_size(&mut self, size: u32) -> std::result::Result<(), JsValue> {
        with_runner!(&mut self.demo, r => r.set_patch_size(size)).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn stopped(&self) -> bool {
        with_runner!(&self.demo, r => r.animator().is_stopped())
    }

    #[wasm_bindgen(getter)]
    pub fn ticks(&self) -> u64 {
        with_runner!(&self.demo, r => r.animator().ticks())
    }

    #[wasm_bindgen(getter)]
    pub fn draws(&self) -> u64 {
        with_runner!(&self.demo, r => r.animator().draws())
    }

    pub fn status(&self) -> String {
        with_runner!(&self.demo, r => r.animator().to_string())
    }

    // === Pixels ===

    /// Patch colors, one ABGR u32 per patch, row-major from the top row
    #[wasm_bindgen(js_name = pixelsPtr)]
    pub fn pixels_ptr(&self) -> *const u32 {
        self.demo.patches().pixels().ptr()
    }

    #[wasm_bindgen(js_name = pixelsLen)]
    pub fn pixels_len(&self) -> usize {
        self.demo.patches().pixels().len()
    }

    #[wasm_bindgen(getter, js_name = numX)]
    pub fn num_x(&self) -> u32 {
        self.demo.patches().world().num_x
    }

    #[wasm_bindgen(getter, js_name = numY)]
    pub fn num_y(&self) -> u32 {
        self.demo.patches().world().num_y
    }

    #[wasm_bindgen(getter, js_name = patchSize)]
    pub fn patch_size(&self) -> u32 {
        self.demo.patches().world().patch_size
    }

    /// Draw commands of the last frame as JSON
    #[wasm_bindgen(js_name = drawCommands)]
    pub fn draw_commands(&self) -> std::result::Result<String, JsValue> {
        self.commands.to_json().map_err(to_js)
    }

    // === Input ===

    /// Mouse in canvas pixels; only the diffusion demo listens
    #[wasm_bindgen(js_name = setMouse)]
    pub fn set_mouse(&mut self, x: f64, y: f64, down: bool) {
        let point = self.demo.patches().world().pixel_xy_to_patch_xy(x, y);
        if let Demo::Diffusion(r) = &mut self.demo {
            r.model_mut().set_mouse(down.then_some(point));
        }
    }

    /// Wind jet heading in radians, screen orientation
    #[wasm_bindgen(js_name = setWindHeading)]
    pub fn set_wind_heading(&mut self, radians: f64) {
        if let Demo::Wind(r) = &mut self.demo {
            r.model_mut().set_heading(radians);
        }
    }

    // === Patch toolkit ===

    pub fn own(&mut self, names: &str) -> std::result::Result<(), JsValue> {
        self.demo.patches_mut().own(names).map_err(to_js)
    }

    pub fn value(&self, id: AgentId, var: &str) -> std::result::Result<f64, JsValue> {
        self.demo.patches().value(id, var).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&mut self, id: AgentId, var: &str, value: f64) -> std::result::Result<(), JsValue> {
        self.demo.patches_mut().set_value(id, var, value).map_err(to_js)
    }

    #[wasm_bindgen(js_name = diffuseN)]
    pub fn diffuse_n(&mut self, n: u8, var: &str, rate: f64) -> std::result::Result<(), JsValue> {
        self.demo.patches_mut().diffuse_n(n, var, rate, None, 0.0, 0.0).map_err(to_js)
    }

    pub fn neighbors(&self, id: AgentId) -> std::result::Result<Vec<u32>, JsValue> {
        self.demo.patches().neighbors(id).map(<[u32]>::to_vec).map_err(to_js)
    }

    pub fn neighbors4(&self, id: AgentId) -> std::result::Result<Vec<u32>, JsValue> {
        self.demo.patches().neighbors4(id).map(<[u32]>::to_vec).map_err(to_js)
    }

    #[wasm_bindgen(js_name = patchXY)]
    pub fn patch_xy(&self, x: i32, y: i32) -> Option<u32> {
        self.demo.patches().patch_xy(x, y)
    }

    #[wasm_bindgen(js_name = patchAtHeadingAndDistance)]
    pub fn patch_at_heading_and_distance(&self, x: f64, y: f64, heading: f64, distance: f64) -> Option<u32> {
        self.demo.patches().patch_at_heading_and_distance(x, y, heading, distance)
    }
}

/// Charged-puck hockey behind a JS handle
#[wasm_bindgen(js_name = HockeyGame)]
pub struct Hockey {
    game: HockeyGame,
    commands: CommandList,
}

#[wasm_bindgen(js_class = HockeyGame)]
impl Hockey {
    /// Optional JSON `HockeyConfig`; stock levels when absent
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> std::result::Result<Hockey, JsValue> {
        let config = match config_json.as_deref() {
            Some(json) => HockeyConfig::from_json(json).map_err(to_js)?,
            None => HockeyConfig::default(),
        };
        let game = HockeyGame::new(config).map_err(to_js)?;
        Ok(Self { game, commands: CommandList::new() })
    }

    /// Arena image URL to decode, `undefined` while playing
    #[wasm_bindgen(js_name = pendingUrl)]
    pub fn pending_url(&self) -> Option<String> {
        self.game.pending_url().map(str::to_string)
    }

    #[wasm_bindgen(js_name = loadArenaRgba)]
    pub fn load_arena_rgba(&mut self, width: u32, height: u32, rgba: Vec<u8>) -> std::result::Result<(), JsValue> {
        self.game.load_arena_rgba(width, height, rgba).map_err(to_js)
    }

    #[wasm_bindgen(js_name = loadArenaPng)]
    pub fn load_arena_png(&mut self, bytes: &[u8]) -> std::result::Result<(), JsValue> {
        self.game.load_arena_png(bytes).map_err(to_js)
    }

    pub fn frame(&mut self, now_ms: f64) -> std::result::Result<bool, JsValue> {
        let mut commands = CommandList::new();
        let drawn = self.game.frame(now_ms, &mut commands).map_err(to_js)?;
        if drawn {
            self.commands = commands;
        }
        Ok(drawn)
    }

    #[wasm_bindgen(js_name = gotoLevel)]
    pub fn goto_level(&mut self, n: usize) {
        self.game.goto_level(n);
    }

    #[wasm_bindgen(getter)]
    pub fn level(&self) -> usize {
        self.game.level()
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.game.state().name().to_string()
    }

    #[wasm_bindgen(js_name = addCharge)]
    pub fn add_charge(&mut self, x: f64, y: f64, value: f64) {
        self.game.add_charge(x, y, value);
    }

    #[wasm_bindgen(js_name = clearCharges)]
    pub fn clear_charges(&mut self) {
        self.game.clear_charges();
    }

    #[wasm_bindgen(getter, js_name = puckX)]
    pub fn puck_x(&self) -> f64 {
        self.game.puck().pos.x
    }

    #[wasm_bindgen(getter, js_name = puckY)]
    pub fn puck_y(&self) -> f64 {
        self.game.puck().pos.y
    }

    /// Arena image pixels (ABGR u32), aliased by the pixels draw command
    #[wasm_bindgen(js_name = imagePtr)]
    pub fn image_ptr(&self) -> *const u32 {
        self.game.image().ptr()
    }

    #[wasm_bindgen(js_name = imageLen)]
    pub fn image_len(&self) -> usize {
        self.game.image().len()
    }

    #[wasm_bindgen(js_name = drawCommands)]
    pub fn draw_commands(&self) -> std::result::Result<String, JsValue> {
        self.commands.to_json().map_err(to_js)
    }

    pub fn status(&self) -> String {
        self.game.animator().to_string()
    }
}
