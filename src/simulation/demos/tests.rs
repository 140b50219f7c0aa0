use super::*;
use crate::domain::agentset::BreedId;
use crate::domain::color::Color;
use crate::render::{CommandList, DrawCommand};
use crate::simulation::model::ModelRunner;
use crate::spatial::world::WorldOptions;

fn small() -> WorldOptions {
    WorldOptions::centered(8, 2)
}

#[test]
fn fire_burns_out_and_stops() {
    let mut runner = ModelRunner::new(small(), FireModel::new(100)).unwrap();
    let world = *runner.patches().world();
    let fires = runner.model().fires();
    // left column starts burning
    assert_eq!(runner.patches().agents().members(fires).unwrap().len(), world.num_y as usize);
    assert_eq!(runner.model().initial_trees(), world.size() - world.num_y as usize);

    runner.start();
    let mut list = CommandList::new();
    let mut now = 0.0;
    while !runner.animator().is_stopped() && runner.animator().ticks() < 1000 {
        runner.tick(now, &mut list).unwrap();
        now += 100.0;
    }
    assert!(runner.animator().is_stopped());
    let model = runner.model();
    assert!(runner.patches().agents().members(model.embers()).unwrap().is_empty());
    // a fully wooded world burns completely
    assert_eq!(model.burned_trees(), model.initial_trees());
    assert_eq!(model.percent_burned(), 100.0);
}

#[test]
fn fire_spreads_one_column_per_step() {
    let mut runner = ModelRunner::new(small(), FireModel::new(100)).unwrap();
    let mut list = CommandList::new();
    runner.once(&mut list).unwrap();
    let patches = runner.patches();
    let (min_x, num_y) = (patches.world().min_x, patches.world().num_y as usize);
    let fires = patches.agents().members(runner.model().fires()).unwrap();
    assert_eq!(fires.len(), num_y);
    assert!(fires.iter().all(|&id| patches.xy(id).0 == min_x + 1));
    // first column fell back to embers, one fade step in
    let embers = patches.agents().members(runner.model().embers()).unwrap();
    assert!(embers.iter().all(|&id| patches.xy(id).0 == min_x));
    assert!(embers.iter().all(|&id| patches.color(id) != Some(Color::RED)));
    assert_eq!(list.len(), 1);
}

#[test]
fn fire_without_trees_leaves_dirt() {
    let runner = ModelRunner::new(small(), FireModel::new(0)).unwrap();
    let patches = runner.patches();
    assert_eq!(runner.model().initial_trees(), 0);
    let dirt = patches.ids().filter(|&id| patches.color(id) == Some(Color::YELLOW)).count();
    assert_eq!(dirt, patches.len() - patches.world().num_y as usize);
}

#[test]
fn diffusion_demo_floods_under_mouse_and_stops() {
    let mut runner = ModelRunner::new(small(), DiffusionModel::new()).unwrap();
    runner.model_mut().set_mouse(Some((0.0, 0.0)));
    let mut list = CommandList::new();
    runner.once(&mut list).unwrap();
    let center = runner.patches().patch_xy(0, 0).unwrap();
    // flooded to 1, then lost a RATE share to neighbors also at 1
    let v = runner.patches().value(center, "ran").unwrap();
    assert!((v - 1.0).abs() < 1e-9, "center {}", v);

    runner.model_mut().set_mouse(None);
    runner.start();
    let mut now = 0.0;
    while !runner.animator().is_stopped() {
        runner.tick(now, &mut list).unwrap();
        now += 20.0;
    }
    assert_eq!(runner.animator().ticks(), diffusion::STOP_TICK);
}

#[test]
fn diffusion_demo_values_in_unit_range() {
    let runner = ModelRunner::new(small(), DiffusionModel::new()).unwrap();
    let patches = runner.patches();
    let values = patches.agents().props(BreedId::BASE, "ran").unwrap();
    assert!(values.iter().all(|v| (0.0..1.0).contains(v)));
    assert_eq!(patches.agents().props(BreedId::BASE, "ds").unwrap().iter().sum::<f64>(), 0.0);
}

#[test]
fn wind_paints_obstacles_and_moves_density() {
    let mut runner = ModelRunner::new(WindModel::world(), WindModel::default()).unwrap();
    let mut list = CommandList::new();
    for _ in 0..3 {
        runner.once(&mut list).unwrap();
    }
    let patches = runner.patches();
    let corner = patches.patch_xy(patches.world().min_x, patches.world().max_y).unwrap();
    assert_eq!(patches.value(corner, "dens").unwrap(), wind::OBSTACLE_DENSITY);

    let solver = runner.model().solver().unwrap();
    assert!(solver.density().sum() > 0.0);
    assert!(solver.density().data().iter().all(|d| d.is_finite()));

    // pixels then the vector overlay, once per frame
    assert!(matches!(list.commands().last(), Some(DrawCommand::Paths { .. })));
}

#[test]
fn wind_heading_turns_the_jet() {
    let mut runner = ModelRunner::new(WindModel::world(), WindModel::default()).unwrap();
    runner.model_mut().set_heading(0.0);
    let mut list = CommandList::new();
    runner.once(&mut list).unwrap();
    let solver = runner.model().solver().unwrap();
    let u: f32 = solver.u().data().iter().sum();
    let v: f32 = solver.v().data().iter().sum();
    assert!(u > 0.0);
    assert!(u > v.abs());
}
