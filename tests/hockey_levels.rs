use std::io::Cursor;

use agentscape_engine::render::CommandList;
use agentscape_engine::simulation::hockey::{GameState, HockeyConfig, HockeyGame, LevelConfig};
use agentscape_engine::systems::charges::{Charge, Vec2};
use image::{ImageFormat, Rgba, RgbaImage};

/// 300x200 arena with a green nest on the left and a red goal strip on the right
fn arena_png() -> Vec<u8> {
    let mut img = RgbaImage::from_pixel(300, 200, Rgba([240, 240, 240, 255]));
    for x in 30..=40 {
        for y in 95..=105 {
            img.put_pixel(x, y, Rgba([0, 255, 0, 255]));
        }
    }
    for x in 280..290 {
        for y in 0..200 {
            img.put_pixel(x, y, Rgba([255, 0, 0, 255]));
        }
    }
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
    bytes
}

fn config() -> HockeyConfig {
    let level = |url: &str| LevelConfig {
        arena_url: url.to_string(),
        // a repelling charge behind the nest pushes the puck toward the goal
        charges: vec![Charge::new(0.0, 100.0, 20.0)],
        spawn_velocity: None,
    };
    HockeyConfig { levels: vec![level("one.png"), level("two.png")], ..HockeyConfig::default() }
}

#[test]
fn repelled_puck_scores_and_advances() {
    let mut game = HockeyGame::new(config()).unwrap();
    assert_eq!(game.pending_url(), Some("one.png"));
    game.load_arena_png(&arena_png()).unwrap();
    assert_eq!(game.puck().pos, Vec2::new(35.0, 100.0));

    let mut list = CommandList::new();
    let mut now = 0.0;
    while game.state().is_running() && now < 60_000.0 {
        game.frame(now, &mut list).unwrap();
        now += 20.0;
    }
    let GameState::Scored { next_level_at, .. } = game.state() else {
        panic!("expected a goal, got {:?}", game.state());
    };
    assert!(game.puck().pos.x > 250.0);
    assert!((game.puck().pos.y - 100.0).abs() < 1e-6);

    while !matches!(game.state(), GameState::Loading { .. }) {
        game.frame(now, &mut list).unwrap();
        now += 20.0;
    }
    assert!(now >= next_level_at);
    assert!(list.texts().any(|t| t == "GOAL!"));
    assert_eq!(game.level(), 1);
    assert_eq!(game.pending_url(), Some("two.png"));
}
