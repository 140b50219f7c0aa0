#![cfg(target_arch = "wasm32")]

use agentscape_engine::{DemoWorld, Hockey};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn demo_world_ticks_and_records_commands() {
    agentscape_engine::init();
    let mut world = DemoWorld::new("diffusion", None).unwrap();
    world.start();
    assert!(world.tick(0.0).unwrap());
    assert_eq!(world.ticks(), 1);
    assert!(world.draw_commands().unwrap().contains("pixels"));
    assert!(DemoWorld::new("boids", None).is_err());

    let past = world.num_x() * world.num_y();
    assert!(world.neighbors(past).is_err());
    assert!(world.neighbors4(past - 1).is_ok());
    assert!(world.resize_world(r#"{"minX":-2000000000,"maxX":2000000000}"#, false).is_err());
}

#[wasm_bindgen_test]
fn hockey_waits_for_its_arena() {
    let mut game = Hockey::new(None).unwrap();
    assert!(game.pending_url().is_some());
    assert!(!game.frame(0.0).unwrap());

    let (w, h) = (40u32, 20u32);
    let mut rgba = vec![255u8; (w * h * 4) as usize];
    // green nest pixel at (5, 10)
    let i = ((10 * w + 5) * 4) as usize;
    rgba[i..i + 4].copy_from_slice(&[0, 255, 0, 255]);
    game.load_arena_rgba(w, h, rgba).unwrap();
    assert_eq!(game.state(), "running");
    assert_eq!((game.puck_x(), game.puck_y()), (5.0, 10.0));
    assert_eq!(game.image_len(), (w * h) as usize);
}
