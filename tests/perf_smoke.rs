use agentscape_engine::simulation::PerfTimer;
use agentscape_engine::DemoWorld;

#[test]
fn perf_smoke_demo_frames() {
    for kind in ["fire", "diffusion", "wind"] {
        let mut world = DemoWorld::new(kind, None).unwrap_or_else(|_| panic!("{} demo", kind));
        let timer = PerfTimer::start();
        world.start();
        let mut now = 0.0;
        for _ in 0..5 {
            assert!(world.tick(now).unwrap_or(false));
            now += 100.0;
        }
        assert_eq!(world.ticks(), 5);
        assert_eq!(world.draws(), 5);
        assert_eq!(world.pixels_len(), (world.num_x() * world.num_y()) as usize);
        assert!(timer.elapsed_ms() >= 0.0);
        assert!(world.status().starts_with("ticks: 5, draws: 5"));
    }
}

#[test]
fn perf_smoke_patch_toolkit() {
    let mut world = DemoWorld::new("fire", Some(r#"{"patchSize":1,"minX":-20,"maxX":20,"minY":-10,"maxY":10}"#.to_string()))
        .unwrap_or_else(|_| panic!("fire demo"));
    assert_eq!((world.num_x(), world.num_y()), (41, 21));
    let center = world.patch_xy(0, 0).unwrap();
    assert_eq!(world.neighbors(center).map(|n| n.len()).unwrap_or(0), 8);
    assert_eq!(world.neighbors4(center).map(|n| n.len()).unwrap_or(0), 4);
    assert_eq!(world.patch_at_heading_and_distance(0.0, 0.0, 0.0, 2.0), world.patch_xy(0, 2));

    assert!(world.own("heat").is_ok());
    assert!(world.set_value(center, "heat", 8.0).is_ok());
    assert!(world.diffuse_n(8, "heat", 1.0).is_ok());
    assert!((world.value(center, "heat").unwrap_or(f64::NAN)).abs() < 1e-12);
}
