use super::*;

fn blob_field(solver: &mut FluidSolver) {
    let c = (solver.width() / 2) as f32;
    for y in 0..solver.height() {
        for x in 0..solver.width() {
            let (dx, dy) = (x as f32 - c, y as f32 - c);
            let g = (-(dx * dx + dy * dy) / 8.0).exp();
            solver.set_velocity(x, y, dx * g, dy * g);
        }
    }
}

#[test]
fn params_from_json_fill_defaults() {
    assert_eq!(FluidParams::from_json("{}").unwrap(), FluidParams::default());
    let p = FluidParams::from_json(r#"{"solverIterations": 20, "elasticity": 0.5}"#).unwrap();
    assert_eq!(p.solver_iterations, 20);
    assert_eq!(p.elasticity, 0.5);
    assert_eq!(p.dt, 1.0);
}

#[test]
fn rejects_tiny_grid() {
    assert!(FluidSolver::new(2, 8, FluidParams::default()).is_err());
}

#[test]
fn projection_reduces_divergence() {
    let params = FluidParams { solver_iterations: 200, ..FluidParams::default() };
    let mut solver = FluidSolver::new(24, 24, params).unwrap();
    blob_field(&mut solver);
    let before = solver.divergence_norm();
    assert!(before > 1.0);
    solver.project();
    let after = solver.divergence_norm();
    assert!(after < 0.5 * before, "before {} after {}", before, after);
}

#[test]
fn obstacles_hold_zero_density_after_step() {
    let mut solver = FluidSolver::new(12, 12, FluidParams::default()).unwrap();
    solver.add_border_walls();
    solver.set_obstacle(6, 6, true);
    for y in 0..12 {
        for x in 0..12 {
            solver.add_density(x, y, 1.0);
        }
    }
    solver.add_velocity(4, 4, 2.0, 1.0);
    solver.step();

    for y in 0..12 {
        for x in 0..12 {
            if solver.is_obstacle(x, y) {
                assert_eq!(solver.density().get_xy(x, y), 0.0, "obstacle ({}, {})", x, y);
                assert_eq!(solver.u().get_xy(x, y), 0.0);
                assert_eq!(solver.v().get_xy(x, y), 0.0);
            }
        }
    }
    assert!(solver.density().get_xy(3, 3) > 0.0);
}

#[test]
fn swaps_exchange_buffers_without_copying() {
    let mut solver = FluidSolver::new(4, 4, FluidParams::default()).unwrap();
    let cur = solver.density().data().as_ptr();
    let prev = solver.density_prev().data().as_ptr();
    solver.swap_density();
    assert_eq!(solver.density().data().as_ptr(), prev);
    assert_eq!(solver.density_prev().data().as_ptr(), cur);

    let u = solver.u().data().as_ptr();
    solver.swap_velocity();
    solver.swap_velocity();
    assert_eq!(solver.u().data().as_ptr(), u);
}

#[test]
fn source_buffers_are_cleared_after_step() {
    let mut solver = FluidSolver::new(8, 8, FluidParams::default()).unwrap();
    solver.add_density(4, 4, 3.0);
    solver.step();
    assert!(solver.density_prev().data().iter().all(|&v| v == 0.0));
    let total = solver.density().sum();
    assert!(total > 0.0);
}

#[test]
fn jet_stays_finite() {
    let mut solver = FluidSolver::new(24, 24, FluidParams::default()).unwrap();
    solver.add_border_walls();
    for _ in 0..10 {
        for i in (0..=6).step_by(2) {
            solver.set_density(10 + i, 10, 1.0);
            solver.set_velocity(10 + i, 10, 0.0, 10.0);
        }
        solver.step();
    }
    assert!(solver.density().data().iter().all(|v| v.is_finite()));
    assert!(solver.u().data().iter().all(|v| v.is_finite()));
}
