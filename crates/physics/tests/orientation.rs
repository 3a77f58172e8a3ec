use physics::{CubeState, InputState, Mat3, PhysicsConfig, PhysicsIntegrator, Vec3};

const DT: f32 = 1.0 / 60.0;

#[test]
fn zero_input_and_zero_dt_leaves_orientation_unchanged() {
    let mut integrator = PhysicsIntegrator::new();
    let mut cube = CubeState::new(1.0);
    let before = cube.rotation;
    integrator.step(&mut cube, &InputState::default(), &PhysicsConfig::default(), 0.0);
    assert_eq!(cube.rotation, before);
}

#[test]
fn sustained_pitch_approaches_but_never_exceeds_max_velocity() {
    let config = PhysicsConfig { acceleration: 60.0, damping: 0.97, max_velocity: 2.0 };
    let mut integrator = PhysicsIntegrator::new();
    let mut cube = CubeState::at_rest(1.0);
    let input = InputState { is_forward_pressed: true, ..InputState::default() };

    let mut previous = 0.0f32;
    for _ in 0..600 {
        integrator.step(&mut cube, &input, &config, DT);
        let speed = cube.angular_velocity.x.abs();
        assert!(speed + 1e-5 >= previous, "speed dropped from {previous} to {speed}");
        assert!(speed <= config.max_velocity + 1e-4);
        previous = speed;
    }
    assert!(cube.angular_velocity.x < 0.0);
    assert!((previous - config.max_velocity).abs() < 1e-3);
    assert_eq!(cube.angular_velocity.y, 0.0);
}

#[test]
fn damping_bleeds_off_spin_without_input() {
    let mut integrator = PhysicsIntegrator::new();
    let mut cube = CubeState::new(1.0);
    let start = cube.angular_velocity.length();
    for _ in 0..120 {
        integrator.step(&mut cube, &InputState::default(), &PhysicsConfig::default(), DT);
    }
    assert!(cube.angular_velocity.length() < start * 0.1);
}

#[test]
fn toggle_fires_only_on_press_edge() {
    let mut integrator = PhysicsIntegrator::new();
    let mut cube = CubeState::new(1.0);
    let config = PhysicsConfig::default();
    let pressed = InputState { is_toggle_pressed: true, ..InputState::default() };
    let released = InputState::default();

    integrator.step(&mut cube, &pressed, &config, DT);
    assert!(cube.motion_mode);
    // Held key does not re-toggle.
    integrator.step(&mut cube, &pressed, &config, DT);
    assert!(cube.motion_mode);

    integrator.step(&mut cube, &released, &config, DT);
    integrator.step(&mut cube, &pressed, &config, DT);
    assert!(!cube.motion_mode);
}

#[test]
fn on_off_on_returns_to_original() {
    let mut integrator = PhysicsIntegrator::new();
    let mut cube = CubeState::new(1.0);
    let original = cube.motion_mode;
    let config = PhysicsConfig::default();
    let pressed = InputState { is_toggle_pressed: true, ..InputState::default() };

    integrator.step(&mut cube, &pressed, &config, DT);
    integrator.step(&mut cube, &InputState::default(), &config, DT);
    integrator.step(&mut cube, &pressed, &config, DT);
    assert_eq!(cube.motion_mode, original);
}

#[test]
fn motion_mode_moves_cube_along_orbit() {
    let mut integrator = PhysicsIntegrator::new();
    let mut cube = CubeState::new(1.0);
    cube.motion_mode = true;
    for _ in 0..60 {
        integrator.step(&mut cube, &InputState::default(), &PhysicsConfig::default(), DT);
    }
    assert!((cube.motion_phase - 0.8).abs() < 1e-3);
    let expected = physics::integrator::orbit_position(cube.motion_phase);
    assert!((cube.position - expected).length() < 1e-6);
    assert!(cube.position != Vec3::ZERO);
}

#[test]
fn orientation_stays_orthonormal_over_long_runs() {
    let mut integrator = PhysicsIntegrator::new();
    let mut cube = CubeState::new(1.0);
    let input = InputState { is_right_pressed: true, ..InputState::default() };
    for _ in 0..5_000 {
        integrator.step(&mut cube, &input, &PhysicsConfig::default(), DT);
    }
    // Largest drift is bounded by at most one interval of composition.
    assert!(cube.rotation.is_orthonormal(1e-3));
    assert!((cube.rotation.determinant() - 1.0).abs() < 1e-3);
    assert_ne!(cube.rotation, Mat3::IDENTITY);
}
