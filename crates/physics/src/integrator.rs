//! # Physics Integration
//!
//! Turns discrete input intent into angular acceleration, integrates the
//! cube's angular velocity and orientation, and drives the optional orbital
//! motion pattern.

use std::f32::consts::TAU;

use tracing::debug;

use crate::cube::CubeState;
use crate::input::InputState;
use crate::types::{Mat3, Vec3};

/// Orbit phase advance in rad/s while motion mode is active.
pub const MOTION_ANGULAR_RATE: f32 = 0.8;
pub const ORBIT_RADIUS: f32 = 2.5;
/// Y radius of the orbit as a fraction of [`ORBIT_RADIUS`].
pub const ORBIT_ELLIPSE_Y: f32 = 0.6;
pub const ORBIT_DEPTH_AMPLITUDE: f32 = 2.0;
pub const ORBIT_DEPTH_OFFSET: f32 = -2.5;

/// Integrator calls between re-orthonormalizations of the orientation.
pub const ORTHONORMALIZE_INTERVAL: u32 = 100;

/// Frame rate the damping constant is calibrated against.
const DAMPING_REFERENCE_HZ: f32 = 60.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
    /// Angular acceleration applied per held key, rad/s^2.
    pub acceleration: f32,
    /// Velocity multiplier applied per 60 Hz frame.
    pub damping: f32,
    /// Upper bound on angular speed, rad/s.
    pub max_velocity: f32,
}

impl PhysicsConfig {
    /// Defaults scaled by a rotation speed multiplier.
    #[must_use]
    pub fn with_speed(speed: f32) -> Self {
        Self {
            acceleration: 9.0 * speed,
            damping: 0.97,
            max_velocity: 20.0 * speed,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::with_speed(1.0)
    }
}

/// Damping multiplier for a step of `dt` seconds, independent of frame rate.
#[must_use]
pub fn damping_factor(damping: f32, dt: f32) -> f32 {
    damping.powf(dt * DAMPING_REFERENCE_HZ)
}

/// Position on the orbital path for a given phase: an ellipse in X/Y whose
/// depth swings around [`ORBIT_DEPTH_OFFSET`].
#[must_use]
pub fn orbit_position(phase: f32) -> Vec3 {
    let (s, c) = phase.sin_cos();
    Vec3::new(
        c * ORBIT_RADIUS,
        s * ORBIT_RADIUS * ORBIT_ELLIPSE_Y,
        ORBIT_DEPTH_OFFSET + c * ORBIT_DEPTH_AMPLITUDE,
    )
}

/// Angular acceleration requested by the directional keys.
/// W/S drive pitch (X axis), A/D drive yaw (Y axis).
#[must_use]
pub fn input_acceleration(input: &InputState, acceleration: f32) -> Vec3 {
    let mut accel = Vec3::ZERO;
    if input.is_forward_pressed {
        accel.x -= acceleration;
    }
    if input.is_backward_pressed {
        accel.x += acceleration;
    }
    if input.is_left_pressed {
        accel.y -= acceleration;
    }
    if input.is_right_pressed {
        accel.y += acceleration;
    }
    accel
}

/// Owns the state that must persist between physics steps.
///
/// Not `Sync`-safe to share: calls must be serialized in frame order.
#[derive(Debug, Default, Clone)]
pub struct PhysicsIntegrator {
    toggle_was_pressed: bool,
    steps_since_orthonormalize: u32,
}

impl PhysicsIntegrator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls made since the last re-orthonormalization.
    #[must_use]
    pub fn steps_since_orthonormalize(&self) -> u32 {
        self.steps_since_orthonormalize
    }

    /// Advance `cube` by `dt` seconds under `input`.
    pub fn step(&mut self, cube: &mut CubeState, input: &InputState, config: &PhysicsConfig, dt: f32) {
        if input.is_toggle_pressed && !self.toggle_was_pressed {
            cube.motion_mode = !cube.motion_mode;
            debug!(motion_mode = cube.motion_mode, "Toggled orbital motion");
        }
        self.toggle_was_pressed = input.is_toggle_pressed;

        if cube.motion_mode {
            cube.motion_phase += MOTION_ANGULAR_RATE * dt;
            if cube.motion_phase > TAU {
                cube.motion_phase -= TAU;
            }
            cube.position = orbit_position(cube.motion_phase);
        }

        integrate_angular_velocity(cube, input_acceleration(input, config.acceleration), config, dt);
        integrate_rotation(cube, dt);

        self.steps_since_orthonormalize += 1;
        if self.steps_since_orthonormalize >= ORTHONORMALIZE_INTERVAL {
            cube.rotation = cube.rotation.orthonormalize();
            self.steps_since_orthonormalize = 0;
        }
    }
}

/// Apply acceleration, exponential damping and the speed clamp.
fn integrate_angular_velocity(cube: &mut CubeState, accel: Vec3, config: &PhysicsConfig, dt: f32) {
    cube.angular_velocity += accel * dt;
    cube.angular_velocity *= damping_factor(config.damping, dt);

    let speed = cube.angular_velocity.length();
    if speed > config.max_velocity {
        cube.angular_velocity = cube.angular_velocity.normalize() * config.max_velocity;
    }
}

/// Compose the per-axis increments as `Rz * Ry * Rx` and left-multiply them
/// onto the current orientation.
fn integrate_rotation(cube: &mut CubeState, dt: f32) {
    let delta = cube.angular_velocity * dt;
    let combined = Mat3::rotate_z(delta.z) * (Mat3::rotate_y(delta.y) * Mat3::rotate_x(delta.x));
    cube.rotation = combined * cube.rotation;
}
