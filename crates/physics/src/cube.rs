use crate::shapes::sdf_cube;
use crate::{Mat3, Vec3};

/// Initial tilt applied at startup: yaw 0.6 rad after pitch -0.4 rad.
pub const INITIAL_YAW: f32 = 0.6;
pub const INITIAL_PITCH: f32 = -0.4;
pub const INITIAL_ANGULAR_VELOCITY: Vec3 = Vec3::new(0.25, 0.35, 0.10);

/// The single rendered body. Mutated once per frame by
/// [`crate::PhysicsIntegrator`] and read by the renderer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubeState {
    /// Orientation; kept orthonormal by periodic re-orthonormalization.
    pub rotation: Mat3,
    /// Angular velocity in rad/s about the world axes.
    pub angular_velocity: Vec3,
    pub position: Vec3,
    /// Half extent of the cube.
    pub size: f32,
    /// Whether the cube is flying its orbital pattern.
    pub motion_mode: bool,
    /// Orbit phase in `[0, 2*PI)`.
    pub motion_phase: f32,
}

impl CubeState {
    /// Cube at rest at the origin with identity orientation.
    #[must_use]
    pub fn at_rest(size: f32) -> Self {
        Self {
            rotation: Mat3::IDENTITY,
            angular_velocity: Vec3::ZERO,
            position: Vec3::ZERO,
            size,
            motion_mode: false,
            motion_phase: 0.0,
        }
    }

    /// Cube as it appears when the program starts: tilted and already spinning.
    #[must_use]
    pub fn new(size: f32) -> Self {
        Self {
            rotation: Mat3::rotate_y(INITIAL_YAW) * Mat3::rotate_x(INITIAL_PITCH),
            angular_velocity: INITIAL_ANGULAR_VELOCITY,
            ..Self::at_rest(size)
        }
    }

    #[must_use]
    pub fn sdf(&self, point: Vec3) -> f32 {
        sdf_cube(point, self.position, self.size, &self.rotation)
    }

    /// World-space point expressed in the cube's local frame.
    #[must_use]
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        self.rotation.transpose() * (point - self.position)
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_orientation_is_orthonormal() {
        let cube = CubeState::default();
        assert!(cube.rotation.is_orthonormal(1e-5));
        assert!(!cube.motion_mode);
        assert_eq!(cube.position, Vec3::ZERO);
    }

    #[test]
    fn sdf_follows_position() {
        let mut cube = CubeState::at_rest(0.5);
        cube.position = Vec3::new(0.0, 3.0, 0.0);
        assert!((cube.sdf(Vec3::new(0.0, 3.0, 0.0)) + 0.5).abs() < 1e-6);
        assert!((cube.sdf(Vec3::ZERO) - 2.5).abs() < 1e-6);
    }
}
