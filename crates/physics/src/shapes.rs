use crate::{Mat3, Vec3};

/// Signed distance from `local` to an axis-aligned cube centered at the
/// origin with the given half extent. Negative inside, zero on the surface.
#[must_use]
pub fn sdf_box(local: Vec3, half_extent: f32) -> f32 {
    let q = local.abs() - Vec3::new(half_extent, half_extent, half_extent);
    let outside = q.max_scalar(0.0).length();
    let inside = q.max_element().min(0.0);
    outside + inside
}

/// Signed distance from `point` to a cube placed at `center` with orientation
/// `rotation`.
///
/// The point is carried into the cube's frame with the transpose of
/// `rotation`, which is only its inverse while `rotation` stays orthonormal.
/// The result is Lipschitz-1, so it is a safe sphere-tracing step.
#[must_use]
pub fn sdf_cube(point: Vec3, center: Vec3, half_extent: f32, rotation: &Mat3) -> f32 {
    let local = rotation.transpose() * (point - center);
    sdf_box(local, half_extent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_sdf_at_center() {
        assert!((sdf_box(Vec3::ZERO, 1.0) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn face_centers_are_exactly_on_surface() {
        let center = Vec3::new(0.5, -2.0, 3.0);
        let h = 1.25;
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            for sign in [1.0, -1.0] {
                let p = center + axis * (sign * h);
                assert_eq!(sdf_cube(p, center, h, &Mat3::IDENTITY), 0.0);
            }
        }
    }

    #[test]
    fn corner_distance_is_euclidean() {
        let d = sdf_box(Vec3::new(2.0, 2.0, 2.0), 1.0);
        assert!((d - 3.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn rotation_moves_the_surface() {
        // A cube rotated 45 degrees about Z reaches sqrt(2) along X.
        let r = Mat3::rotate_z(std::f32::consts::FRAC_PI_4);
        let d = sdf_cube(Vec3::new(2.0f32.sqrt(), 0.0, 0.0), Vec3::ZERO, 1.0, &r);
        assert!(d.abs() < 1e-5);
    }
}
