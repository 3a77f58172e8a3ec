//! Sphere tracing against a signed distance field.

use physics::{sdf_cube, Mat3, Vec3};

/// Finite-difference step for normal estimation.
pub const NORMAL_EPSILON: f32 = 1e-4;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RaymarchConfig {
    /// Iteration budget per ray.
    pub max_steps: u32,
    /// Distance below which the ray counts as a hit.
    pub epsilon: f32,
    /// Travel distance past which the ray counts as a miss.
    pub max_distance: f32,
}

impl Default for RaymarchConfig {
    fn default() -> Self {
        Self {
            max_steps: 100,
            epsilon: 0.001,
            max_distance: 100.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hit {
    pub point: Vec3,
    /// Unit surface normal estimated from the field.
    pub normal: Vec3,
    /// Distance travelled along the ray.
    pub t: f32,
}

/// March from `origin` along unit `direction` until `sdf` drops below
/// `config.epsilon`.
///
/// Each step advances by the field value, which never overshoots a
/// Lipschitz-1 field. A miss is `None`: either the ray escaped past
/// `max_distance` or the step budget ran out.
pub fn march<F>(origin: Vec3, direction: Vec3, config: &RaymarchConfig, sdf: F) -> Option<Hit>
where
    F: Fn(Vec3) -> f32,
{
    let mut t = 0.0f32;
    for _ in 0..config.max_steps {
        let point = origin + direction * t;
        let dist = sdf(point);
        if dist < config.epsilon {
            return Some(Hit {
                point,
                normal: estimate_normal(&sdf, point),
                t,
            });
        }
        t += dist;
        if t > config.max_distance {
            return None;
        }
    }
    None
}

/// Central differences of `sdf` along each axis, normalized.
pub fn estimate_normal<F>(sdf: &F, p: Vec3) -> Vec3
where
    F: Fn(Vec3) -> f32,
{
    let h = NORMAL_EPSILON;
    let dx = Vec3::new(h, 0.0, 0.0);
    let dy = Vec3::new(0.0, h, 0.0);
    let dz = Vec3::new(0.0, 0.0, h);
    Vec3::new(
        sdf(p + dx) - sdf(p - dx),
        sdf(p + dy) - sdf(p - dy),
        sdf(p + dz) - sdf(p - dz),
    )
    .normalize()
}

/// March a ray against an oriented cube.
#[must_use]
pub fn raymarch(
    origin: Vec3,
    direction: Vec3,
    config: &RaymarchConfig,
    cube_center: Vec3,
    cube_size: f32,
    cube_rotation: &Mat3,
) -> Option<Hit> {
    march(origin, direction, config, |p| {
        sdf_cube(p, cube_center, cube_size, cube_rotation)
    })
}
