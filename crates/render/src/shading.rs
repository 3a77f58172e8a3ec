//! # Shading
//!
//! Lighting for a single cube hit: Lambert diffuse, a reflect-based
//! specular lobe, soft shadows and ambient occlusion sampled from the cube's
//! own distance field, plus the edge test that selects the edge glyph set.

use physics::{CubeState, Mat3, Vec3};

pub const SPECULAR_EXPONENT: f32 = 32.0;
pub const GAMMA: f32 = 1.1;

/// Offset along the normal before marching toward the light.
pub const SHADOW_BIAS: f32 = 0.015;
pub const SHADOW_STEPS: u32 = 16;
pub const SHADOW_START: f32 = 0.02;
pub const SHADOW_MIN_STEP: f32 = 0.03;
/// Field value at which a shadow ray counts as blocked.
pub const SHADOW_HIT_THRESHOLD: f32 = 0.0005;
/// Penumbra sharpness: larger is harder.
pub const SHADOW_SOFTNESS: f32 = 4.0;

pub const AO_STEPS: u32 = 5;

pub const FOG_NEAR: f32 = 3.5;
pub const FOG_FAR: f32 = 9.5;
/// Attenuation reached at [`FOG_FAR`].
pub const FOG_STRENGTH: f32 = 0.35;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
}

impl Light {
    /// Point light with the standard coefficients.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self {
            position,
            ambient: 0.2,
            diffuse: 0.8,
            specular: 0.5,
        }
    }
}

impl Default for Light {
    /// In front of the cube, high and to the left.
    fn default() -> Self {
        Self::at(Vec3::new(-3.0, 4.5, 4.0))
    }
}

/// Penumbra factor from marching `light_dir` out of `point`: `0.0` is fully
/// shadowed, values near `1.0` are fully lit.
#[must_use]
pub fn soft_shadow(point: Vec3, light_dir: Vec3, light_distance: f32, cube: &CubeState) -> f32 {
    let mut shadow = 1.0f32;
    let mut t = SHADOW_START;
    for _ in 0..SHADOW_STEPS {
        if t >= light_distance {
            break;
        }
        let dist = cube.sdf(point + light_dir * t);
        if dist < SHADOW_HIT_THRESHOLD {
            return 0.0;
        }
        shadow = shadow.min(SHADOW_SOFTNESS * dist / t);
        t += dist.max(SHADOW_MIN_STEP);
    }
    shadow.max(0.0)
}

/// Ambient visibility in `[0, 1]` from sampling the field at increasing
/// distances along the normal. Samples closer to the surface weigh more.
#[must_use]
pub fn ambient_occlusion(point: Vec3, normal: Vec3, cube: &CubeState) -> f32 {
    let step = (cube.size * 0.12).max(0.03);
    let mut occlusion = 0.0f32;
    let mut max_possible = 0.0f32;

    for i in 1..=AO_STEPS {
        let weight = i as f32;
        let sample_dist = step * weight;
        let dist = cube.sdf(point + normal * sample_dist);
        occlusion += (sample_dist - dist).max(0.0) / weight;
        max_possible += step / weight;
    }

    if max_possible <= 0.0 {
        return 1.0;
    }
    1.0 - (occlusion * 1.1 / max_possible).clamp(0.0, 1.0)
}

/// Distance from a face within which a local coordinate counts as boundary.
#[must_use]
pub fn edge_threshold(size: f32) -> f32 {
    (size * 0.08).max(0.02)
}

/// Whether `hit_point` lies near a cube edge, i.e. at least two of its
/// local coordinates sit on a face boundary. `inv_rotation` is the
/// transpose of the cube orientation.
#[must_use]
pub fn is_near_edge(hit_point: Vec3, cube: &CubeState, inv_rotation: &Mat3) -> bool {
    let local = *inv_rotation * (hit_point - cube.position);
    let threshold = edge_threshold(cube.size);
    local
        .to_array()
        .iter()
        .filter(|c| (c.abs() - cube.size).abs() < threshold)
        .count()
        >= 2
}

/// Lit intensity in `[0, 1]` for a hit, before depth fog.
#[must_use]
pub fn shade(hit_point: Vec3, normal: Vec3, camera_pos: Vec3, cube: &CubeState, light: &Light) -> f32 {
    let to_light = light.position - hit_point;
    let light_distance = to_light.length().max(1e-4);
    let light_dir = to_light / light_distance;

    let diffuse = normal.dot(light_dir).max(0.0);

    let view_dir = (camera_pos - hit_point).normalize();
    let specular = if diffuse > 0.0 && light.specular > 0.0 {
        (-light_dir)
            .reflect(normal)
            .dot(view_dir)
            .max(0.0)
            .powf(SPECULAR_EXPONENT)
    } else {
        0.0
    };

    let shadow = soft_shadow(hit_point + normal * SHADOW_BIAS, light_dir, light_distance, cube);
    let ao = ambient_occlusion(hit_point, normal, cube);

    let ambient_term = light.ambient * 0.8 * (0.3 + 0.7 * ao);
    let direct_term = shadow * ao * (diffuse * light.diffuse + specular * light.specular);

    (ambient_term + direct_term).clamp(0.0, 1.0).powf(GAMMA)
}

/// Linear attenuation factor for a hit `depth` units from the camera.
#[must_use]
pub fn depth_fog(depth: f32) -> f32 {
    let n = ((depth - FOG_NEAR) / (FOG_FAR - FOG_NEAR)).clamp(0.0, 1.0);
    1.0 - FOG_STRENGTH * n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> CubeState {
        CubeState::at_rest(1.0)
    }

    #[test]
    fn open_face_is_unoccluded() {
        let cube = unit_cube();
        let ao = ambient_occlusion(Vec3::new(0.0, 0.0, 1.0), Vec3::Z, &cube);
        assert!((ao - 1.0).abs() < 1e-5);
    }

    #[test]
    fn light_behind_cube_is_blocked() {
        let cube = unit_cube();
        let point = Vec3::new(0.0, 0.0, 1.0 + SHADOW_BIAS);
        let to_light = Vec3::new(0.0, 0.0, -6.0) - point;
        let shadow = soft_shadow(point, to_light.normalize(), to_light.length(), &cube);
        assert_eq!(shadow, 0.0);
    }

    #[test]
    fn light_in_front_leaves_face_lit() {
        let cube = unit_cube();
        let point = Vec3::new(0.0, 0.0, 1.0 + SHADOW_BIAS);
        let shadow = soft_shadow(point, Vec3::Z, 5.0, &cube);
        assert!(shadow > 0.9);
    }

    #[test]
    fn edges_need_two_boundary_axes() {
        let cube = unit_cube();
        let inv = Mat3::IDENTITY;
        assert!(!is_near_edge(Vec3::new(0.0, 0.0, 1.0), &cube, &inv));
        assert!(is_near_edge(Vec3::new(0.95, 0.0, 1.0), &cube, &inv));
        assert!(is_near_edge(Vec3::new(1.0, 1.0, 1.0), &cube, &inv));
        assert!(!is_near_edge(Vec3::new(0.5, 0.5, 1.0), &cube, &inv));
    }

    #[test]
    fn edge_threshold_has_floor() {
        assert!((edge_threshold(0.1) - 0.02).abs() < 1e-6);
        assert!((edge_threshold(2.0) - 0.16).abs() < 1e-6);
    }

    #[test]
    fn fog_is_linear_between_planes() {
        assert_eq!(depth_fog(1.0), 1.0);
        assert!((depth_fog(6.5) - (1.0 - 0.175)).abs() < 1e-6);
        assert!((depth_fog(20.0) - 0.65).abs() < 1e-6);
    }

    #[test]
    fn buried_point_is_partially_occluded() {
        // Every sample sits 0.05 closer to the surface than its distance
        // along the normal, so occlusion / max is 0.05 / 0.12.
        let ao = ambient_occlusion(Vec3::new(0.0, 0.95, 0.0), Vec3::Y, &unit_cube());
        assert!((ao - (1.0 - 1.1 * 0.05 / 0.12)).abs() < 1e-4);
    }

    #[test]
    fn top_face_matches_hand_computed_intensity() {
        // Light direction y component is 3.5 / sqrt(37.25); no shadow, full
        // AO and the specular lobe points away from the camera.
        let cube = unit_cube();
        let camera = Vec3::new(0.0, 0.0, 6.0);
        let intensity = shade(Vec3::new(0.0, 1.0, 0.0), Vec3::Y, camera, &cube, &Light::default());
        let diffuse = 3.5 / 37.25f32.sqrt();
        let expected = (0.2 * 0.8 + 0.8 * diffuse).powf(GAMMA);
        assert!((intensity - expected).abs() < 1e-4);
        assert!((intensity - 0.589_77).abs() < 1e-4);
    }

    #[test]
    fn buried_point_gets_occluded_ambient_only() {
        let cube = unit_cube();
        let camera = Vec3::new(0.0, 0.0, 6.0);
        let intensity = shade(Vec3::new(0.0, 0.95, 0.0), Vec3::Y, camera, &cube, &Light::default());
        let ao: f32 = 1.0 - 1.1 * 0.05 / 0.12;
        let expected = (0.2 * 0.8 * (0.3 + 0.7 * ao)).powf(GAMMA);
        assert!((intensity - expected).abs() < 1e-4);
        assert!((intensity - 0.087_04).abs() < 1e-4);
    }

    #[test]
    fn facing_light_is_brighter_than_facing_away() {
        let cube = unit_cube();
        let light = Light::default();
        let camera = Vec3::new(0.0, 0.0, 6.0);
        let top = shade(Vec3::new(0.0, 1.0, 0.0), Vec3::Y, camera, &cube, &light);
        let bottom = shade(Vec3::new(0.0, -1.0, 0.0), -Vec3::Y, camera, &cube, &light);
        assert!(top > bottom);
        assert!(bottom > 0.0);
    }
}
