//! # Frame Compositor
//!
//! Builds one frame into a [`Framebuffer`]: background layers first, then
//! the raymarched cube, then the sun marker and HUD on top.
//!
//! Per-pixel rays are independent, so the cube pass traces them in parallel
//! with `rayon` and writes the results back in index order. The output is
//! identical to a serial pass.

use physics::{CubeState, Mat3, Vec3};
use rayon::prelude::*;

use crate::background::{draw_environment, draw_rain};
use crate::camera::Camera;
use crate::framebuffer::{ColorClass, Framebuffer};
use crate::overlay::{draw_hud, draw_sun, hud_layout};
use crate::raymarch::{raymarch, RaymarchConfig};
use crate::shading::{depth_fog, is_near_edge, shade, Light};

/// Shading ramp from dark to bright. Index 0 is blank.
pub const SHADE_RAMP: [char; 13] = [' ', '·', '⋅', '∙', '•', '∘', '○', '◌', '◍', '◎', '●', '◉', '⬤'];

/// Edge glyphs from bright to dark with their lower intensity bounds.
const EDGE_GLYPHS: [(f32, char); 4] = [(0.8, '◆'), (0.6, '◇'), (0.4, '◈'), (0.2, '◊')];
const EDGE_GLYPH_DARK: char = '◌';

/// Timing and status information shown by the HUD.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub frame_time_ms: f32,
    /// Smoothed frames per second.
    pub fps: f32,
    /// Monotonic frame counter; also drives the rain animation.
    pub frame_count: u64,
    /// Master volume in `[0, 1]`.
    pub volume: f32,
}

/// Glyph for a shaded cube cell.
#[must_use]
pub fn intensity_to_glyph(intensity: f32, is_edge: bool) -> char {
    if is_edge {
        return EDGE_GLYPHS
            .iter()
            .find(|&&(bound, _)| intensity > bound)
            .map_or(EDGE_GLYPH_DARK, |&(_, glyph)| glyph);
    }
    let levels = SHADE_RAMP.len();
    let idx = (intensity.clamp(0.0, 1.0) * (levels - 1) as f32 + 0.5) as usize;
    SHADE_RAMP[idx.min(levels - 1)]
}

/// Result of tracing one cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubeSample {
    pub glyph: char,
    pub depth: f32,
    /// Intensity after depth fog.
    pub intensity: f32,
    pub is_edge: bool,
}

/// Renders frames for a fixed camera and raymarch budget.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameRenderer {
    pub raymarch: RaymarchConfig,
    pub eye: Vec3,
    pub fovy: f32,
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new(RaymarchConfig::default())
    }
}

impl FrameRenderer {
    #[must_use]
    pub fn new(raymarch: RaymarchConfig) -> Self {
        let camera = Camera::new(1, 1);
        Self {
            raymarch,
            eye: camera.eye,
            fovy: camera.fovy,
        }
    }

    #[must_use]
    pub fn camera(&self, width: usize, height: usize) -> Camera {
        Camera {
            eye: self.eye,
            fovy: self.fovy,
            ..Camera::new(width, height)
        }
    }

    /// Fill `fb` with a complete frame.
    pub fn render(&self, fb: &mut Framebuffer, cube: &CubeState, light: &Light, stats: &FrameStats) {
        fb.clear();

        draw_environment(fb);
        let hud_left = hud_layout(fb.width(), fb.height(), stats.fps).map(|layout| layout.x);
        draw_rain(fb, stats.frame_count, hud_left);

        self.draw_cube(fb, cube, light);

        draw_sun(fb, light, cube);
        draw_hud(fb, stats.fps, stats.volume);
    }

    /// Trace every cell and overwrite the ones that hit the cube.
    pub fn draw_cube(&self, fb: &mut Framebuffer, cube: &CubeState, light: &Light) {
        let (width, height) = (fb.width(), fb.height());
        let camera = self.camera(width, height);
        let inv_rotation = cube.rotation.transpose();

        let samples: Vec<Option<CubeSample>> = (0..fb.len())
            .into_par_iter()
            .map(|idx| self.trace_cell(&camera, idx % width, idx / width, (width, height), cube, light, &inv_rotation))
            .collect();

        for (idx, sample) in samples.into_iter().enumerate() {
            if let Some(sample) = sample {
                fb.set_index(idx, sample.glyph, sample.depth, ColorClass::Cube);
            }
        }
    }

    /// Trace the ray through cell `(x, y)` of a `dims` grid.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn trace_cell(
        &self,
        camera: &Camera,
        x: usize,
        y: usize,
        dims: (usize, usize),
        cube: &CubeState,
        light: &Light,
        inv_rotation: &Mat3,
    ) -> Option<CubeSample> {
        let dir = camera.ray_direction(x, y, dims.0, dims.1);
        let hit = raymarch(camera.eye, dir, &self.raymarch, cube.position, cube.size, &cube.rotation)?;

        let depth = (hit.point - camera.eye).length();
        let intensity = shade(hit.point, hit.normal, camera.eye, cube, light) * depth_fog(depth);
        let is_edge = is_near_edge(hit.point, cube, inv_rotation);
        Some(CubeSample {
            glyph: intensity_to_glyph(intensity, is_edge),
            depth,
            intensity,
            is_edge,
        })
    }
}

/// Render one frame with the default camera and raymarch settings.
pub fn render_cube(fb: &mut Framebuffer, cube: &CubeState, light: &Light, stats: &FrameStats) {
    FrameRenderer::default().render(fb, cube, light, stats);
}
