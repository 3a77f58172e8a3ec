//! Fixed pinhole camera that turns terminal cells into view rays.

use physics::Vec3;

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f32 = 0.5;

/// Camera looking down -Z from in front of the cube.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// Camera position
    pub eye: Vec3,
    /// Horizontal scale of the image plane, already corrected for cell shape
    pub aspect: f32,
    /// Vertical field of view in radians
    pub fovy: f32,
}

impl Camera {
    /// Camera for a `width` x `height` cell grid.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let mut camera = Self {
            eye: Vec3::new(0.0, 0.0, 6.0),
            aspect: 1.0,
            fovy: 50.0f32.to_radians(),
        };
        camera.resize(width, height);
        camera
    }

    /// Update aspect ratio when the terminal is resized
    pub fn resize(&mut self, width: usize, height: usize) {
        self.aspect = width as f32 / height.max(1) as f32 * CELL_ASPECT;
    }

    /// Unit direction through the center of cell `(x, y)`.
    #[must_use]
    pub fn ray_direction(&self, x: usize, y: usize, width: usize, height: usize) -> Vec3 {
        let scale = (self.fovy * 0.5).tan();
        let px = (2.0 * ((x as f32 + 0.5) / width as f32) - 1.0) * self.aspect;
        let py = 1.0 - 2.0 * ((y as f32 + 0.5) / height as f32);
        Vec3::new(px * scale, py * scale, -1.0).normalize()
    }
}
