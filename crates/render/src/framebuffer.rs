//! Character, depth and color planes for one terminal frame.

use crate::error::RenderError;

/// Depth stored where no geometry was hit.
pub const BACKGROUND_DEPTH: f32 = 1000.0;

/// Color class tag per cell. The display layer maps each class to a
/// terminal color.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorClass {
    #[default]
    None = 0,
    Cube = 1,
    Ground = 2,
    Mountain = 3,
    Building = 4,
    Rain = 5,
    Sun = 6,
    Hud = 7,
}

/// Three parallel planes indexed by `y * width + x`. All of them always
/// have `width * height` entries.
#[derive(Clone, Debug)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    glyphs: Vec<char>,
    depth: Vec<f32>,
    colors: Vec<ColorClass>,
}

impl Framebuffer {
    /// Allocate a cleared framebuffer.
    ///
    /// # Errors
    ///
    /// [`RenderError::InvalidDimensions`] when either dimension is zero or
    /// the cell count overflows, [`RenderError::AllocationFailed`] when the
    /// planes cannot be allocated.
    pub fn new(width: usize, height: usize) -> Result<Self, RenderError> {
        let cells = width
            .checked_mul(height)
            .filter(|&cells| cells > 0)
            .ok_or(RenderError::InvalidDimensions { width, height })?;

        let mut glyphs = Vec::new();
        let mut depth = Vec::new();
        let mut colors = Vec::new();
        glyphs
            .try_reserve_exact(cells)
            .and_then(|()| depth.try_reserve_exact(cells))
            .and_then(|()| colors.try_reserve_exact(cells))
            .map_err(|source| RenderError::AllocationFailed { cells, source })?;
        glyphs.resize(cells, ' ');
        depth.resize(cells, BACKGROUND_DEPTH);
        colors.resize(cells, ColorClass::None);

        Ok(Self { width, height, glyphs, depth, colors })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Reset every cell to a blank background cell.
    pub fn clear(&mut self) {
        self.glyphs.fill(' ');
        self.depth.fill(BACKGROUND_DEPTH);
        self.colors.fill(ColorClass::None);
    }

    #[must_use]
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Signed-coordinate variant of [`Framebuffer::index`] for drawing code
    /// that works with offsets that may fall off screen.
    #[must_use]
    pub fn index_signed(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.index(x, y)
    }

    /// Write all three planes of one cell. Out-of-range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, glyph: char, depth: f32, color: ColorClass) {
        if let Some(idx) = self.index(x, y) {
            self.set_index(idx, glyph, depth, color);
        }
    }

    pub(crate) fn set_index(&mut self, idx: usize, glyph: char, depth: f32, color: ColorClass) {
        self.glyphs[idx] = glyph;
        self.depth[idx] = depth;
        self.colors[idx] = color;
    }

    /// Write glyph and color but keep the stored depth.
    pub(crate) fn overlay_index(&mut self, idx: usize, glyph: char, color: ColorClass) {
        self.glyphs[idx] = glyph;
        self.colors[idx] = color;
    }

    #[must_use]
    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        self.index(x, y).map(|i| self.glyphs[i])
    }

    #[must_use]
    pub fn depth(&self, x: usize, y: usize) -> Option<f32> {
        self.index(x, y).map(|i| self.depth[i])
    }

    #[must_use]
    pub fn color(&self, x: usize, y: usize) -> Option<ColorClass> {
        self.index(x, y).map(|i| self.colors[i])
    }

    #[must_use]
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    #[must_use]
    pub fn depths(&self) -> &[f32] {
        &self.depth
    }

    #[must_use]
    pub fn colors(&self) -> &[ColorClass] {
        &self.colors
    }

    /// One row of glyphs paired with their colors.
    pub fn row(&self, y: usize) -> impl Iterator<Item = (char, ColorClass)> + '_ {
        let start = (y * self.width).min(self.len());
        let end = (start + self.width).min(self.len());
        self.glyphs[start..end]
            .iter()
            .copied()
            .zip(self.colors[start..end].iter().copied())
    }

    /// Glyph plane rendered as text, rows separated by newlines.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.glyphs
            .chunks(self.width)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
