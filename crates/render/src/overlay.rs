//! Screen-space overlays drawn after the cube pass: the sun marker and the
//! HUD box.

use physics::{CubeState, Vec3};

use crate::framebuffer::{ColorClass, Framebuffer, BACKGROUND_DEPTH};
use crate::shading::Light;

/// Sun glyphs from the bright core outward, with the upper bound of the
/// normalized radius each one covers.
const SUN_RINGS: [(f32, char); 6] = [
    (0.15, '⬤'),
    (0.35, '●'),
    (0.55, '◉'),
    (0.75, '◎'),
    (0.9, '○'),
    (f32::INFINITY, '◦'),
];

pub const HUD_MIN_WIDTH: usize = 30;
pub const HUD_HEIGHT: usize = 6;
/// The HUD is skipped on terminals shorter than this.
pub const HUD_MIN_TERMINAL_HEIGHT: usize = 7;
pub const CONTROLS_LINE_1: &str = "WASD: rotate   M: orbit";
pub const CONTROLS_LINE_2: &str = "Scroll/+/-: volume   Q: quit";

/// Screen position and radius of the sun marker, or `None` when the
/// buffer is too small to show it.
#[must_use]
pub fn sun_placement(width: usize, height: usize, light: &Light, cube: &CubeState) -> Option<(i64, i64, i64)> {
    if width <= 8 || height <= 4 {
        return None;
    }
    let dir = (light.position - cube.position).normalize();
    let (w, h) = (width as i64, height as i64);
    let cx = (w / 2 + (dir.x * width as f32 * 0.8) as i64).clamp(2, w - 3);
    let cy = (h / 2 - (dir.y * height as f32 * 0.8) as i64).clamp(1, h - 2);
    let radius = (w.min(h) / 10).clamp(3, 8);
    Some((cx, cy, radius))
}

#[must_use]
pub fn sun_glyph(r: f32) -> char {
    SUN_RINGS
        .iter()
        .find(|&&(limit, _)| r < limit)
        .map_or('◦', |&(_, glyph)| glyph)
}

/// Radial sun marker in the direction of the light as seen from the cube.
/// It is drawn over everything below it, cube included, and resets depth.
pub fn draw_sun(fb: &mut Framebuffer, light: &Light, cube: &CubeState) {
    let Some((cx, cy, radius)) = sun_placement(fb.width(), fb.height(), light, cube) else {
        return;
    };
    for y in cy - radius..=cy + radius {
        for x in cx - radius..=cx + radius {
            let Some(idx) = fb.index_signed(x, y) else {
                continue;
            };
            let offset = Vec3::new((x - cx) as f32, (y - cy) as f32, 0.0);
            let dist = offset.length();
            if dist > radius as f32 {
                continue;
            }
            fb.set_index(idx, sun_glyph(dist / radius as f32), BACKGROUND_DEPTH, ColorClass::Sun);
        }
    }
}

/// Where the HUD box lands for a given frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HudLayout {
    /// Leftmost column of the box.
    pub x: usize,
    pub width: usize,
}

fn format_fps(fps: f32) -> String {
    format!("{fps:.1}")
}

/// Layout of the HUD in the top-right corner, or `None` when the terminal
/// is too small to hold it.
#[must_use]
pub fn hud_layout(width: usize, height: usize, fps: f32) -> Option<HudLayout> {
    let box_width = (format_fps(fps).chars().count() + 6).max(HUD_MIN_WIDTH);
    if height < HUD_MIN_TERMINAL_HEIGHT || box_width >= width {
        return None;
    }
    let x = width.checked_sub(box_width + 1)?;
    Some(HudLayout { x, width: box_width })
}

/// Volume as a whole percentage in `0..=100`.
#[must_use]
pub fn volume_percent(volume: f32) -> u32 {
    (volume * 100.0 + 0.5).clamp(0.0, 100.0) as u32
}

/// Bordered HUD with FPS, volume and the control help. Depth is untouched.
pub fn draw_hud(fb: &mut Framebuffer, fps: f32, volume: f32) {
    let Some(layout) = hud_layout(fb.width(), fb.height(), fps) else {
        return;
    };
    let inner = layout.width - 2;
    let border = "─".repeat(inner);

    let lines = [
        format!("╭{border}╮"),
        framed(&format!(" FPS:{}", format_fps(fps)), inner),
        framed(&format!("VOL:{:3}%", volume_percent(volume)), inner),
        framed(CONTROLS_LINE_1, inner),
        framed(CONTROLS_LINE_2, inner),
        format!("╰{border}╯"),
    ];
    for (y, line) in lines.iter().enumerate() {
        for (i, glyph) in line.chars().enumerate() {
            if let Some(idx) = fb.index(layout.x + i, y) {
                fb.overlay_index(idx, glyph, ColorClass::Hud);
            }
        }
    }
}

/// `│text│` padded or truncated to `inner` columns.
fn framed(text: &str, inner: usize) -> String {
    let body: String = text.chars().chain(std::iter::repeat(' ')).take(inner).collect();
    format!("│{body}│")
}
