//! # Background Layers
//!
//! Static skyline (ground gradient, mountain ridges, building blocks) and an
//! animated rain layer. Everything here writes [`BACKGROUND_DEPTH`], so the
//! cube pass that follows always wins.

use crate::framebuffer::{ColorClass, Framebuffer, BACKGROUND_DEPTH};

const GROUND_GLYPHS: [char; 5] = ['⋅', '∙', '•', '◦', '○'];
const MOUNTAIN_GLYPHS: [char; 5] = ['˄', '∧', '⋀', '△', '▲'];

/// Ridge profiles as `(center, half_width)` in normalized screen X.
const MOUNTAIN_RIDGES: [(f32, f32); 3] = [(0.18, 0.22), (0.55, 0.25), (0.82, 0.18)];

/// First ground-plane row.
#[must_use]
pub fn horizon_row(height: usize) -> usize {
    let horizon = height * 2 / 3;
    if horizon < 4 {
        height / 2
    } else {
        horizon
    }
}

/// Integer hash used to give each rain column its own rhythm.
#[must_use]
pub fn hash_u32(mut v: u32) -> u32 {
    v ^= v >> 16;
    v = v.wrapping_mul(0x7feb_352d);
    v ^= v >> 15;
    v = v.wrapping_mul(0x846c_a68b);
    v ^= v >> 16;
    v
}

/// Ground gradient, mountain silhouettes and distant buildings.
pub fn draw_environment(fb: &mut Framebuffer) {
    let horizon = horizon_row(fb.height());
    draw_ground(fb, horizon);
    draw_mountains(fb, horizon);
    draw_buildings(fb, horizon);
}

fn draw_ground(fb: &mut Framebuffer, horizon: usize) {
    let height = fb.height();
    for y in horizon..height {
        let t = (y - horizon) as f32 / (height - horizon + 1) as f32;
        let band = ((t / 0.2) as usize).min(GROUND_GLYPHS.len() - 1);
        for x in 0..fb.width() {
            fb.set(x, y, GROUND_GLYPHS[band], BACKGROUND_DEPTH, ColorClass::Ground);
        }
    }
}

fn ridge_height(xf: f32) -> f32 {
    MOUNTAIN_RIDGES
        .iter()
        .map(|&(center, half_width)| 1.0 - (xf - center).abs() / half_width)
        .fold(0.0, f32::max)
}

fn draw_mountains(fb: &mut Framebuffer, horizon: usize) {
    let width = fb.width();
    let max_peak = (fb.height() / 4) as f32;
    let span = width.max(2) - 1;
    for x in 0..width {
        let xf = x as f32 / span as f32;
        let peak = (ridge_height(xf) * max_peak) as usize;
        if peak == 0 {
            continue;
        }
        let top = horizon.saturating_sub(peak).max(1);
        for y in top..horizon {
            let band = (horizon - y) as f32 / peak as f32;
            let glyph = if band > 0.8 {
                MOUNTAIN_GLYPHS[4]
            } else if band > 0.6 {
                MOUNTAIN_GLYPHS[3]
            } else if band > 0.4 {
                MOUNTAIN_GLYPHS[2]
            } else if band > 0.2 {
                MOUNTAIN_GLYPHS[1]
            } else {
                MOUNTAIN_GLYPHS[0]
            };
            fb.set(x, y, glyph, BACKGROUND_DEPTH, ColorClass::Mountain);
        }
    }
}

fn draw_buildings(fb: &mut Framebuffer, horizon: usize) {
    let width = fb.width() as i64;
    let Some(base) = horizon.checked_sub(1).filter(|&b| b > 2) else {
        return;
    };
    let base = base as i64;
    let spacing = (width / 8).max(6);

    let mut bx = spacing / 2;
    while bx < width - spacing / 2 {
        let b_width = 3 + bx % 3;
        let b_height = fb.height() as i64 / 8 + bx % 5;
        let left = bx - b_width / 2;
        let right = bx + b_width / 2;
        let top = (base - b_height).max(1);

        for x in left..=right {
            for y in top..=base {
                let glyph = if y == top || y == base || x == left || x == right {
                    '█'
                } else if (x + y) & 1 == 0 {
                    '▪'
                } else {
                    '·'
                };
                if let Some(idx) = fb.index_signed(x, y) {
                    fb.set_index(idx, glyph, BACKGROUND_DEPTH, ColorClass::Building);
                }
            }
        }
        bx += spacing;
    }
}

/// Rain streaks above the horizon, animated by `frame_count`.
///
/// Columns at or right of `hud_left` stay dry so the HUD remains legible.
pub fn draw_rain(fb: &mut Framebuffer, frame_count: u64, hud_left: Option<usize>) {
    let width = fb.width();
    let height = fb.height();
    if height <= 1 {
        return;
    }
    let horizon = horizon_row(height);
    let slow_t = frame_count / 3;
    let dry_from = hud_left.unwrap_or(width);

    for x in 0..width.min(dry_from) {
        let h = hash_u32((x as u32).wrapping_mul(2_654_435_761));
        // About a quarter of the columns stay dry.
        if h & 0x3 == 0 {
            continue;
        }

        let speed = 1 + u64::from(h % 3);
        let trail = 3 + ((h >> 3) % 6) as usize;
        let gap = 4 + ((h >> 6) % 8) as usize;
        let phase = u64::from(h >> 16);
        let cycle = (height + trail + gap) as u64;
        let head = (slow_t.wrapping_mul(speed).wrapping_add(phase) % cycle) as usize;
        if head >= height + trail {
            continue;
        }

        for i in 0..trail.min(head + 1) {
            let y = head - i;
            if y == 0 || y >= height || y >= horizon {
                continue;
            }
            let glyph = match i {
                0 => '╿',
                1 => '│',
                i if i + 2 < trail => '┆',
                i if i + 2 == trail => '╎',
                _ => '˙',
            };
            fb.set(x, y, glyph, BACKGROUND_DEPTH, ColorClass::Rain);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_matches_known_values() {
        assert_eq!(hash_u32(0), 0);
        assert_ne!(hash_u32(1), hash_u32(2));
    }

    #[test]
    fn ground_fills_rows_below_horizon() {
        let mut fb = Framebuffer::new(40, 30).unwrap();
        draw_environment(&mut fb);
        let horizon = horizon_row(30);
        for x in 0..40 {
            assert_eq!(fb.color(x, horizon), Some(ColorClass::Ground));
            assert_eq!(fb.color(x, 29), Some(ColorClass::Ground));
        }
        assert!(fb.depths().iter().all(|&d| d == BACKGROUND_DEPTH));
    }

    #[test]
    fn skyline_rises_above_horizon() {
        let mut fb = Framebuffer::new(80, 40).unwrap();
        draw_environment(&mut fb);
        let horizon = horizon_row(40);
        let above: Vec<_> = (0..horizon)
            .flat_map(|y| (0..80).map(move |x| (x, y)))
            .filter_map(|(x, y)| fb.color(x, y))
            .collect();
        assert!(above.contains(&ColorClass::Mountain));
        assert!(above.contains(&ColorClass::Building));
    }

    #[test]
    fn tiny_buffers_do_not_panic() {
        for (w, h) in [(1, 1), (2, 1), (1, 5), (3, 3)] {
            let mut fb = Framebuffer::new(w, h).unwrap();
            draw_environment(&mut fb);
            draw_rain(&mut fb, 12_345, None);
        }
    }
}
