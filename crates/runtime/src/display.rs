//! Serializes a [`Framebuffer`] as ANSI escape sequences.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use render::{ColorClass, Framebuffer};

/// Terminal color for a class. `None` means the default color.
#[must_use]
pub fn class_color(class: ColorClass) -> Option<Color> {
    match class {
        ColorClass::None => None,
        ColorClass::Cube => Some(Color::Cyan),
        ColorClass::Ground => Some(Color::AnsiValue(240)),
        ColorClass::Mountain => Some(Color::AnsiValue(67)),
        ColorClass::Building => Some(Color::Yellow),
        ColorClass::Rain => Some(Color::DarkCyan),
        ColorClass::Sun => Some(Color::AnsiValue(226)),
        ColorClass::Hud => Some(Color::White),
    }
}

fn queue_class<W: Write>(out: &mut W, class: ColorClass) -> io::Result<()> {
    match class_color(class) {
        Some(color) => queue!(out, SetForegroundColor(color)),
        None => queue!(out, ResetColor),
    }
}

/// Queue a full frame starting at the top-left corner. Colors are only
/// switched where the class changes. The caller flushes `out`.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn write_frame<W: Write>(out: &mut W, fb: &Framebuffer) -> io::Result<()> {
    queue!(out, MoveTo(0, 0), ResetColor)?;
    let mut current = ColorClass::None;
    let mut run = String::with_capacity(fb.width() * 3);

    for y in 0..fb.height() {
        if y > 0 {
            run.push_str("\r\n");
        }
        for (glyph, class) in fb.row(y) {
            if class != current {
                if !run.is_empty() {
                    queue!(out, Print(&run))?;
                    run.clear();
                }
                queue_class(out, class)?;
                current = class;
            }
            run.push(glyph);
        }
    }
    if !run.is_empty() {
        queue!(out, Print(&run))?;
    }
    queue!(out, ResetColor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(fb: &Framebuffer) -> String {
        let mut out = Vec::new();
        write_frame(&mut out, fb).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn rows_are_separated_not_terminated() {
        let fb = Framebuffer::new(4, 3).unwrap();
        let text = render(&fb);
        assert_eq!(text.matches("\r\n").count(), 2);
        assert!(text.contains("    \r\n    \r\n    "));
        assert!(text.ends_with("\x1b[0m"));
    }

    #[test]
    fn color_switches_only_on_class_change() {
        let mut fb = Framebuffer::new(6, 1).unwrap();
        for x in 1..4 {
            fb.set(x, 0, '#', 2.0, ColorClass::Cube);
        }
        fb.set(4, 0, '~', 1000.0, ColorClass::Ground);
        let text = render(&fb);
        assert_eq!(text.matches("\x1b[38;").count(), 2);
        assert!(text.contains("###"));
        assert!(text.contains("\x1b[38;5;240m~"));
    }

    #[test]
    fn every_class_has_a_distinct_color() {
        let classes = [
            ColorClass::Cube,
            ColorClass::Ground,
            ColorClass::Mountain,
            ColorClass::Building,
            ColorClass::Rain,
            ColorClass::Sun,
            ColorClass::Hud,
        ];
        let colors: Vec<Color> = classes.iter().filter_map(|&c| class_color(c)).collect();
        assert_eq!(colors.len(), classes.len());
        for (i, a) in colors.iter().enumerate() {
            assert!(colors[i + 1..].iter().all(|b| b != a));
        }
        assert_eq!(class_color(ColorClass::None), None);
    }
}
