//! Decodes terminal events into the per-frame [`InputState`].

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use physics::{Direction, InputState};

/// Fold one event into `input`. Returns `true` for terminal resizes.
pub fn apply_event(input: &mut InputState, event: &Event) -> bool {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => apply_key(input, key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => input.volume_delta += 1,
            MouseEventKind::ScrollDown => input.volume_delta -= 1,
            _ => {}
        },
        Event::Resize(..) => return true,
        _ => {}
    }
    false
}

fn apply_key(input: &mut InputState, key: &KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c' | 'C')) {
        input.quit_requested = true;
        return;
    }
    match key.code {
        KeyCode::Char('w' | 'W') => input.press_direction(Direction::Forward),
        KeyCode::Char('s' | 'S') => input.press_direction(Direction::Backward),
        KeyCode::Char('a' | 'A') => input.press_direction(Direction::Left),
        KeyCode::Char('d' | 'D') => input.press_direction(Direction::Right),
        KeyCode::Char('m' | 'M') => input.is_toggle_pressed = true,
        KeyCode::Char('+' | '=') | KeyCode::PageUp => input.volume_delta += 1,
        KeyCode::Char('-' | '_') | KeyCode::PageDown => input.volume_delta -= 1,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => input.quit_requested = true,
        _ => {}
    }
}

/// Drain every pending event without blocking. Returns `true` if the
/// terminal was resized.
///
/// # Errors
///
/// Propagates failures from the terminal event source.
pub fn poll_input(input: &mut InputState) -> Result<bool> {
    input.reset_frame();
    let mut resized = false;
    while event::poll(Duration::ZERO).context("failed to poll terminal events")? {
        let event = event::read().context("failed to read terminal event")?;
        resized |= apply_event(input, &event);
    }
    Ok(resized)
}
