/// Per-frame snapshot of player intent.
///
/// The input layer overwrites this on every poll; the only state carried
/// between frames is the toggle edge detection inside the integrator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    /// W: pitch the cube up.
    pub is_forward_pressed: bool,
    /// S: pitch the cube down.
    pub is_backward_pressed: bool,
    /// A: yaw left.
    pub is_left_pressed: bool,
    /// D: yaw right.
    pub is_right_pressed: bool,
    /// M: toggles orbital motion on the press edge.
    pub is_toggle_pressed: bool,
    pub quit_requested: bool,
    /// Signed volume steps accumulated during the poll.
    pub volume_delta: i32,
}

impl InputState {
    /// Clear everything except the sticky quit request.
    pub fn reset_frame(&mut self) {
        *self = Self {
            quit_requested: self.quit_requested,
            ..Self::default()
        };
    }

    /// Select a single direction, releasing the other three.
    pub fn press_direction(&mut self, direction: Direction) {
        self.is_forward_pressed = direction == Direction::Forward;
        self.is_backward_pressed = direction == Direction::Backward;
        self.is_left_pressed = direction == Direction::Left;
        self.is_right_pressed = direction == Direction::Right;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}
