/// Volume assumed at startup.
pub const DEFAULT_VOLUME: f32 = 0.4;
/// Change per unit of input volume delta.
pub const VOLUME_STEP: f32 = 0.01;

/// Master volume in `[0, 1]`, applied to the background track and shown
/// in the HUD.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MasterVolume(f32);

impl MasterVolume {
    #[must_use]
    pub fn new(level: f32) -> Self {
        Self(level.clamp(0.0, 1.0))
    }

    #[must_use]
    pub fn level(self) -> f32 {
        self.0
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn adjust(&mut self, delta: i32) {
        *self = Self::new(self.0 + delta as f32 * VOLUME_STEP);
    }
}

impl Default for MasterVolume {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_by_one_percent() {
        let mut volume = MasterVolume::default();
        volume.adjust(5);
        assert!((volume.level() - 0.45).abs() < 1e-6);
        volume.adjust(-10);
        assert!((volume.level() - 0.35).abs() < 1e-6);
    }

    #[test]
    fn clamps_to_unit_range() {
        let mut volume = MasterVolume::default();
        volume.adjust(500);
        assert!((volume.level() - 1.0).abs() < f32::EPSILON);
        volume.adjust(-500);
        assert!(volume.level().abs() < f32::EPSILON);
        assert!((MasterVolume::new(3.0).level() - 1.0).abs() < f32::EPSILON);
    }
}
