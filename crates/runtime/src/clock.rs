//! Frame pacing and FPS measurement.

use std::thread;
use std::time::{Duration, Instant};

use render::FrameStats;

/// Upper bound on the timestep handed to physics.
pub const MAX_FRAME_DT: f32 = 0.1;
/// Weight of the previous estimate in the FPS moving average.
pub const FPS_SMOOTHING: f32 = 0.9;
const INITIAL_FPS: f32 = 60.0;

#[derive(Debug)]
pub struct FrameClock {
    frame_budget: Duration,
    last_tick: Instant,
    fps: f32,
    frame_time_ms: f32,
    frame_count: u64,
}

impl FrameClock {
    #[must_use]
    pub fn new(target_fps: f32) -> Self {
        Self {
            frame_budget: Duration::try_from_secs_f32(target_fps.recip()).unwrap_or(Duration::ZERO),
            last_tick: Instant::now(),
            fps: INITIAL_FPS,
            frame_time_ms: 0.0,
            frame_count: 0,
        }
    }

    /// Start a new frame and return the clamped timestep in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.record(elapsed)
    }

    fn record(&mut self, elapsed: Duration) -> f32 {
        let secs = elapsed.as_secs_f32();
        if secs > 0.0 {
            self.fps = FPS_SMOOTHING * self.fps + (1.0 - FPS_SMOOTHING) * secs.recip();
        }
        self.frame_time_ms = secs * 1000.0;
        self.frame_count += 1;
        secs.min(MAX_FRAME_DT)
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[must_use]
    pub fn stats(&self, volume: f32) -> FrameStats {
        FrameStats {
            frame_time_ms: self.frame_time_ms,
            fps: self.fps,
            frame_count: self.frame_count,
            volume,
        }
    }

    /// Sleep out whatever remains of the current frame's budget.
    pub fn sleep_until_next_frame(&self) {
        if let Some(remaining) = self.frame_budget.checked_sub(self.last_tick.elapsed()) {
            thread::sleep(remaining);
        }
    }
}
