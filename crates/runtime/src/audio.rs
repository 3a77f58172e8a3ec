//! Background chiptune streamed as raw 16-bit mono PCM to `aplay`.
//!
//! Playback is best effort. A missing player or a closed pipe turns audio
//! off for the rest of the session; rendering carries on either way.

use std::io::Write;
use std::process::{Child, ChildStdin, Command, Stdio};

use tracing::{debug, info, warn};

pub const SAMPLE_RATE: u32 = 44_100;
/// Most samples generated in one step.
pub const MAX_CHUNK_SAMPLES: usize = 4096;
/// Track time wraps here to keep `f64` precision over long sessions.
const TIME_WRAP_SECS: f64 = 60.0;

const BEAT_SECS: f64 = 60.0 / 120.0;
const EIGHTH_SECS: f64 = BEAT_SECS / 2.0;

const MELODY_HZ: [f32; 16] = [
    440.0, 440.0, 523.25, 493.88, 440.0, 440.0, 659.25, 587.33, 440.0, 440.0, 523.25, 493.88, 440.0,
    659.25, 587.33, 523.25,
];
const BASS_HZ: [f32; 8] = [110.0, 110.0, 82.41, 82.41, 98.0, 98.0, 82.41, 82.41];

const MELODY_GAIN: f32 = 0.25;
const BASS_GAIN: f32 = 0.20;
const HAT_GAIN: f32 = 0.08;
const CLIP: f32 = 0.9;

fn square_wave(t: f64, freq: f32) -> f32 {
    if (t * f64::from(freq)).fract() < 0.5 {
        1.0
    } else {
        -1.0
    }
}

/// Unscaled track sample at `t` seconds: eighth-note melody, a bass note
/// per beat and a short noise tick on every eighth.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn track_sample(t: f64) -> f32 {
    let step = (t / EIGHTH_SECS) as usize % MELODY_HZ.len();
    let bass_step = (t / BEAT_SECS) as usize % BASS_HZ.len();

    let melody = MELODY_GAIN * square_wave(t, MELODY_HZ[step]);
    let bass = BASS_GAIN * square_wave(t, BASS_HZ[bass_step]);

    let hat = if (t / EIGHTH_SECS).fract() < 0.25 {
        let noise = (t * 8000.0).fract() as f32;
        (noise * 2.0 - 1.0) * HAT_GAIN
    } else {
        0.0
    };

    (melody + bass + hat).clamp(-CLIP, CLIP)
}

#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_pcm(sample: f32, volume: f32) -> i16 {
    (sample * volume.clamp(0.0, 1.0) * f32::from(i16::MAX)) as i16
}

/// Owns the player process and the track clock.
#[derive(Debug)]
pub struct AudioPlayer {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    time: f64,
    chunk: Vec<u8>,
}

impl AudioPlayer {
    /// A player that never produces sound.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            child: None,
            stdin: None,
            time: 0.0,
            chunk: Vec::with_capacity(MAX_CHUNK_SAMPLES * 2),
        }
    }

    /// Spawn `aplay` reading from a pipe. Falls back to [`AudioPlayer::disabled`]
    /// when it cannot be started.
    #[must_use]
    pub fn start() -> Self {
        let rate = SAMPLE_RATE.to_string();
        let spawned = Command::new("aplay")
            .args(["-q", "-f", "S16_LE", "-c", "1", "-r", rate.as_str(), "-t", "raw", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(mut child) => {
                info!(pid = child.id(), "Started audio player");
                let mut player = Self::disabled();
                player.stdin = child.stdin.take();
                player.child = Some(child);
                player
            }
            Err(err) => {
                info!(%err, "Audio player unavailable, running silent");
                Self::disabled()
            }
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.stdin.is_some()
    }

    /// Track position in seconds.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Generate the little-endian PCM for `dt` seconds of track at `volume`
    /// and advance the clock. Returns the encoded chunk.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn fill_chunk(&mut self, dt: f64, volume: f32) -> &[u8] {
        self.chunk.clear();
        if dt <= 0.0 {
            return &self.chunk;
        }
        let samples = ((dt * f64::from(SAMPLE_RATE)) as usize).min(MAX_CHUNK_SAMPLES);
        let rate = f64::from(SAMPLE_RATE);
        for i in 0..samples {
            let t = self.time + i as f64 / rate;
            self.chunk.extend_from_slice(&to_pcm(track_sample(t), volume).to_le_bytes());
        }
        self.time += samples as f64 / rate;
        if self.time > TIME_WRAP_SECS {
            self.time -= TIME_WRAP_SECS;
        }
        &self.chunk
    }

    /// Stream the audio for a frame of `dt` seconds.
    pub fn step(&mut self, dt: f32, volume: f32) {
        if !self.is_enabled() {
            return;
        }
        self.fill_chunk(f64::from(dt), volume);
        let Some(stdin) = self.stdin.as_mut() else {
            return;
        };
        if let Err(err) = stdin.write_all(&self.chunk) {
            warn!(%err, "Audio pipe closed, disabling audio");
            self.stop();
        }
    }

    /// Close the pipe and reap the player.
    pub fn stop(&mut self) {
        self.stdin = None;
        if let Some(mut child) = self.child.take() {
            if matches!(child.try_wait(), Ok(None)) {
                let _ = child.kill();
            }
            let _ = child.wait();
            debug!("Stopped audio player");
        }
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_sample_at_fixed_times() {
        // Melody and bass both high, hat at the bottom of its ramp.
        assert!((track_sample(0.0) - 0.37).abs() < 1e-6);
        // Third eighth: melody low at 523.25 Hz, bass high, no hat.
        assert!((track_sample(0.72) + 0.05).abs() < 1e-6);
    }

    #[test]
    fn samples_stay_inside_clip_range() {
        for i in 0..20_000 {
            let s = track_sample(f64::from(i) * 0.000_37);
            assert!(s.abs() <= CLIP);
        }
    }

    #[test]
    fn pcm_scales_with_volume() {
        assert_eq!(to_pcm(0.5, 1.0), 16383);
        assert_eq!(to_pcm(0.5, 0.0), 0);
        assert_eq!(to_pcm(-0.5, 0.4), -6553);
    }

    #[test]
    fn chunk_length_follows_frame_time() {
        let mut player = AudioPlayer::disabled();
        assert_eq!(player.fill_chunk(0.01, 0.4).len(), 441 * 2);
        assert!((player.time() - 0.01).abs() < 1e-9);
        assert_eq!(player.fill_chunk(1.0, 0.4).len(), MAX_CHUNK_SAMPLES * 2);
        assert!(player.fill_chunk(0.0, 0.4).is_empty());
        assert!(player.fill_chunk(-1.0, 0.4).is_empty());
    }

    #[test]
    fn muted_chunk_is_silent() {
        let mut player = AudioPlayer::disabled();
        assert!(player.fill_chunk(0.02, 0.0).iter().all(|&b| b == 0));
    }

    #[test]
    fn first_chunk_starts_at_track_origin() {
        let mut player = AudioPlayer::disabled();
        let chunk = player.fill_chunk(0.001, 1.0);
        let first = i16::from_le_bytes([chunk[0], chunk[1]]);
        assert_eq!(first, to_pcm(track_sample(0.0), 1.0));
    }

    #[test]
    fn clock_wraps() {
        let mut player = AudioPlayer::disabled();
        player.time = TIME_WRAP_SECS - 0.001;
        player.fill_chunk(0.05, 0.4);
        assert!(player.time() < 1.0);
    }

    #[test]
    fn disabled_player_ignores_steps() {
        let mut player = AudioPlayer::disabled();
        player.step(0.016, 0.4);
        assert!(!player.is_enabled());
        assert_eq!(player.time(), 0.0);
    }
}
