//! Command line options and the validated settings derived from them.

use std::path::PathBuf;

use clap::Parser;
use physics::{PhysicsConfig, Vec3};
use render::{Light, RaymarchConfig};
use thiserror::Error;

#[derive(Debug, Clone, Parser)]
#[command(name = "cube_runtime", version, about = "Raymarched cube in the terminal")]
pub struct Cli {
    /// Cube half extent.
    #[arg(long, default_value_t = 1.0)]
    pub size: f32,

    /// Rotation speed multiplier.
    #[arg(long, default_value_t = 1.0)]
    pub speed: f32,

    #[arg(long, default_value_t = -3.0, allow_negative_numbers = true)]
    pub light_x: f32,

    #[arg(long, default_value_t = 4.5, allow_negative_numbers = true)]
    pub light_y: f32,

    #[arg(long, default_value_t = 4.0, allow_negative_numbers = true)]
    pub light_z: f32,

    /// Raymarch iterations per ray.
    #[arg(long, default_value_t = 100)]
    pub max_steps: u32,

    /// Write logs to this file. Logs are discarded otherwise.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[arg(long, default_value_t = 60.0)]
    pub target_fps: f32,

    /// Do not start the background music player.
    #[arg(long)]
    pub no_audio: bool,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("cube size must be positive and finite, got {0}")]
    InvalidSize(f32),
    #[error("rotation speed must be positive and finite, got {0}")]
    InvalidSpeed(f32),
    #[error("light position must be finite, got ({x}, {y}, {z})")]
    InvalidLight { x: f32, y: f32, z: f32 },
    #[error("max steps must be at least 1")]
    ZeroMaxSteps,
    #[error("target fps must be positive and finite, got {0}")]
    InvalidTargetFps(f32),
}

/// Everything the main loop needs, checked against the renderer's and
/// integrator's preconditions.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub cube_size: f32,
    pub physics: PhysicsConfig,
    pub light: Light,
    pub raymarch: RaymarchConfig,
    pub target_fps: f32,
    pub log_file: Option<PathBuf>,
    pub audio: bool,
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl Cli {
    /// Validate the options and derive the runtime settings.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        if !positive(self.size) {
            return Err(ConfigError::InvalidSize(self.size));
        }
        if !positive(self.speed) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        let light = Vec3::new(self.light_x, self.light_y, self.light_z);
        if !light.to_array().iter().all(|c| c.is_finite()) {
            return Err(ConfigError::InvalidLight { x: light.x, y: light.y, z: light.z });
        }
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroMaxSteps);
        }
        if !positive(self.target_fps) {
            return Err(ConfigError::InvalidTargetFps(self.target_fps));
        }

        Ok(Settings {
            cube_size: self.size,
            physics: PhysicsConfig::with_speed(self.speed),
            light: Light::at(light),
            raymarch: RaymarchConfig {
                max_steps: self.max_steps,
                ..RaymarchConfig::default()
            },
            target_fps: self.target_fps,
            log_file: self.log_file.clone(),
            audio: !self.no_audio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cube_runtime").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_the_classic_scene() {
        let settings = parse(&[]).settings().unwrap();
        assert_eq!(settings.cube_size, 1.0);
        assert_eq!(settings.light.position, Vec3::new(-3.0, 4.5, 4.0));
        assert_eq!(settings.raymarch.max_steps, 100);
        assert_eq!(settings.physics, PhysicsConfig::default());
        assert_eq!(settings.target_fps, 60.0);
        assert!(settings.log_file.is_none());
        assert!(settings.audio);
    }

    #[test]
    fn audio_can_be_disabled() {
        assert!(!parse(&["--no-audio"]).settings().unwrap().audio);
    }

    #[test]
    fn speed_scales_acceleration_and_limit() {
        let settings = parse(&["--speed", "2"]).settings().unwrap();
        assert!((settings.physics.acceleration - 18.0).abs() < 1e-6);
        assert!((settings.physics.max_velocity - 40.0).abs() < 1e-6);
        assert!((settings.physics.damping - 0.97).abs() < 1e-6);
    }

    #[test]
    fn negative_light_coordinates_parse() {
        let cli = parse(&["--light-x", "-1.5", "--light-y", "-2", "--light-z", "3"]);
        assert_eq!(cli.settings().unwrap().light.position, Vec3::new(-1.5, -2.0, 3.0));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(parse(&["--size", "0"]).settings(), Err(ConfigError::InvalidSize(0.0)));
        assert_eq!(parse(&["--speed", "-1"]).settings(), Err(ConfigError::InvalidSpeed(-1.0)));
        assert_eq!(parse(&["--max-steps", "0"]).settings(), Err(ConfigError::ZeroMaxSteps));
        assert_eq!(
            parse(&["--target-fps", "0"]).settings(),
            Err(ConfigError::InvalidTargetFps(0.0))
        );
        assert!(matches!(
            parse(&["--light-x", "inf"]).settings(),
            Err(ConfigError::InvalidLight { .. })
        ));
    }

    #[test]
    fn unknown_flag_is_a_parse_error() {
        assert!(Cli::try_parse_from(["cube_runtime", "--bogus"]).is_err());
    }
}
