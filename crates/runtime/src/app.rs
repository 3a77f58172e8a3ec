//! The interactive render loop.

use anyhow::{Context, Result};
use physics::{CubeState, InputState, PhysicsIntegrator};
use render::{FrameRenderer, Framebuffer};
use tracing::{debug, info};

use crate::audio::AudioPlayer;
use crate::cli::Settings;
use crate::clock::FrameClock;
use crate::display;
use crate::input::poll_input;
use crate::terminal::TerminalSession;
use crate::volume::MasterVolume;

/// Frames between periodic statistics log lines.
const STATS_LOG_INTERVAL: u64 = 300;

fn allocate(width: usize, height: usize) -> Result<Framebuffer> {
    let fb = Framebuffer::new(width, height)
        .with_context(|| format!("failed to allocate a {width}x{height} framebuffer"))?;
    info!(width, height, "Allocated framebuffer");
    Ok(fb)
}

/// Run until the user quits. The terminal is restored on every exit path.
///
/// # Errors
///
/// Terminal I/O failures and framebuffer allocation failures end the loop.
pub fn run(settings: &Settings) -> Result<()> {
    let mut session = TerminalSession::enter()?;
    let (width, height) = session.frame_size();
    let mut fb = allocate(width, height)?;

    let renderer = FrameRenderer::new(settings.raymarch);
    let mut cube = CubeState::new(settings.cube_size);
    let mut integrator = PhysicsIntegrator::new();
    let mut input = InputState::default();
    let mut volume = MasterVolume::default();
    let mut clock = FrameClock::new(settings.target_fps);
    let mut audio = if settings.audio {
        AudioPlayer::start()
    } else {
        AudioPlayer::disabled()
    };

    info!("Entering render loop");
    loop {
        let dt = clock.tick();

        let resized = poll_input(&mut input)?;
        if input.quit_requested {
            break;
        }
        if resized {
            let (width, height) = session.frame_size();
            if (width, height) != (fb.width(), fb.height()) {
                fb = allocate(width, height)?;
                session.clear()?;
            }
        }
        if input.volume_delta != 0 {
            volume.adjust(input.volume_delta);
            debug!(volume = volume.level(), "Volume changed");
        }
        audio.step(dt, volume.level());

        integrator.step(&mut cube, &input, &settings.physics, dt);

        let stats = clock.stats(volume.level());
        renderer.render(&mut fb, &cube, &settings.light, &stats);
        display::write_frame(session.out(), &fb).context("failed to write frame")?;
        session.flush()?;

        if stats.frame_count % STATS_LOG_INTERVAL == 0 {
            info!(
                frame = stats.frame_count,
                fps = stats.fps,
                frame_time_ms = stats.frame_time_ms,
                "Frame statistics"
            );
        }

        clock.sleep_until_next_frame();
    }

    info!(frames = clock.frame_count(), "Quit requested, shutting down");
    Ok(())
}
