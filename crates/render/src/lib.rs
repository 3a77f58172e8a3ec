#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
//! # Cube Renderer
//!
//! CPU raymarcher that draws the cube and its backdrop into a character
//! framebuffer. Nothing in this crate performs I/O; the runtime hands the
//! finished [`Framebuffer`] to the terminal.
//!
//! Frame order: [`background`] layers, the cube pass ([`raymarch`] plus
//! [`shading`]), then the [`overlay`] sun and HUD. [`compositor`] ties the
//! passes together.

pub mod background;
pub mod camera;
pub mod compositor;
pub mod error;
pub mod framebuffer;
pub mod overlay;
pub mod raymarch;
pub mod shading;

pub use camera::Camera;
pub use compositor::{intensity_to_glyph, render_cube, CubeSample, FrameRenderer, FrameStats, SHADE_RAMP};
pub use error::RenderError;
pub use framebuffer::{ColorClass, Framebuffer, BACKGROUND_DEPTH};
pub use raymarch::{march, raymarch, Hit, RaymarchConfig};
pub use shading::Light;
