#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Cube Physics
//!
//! Math primitives and the rigid-body integrator behind the terminal cube.
//!
//! ## Key Components
//!
//! -   **Math:** [`Vec3`] and the row-major [`Mat3`] live in [`types`].
//! -   **Shape:** [`sdf_cube`] in [`shapes`] gives the signed distance to an
//!     oriented cube; the renderer marches rays against it.
//! -   **State:** [`CubeState`] holds orientation, spin and position.
//! -   **Integration:** [`PhysicsIntegrator`] consumes an [`InputState`] each
//!     frame and advances the cube. It owns the toggle edge detector and the
//!     re-orthonormalization counter, so keep one per cube and call it in
//!     frame order.
//!
//! ## Usage
//!
//! ```rust
//! use physics::{CubeState, InputState, PhysicsConfig, PhysicsIntegrator};
//!
//! let mut cube = CubeState::new(1.0);
//! let mut integrator = PhysicsIntegrator::new();
//! let input = InputState { is_right_pressed: true, ..InputState::default() };
//! integrator.step(&mut cube, &input, &PhysicsConfig::default(), 1.0 / 60.0);
//! assert!(cube.rotation.is_orthonormal(1e-4));
//! ```

pub mod cube;
pub mod input;
pub mod integrator;
pub mod shapes;
pub mod types;

pub use cube::CubeState;
pub use input::{Direction, InputState};
pub use integrator::{PhysicsConfig, PhysicsIntegrator, ORTHONORMALIZE_INTERVAL};
pub use shapes::{sdf_box, sdf_cube};
pub use types::{Mat3, Vec3};
