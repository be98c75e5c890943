//! # pointmorph
//!
//! An interactive visual toy: tens of thousands of glowing particles
//! continuously morph between parametric 3D shapes - a spiral galaxy, a
//! heart, the butterfly curve, a rose, and friends.
//!
//! The crate splits into a small core and thin presentation glue:
//!
//! - [`shapes`] - pure parametric generators producing flat position buffers.
//! - [`engine`] - the per-frame loop: lerp toward the morph target, overlay
//!   breathing noise, recompute colors, rotate the container.
//! - [`controller`] - user-facing state (shape, speed, color, autoplay) with
//!   validation at the boundary.
//! - [`gpu`] / [`app`] - wgpu point-sprite rendering and the winit shell.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pointmorph::{Controller, MorphEngine, ShapeKind};
//!
//! let mut engine = MorphEngine::new(30_000)?;
//! let mut controller = Controller::new();
//!
//! // Each display tick:
//! if let Some(shape) = controller.update(time.elapsed()) {
//!     engine.set_shape(shape);
//! }
//! engine.step(time.elapsed());
//! if engine.take_dirty() {
//!     renderer.upload(engine.positions(), engine.colors());
//! }
//! ```

pub mod app;
pub mod controller;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod shapes;
pub mod sprite;
pub mod time;

pub use app::App;
pub use controller::Controller;
pub use engine::{AnimationParams, MorphEngine};
pub use error::{AppError, ConfigError, GpuError};
pub use shapes::{generate_positions, ShapeKind};
pub use time::Time;
