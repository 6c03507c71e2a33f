//! Starfield animation for cosmic.
//!
//! The simulation ([`Starfield`]) owns the stars and advances them once per
//! frame under drift plus a pluggable [`ForceModel`], drawing onto any
//! [`Surface`]. [`TerminalSurface`] rasterises that drawing into half-block
//! terminal cells, and [`AnimationLoop`] paces the frames.

mod backdrop;
mod color;
pub mod force;
mod scheduler;
mod state;
mod stars;
mod surface;

pub use backdrop::{GradientStop, RadialGradient, backdrop_gradient, paint_backdrop};
pub use force::ForceModel;
pub use scheduler::{AnimationLoop, LoopState, StopHandle};
pub use stars::{Star, StarShape, regenerate};
pub use state::Starfield;
pub use surface::{CellSize, Surface, TerminalSurface};
