//! Core types shared by the cosmic crates.
//!
//! Geometry lives in [`geometry`], the serde-ready knobs that shape the
//! starfield live in [`settings`].

mod geometry;
mod settings;

pub use geometry::{Bounds, Rgba, Vec2};
pub use settings::{
    AnimationSpeed, DriftPattern, ForceKind, InvalidSetting, ParallaxSettings, RepulsionSettings,
    StarfieldSettings,
};
