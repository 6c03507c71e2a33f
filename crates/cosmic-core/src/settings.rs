//! Tunable starfield settings.
//!
//! These are plain data with serde derives so the config crate can read them
//! straight out of TOML. Defaults reproduce the stock look.

use std::ops::Range;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A setting outside the range the simulation can run with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} {reason}")]
pub struct InvalidSetting {
    /// Dotted path of the offending field, e.g. `repulsion.damping`.
    pub field: &'static str,
    pub reason: String,
}

impl InvalidSetting {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Reject `value` unless `ok` holds. NaN fails every range check.
fn check(field: &'static str, value: f32, ok: bool, reason: &str) -> Result<(), InvalidSetting> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(InvalidSetting::new(field, format!("{reason}, got {value}")))
    }
}

/// How the pointer influences the stars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForceKind {
    /// Stars only drift; the pointer is ignored.
    Drift,
    /// A shared, eased offset follows the pointer around the center.
    #[default]
    Parallax,
    /// Stars near the pointer are pushed away and spring back.
    Repulsion,
}

impl ForceKind {
    /// Cycle to the next force kind.
    pub fn next(self) -> Self {
        match self {
            ForceKind::Drift => ForceKind::Parallax,
            ForceKind::Parallax => ForceKind::Repulsion,
            ForceKind::Repulsion => ForceKind::Drift,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ForceKind::Drift => "drift",
            ForceKind::Parallax => "parallax",
            ForceKind::Repulsion => "repulsion",
        }
    }
}

/// Distribution of the constant per-star drift velocity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriftPattern {
    /// Small symmetric jitter on both axes.
    #[default]
    Jitter,
    /// Left-to-right stream with a little vertical wobble.
    Stream,
}

impl DriftPattern {
    pub fn toggle(self) -> Self {
        match self {
            DriftPattern::Jitter => DriftPattern::Stream,
            DriftPattern::Stream => DriftPattern::Jitter,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DriftPattern::Jitter => "jitter",
            DriftPattern::Stream => "stream",
        }
    }

    /// Range for the horizontal drift component.
    pub fn dx_range(self) -> Range<f32> {
        match self {
            DriftPattern::Jitter => -0.075..0.075,
            DriftPattern::Stream => 0.05..0.25,
        }
    }

    /// Range for the vertical drift component.
    pub fn dy_range(self) -> Range<f32> {
        match self {
            DriftPattern::Jitter => -0.075..0.075,
            DriftPattern::Stream => -0.02..0.02,
        }
    }
}

/// Frame cadence of the animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Frames per second.
    pub fn fps(self) -> u32 {
        match self {
            AnimationSpeed::Slow => 20,
            AnimationSpeed::Medium => 30,
            AnimationSpeed::Fast => 60,
        }
    }

    /// Time between two frames.
    pub fn frame_interval(self) -> Duration {
        Duration::from_secs(1) / self.fps()
    }

    pub fn label(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }
}

/// Eased global parallax.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxSettings {
    /// Scale from pointer-to-center vector to target offset.
    pub intensity: f32,
    /// First-order smoothing factor per frame (0, 1].
    pub ease: f32,
    /// Fraction of the shared offset added to every star per frame.
    pub fraction: f32,
}

impl ParallaxSettings {
    pub fn validate(&self) -> Result<(), InvalidSetting> {
        check("parallax.intensity", self.intensity, true, "must be finite")?;
        check(
            "parallax.ease",
            self.ease,
            self.ease > 0.0 && self.ease <= 1.0,
            "must be in (0, 1]",
        )?;
        check("parallax.fraction", self.fraction, true, "must be finite")
    }
}

impl Default for ParallaxSettings {
    fn default() -> Self {
        Self {
            intensity: 0.01,
            ease: 0.06,
            fraction: 0.02,
        }
    }
}

/// Local pointer repulsion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepulsionSettings {
    /// Avoidance radius around the pointer.
    pub radius: f32,
    /// Push applied at zero distance.
    pub strength: f32,
    /// Per-frame multiplier on the offset accumulator (< 1).
    pub damping: f32,
}

impl RepulsionSettings {
    pub fn validate(&self) -> Result<(), InvalidSetting> {
        check("repulsion.radius", self.radius, self.radius > 0.0, "must be positive")?;
        check(
            "repulsion.strength",
            self.strength,
            self.strength >= 0.0,
            "must not be negative",
        )?;
        check(
            "repulsion.damping",
            self.damping,
            (0.0..1.0).contains(&self.damping),
            "must be in [0, 1)",
        )
    }
}

impl Default for RepulsionSettings {
    fn default() -> Self {
        Self {
            radius: 140.0,
            strength: 2.4,
            damping: 0.92,
        }
    }
}

/// Everything that shapes the starfield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldSettings {
    pub star_count: usize,
    /// Distance beyond the bounds before a star wraps around.
    pub margin: f32,
    pub force: ForceKind,
    pub drift: DriftPattern,
    pub radius_min: f32,
    pub radius_max: f32,
    pub alpha_min: f32,
    pub alpha_max: f32,
    pub parallax: ParallaxSettings,
    pub repulsion: RepulsionSettings,
}

impl StarfieldSettings {
    /// Check that every value keeps the simulation bounded: positive radii,
    /// alphas within [0, 1], a non-negative margin and a damping below 1.
    pub fn validate(&self) -> Result<(), InvalidSetting> {
        check("margin", self.margin, self.margin >= 0.0, "must not be negative")?;
        check("radius_min", self.radius_min, self.radius_min > 0.0, "must be positive")?;
        check(
            "radius_max",
            self.radius_max,
            self.radius_max >= self.radius_min,
            "must not be below radius_min",
        )?;
        check(
            "alpha_min",
            self.alpha_min,
            (0.0..=1.0).contains(&self.alpha_min),
            "must be in [0, 1]",
        )?;
        check(
            "alpha_max",
            self.alpha_max,
            (self.alpha_min..=1.0).contains(&self.alpha_max),
            "must be in [alpha_min, 1]",
        )?;
        self.parallax.validate()?;
        self.repulsion.validate()
    }
}

impl Default for StarfieldSettings {
    fn default() -> Self {
        Self {
            star_count: 140,
            margin: 20.0,
            force: ForceKind::default(),
            drift: DriftPattern::default(),
            radius_min: 0.4,
            radius_max: 2.2,
            alpha_min: 0.2,
            alpha_max: 0.8,
            parallax: ParallaxSettings::default(),
            repulsion: RepulsionSettings::default(),
        }
    }
}
