//! Pointer-driven forces applied to stars each frame.
//!
//! A [`ForceModel`] gets one shared-state hook per frame and is then asked,
//! star by star, how far to push the base position on top of its drift.

use std::fmt::Debug;

use cosmic_core::{Bounds, ForceKind, ParallaxSettings, RepulsionSettings, StarfieldSettings, Vec2};

use crate::stars::Star;

/// Distances at or below this are treated as "on top of the pointer" and
/// get no push, avoiding a division by zero.
pub const EPSILON: f32 = 0.001;

/// Strategy for pointer interaction.
pub trait ForceModel: Debug + Send {
    /// Which kind of force this is.
    fn kind(&self) -> ForceKind;

    /// Update shared per-frame state before any star is displaced.
    fn begin_frame(&mut self, _pointer: Option<Vec2>, _bounds: Bounds) {}

    /// Displacement added to `star.position` this frame, on top of drift.
    ///
    /// May also update per-star transient state such as the offset.
    fn displace(&mut self, star: &mut Star, pointer: Option<Vec2>) -> Vec2;
}

/// Build the force model selected in `settings`.
pub fn build(kind: ForceKind, settings: &StarfieldSettings) -> Box<dyn ForceModel> {
    match kind {
        ForceKind::Drift => Box::new(DriftOnly),
        ForceKind::Parallax => Box::new(Parallax::new(settings.parallax)),
        ForceKind::Repulsion => Box::new(Repulsion::new(settings.repulsion)),
    }
}

/// No pointer interaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriftOnly;

impl ForceModel for DriftOnly {
    fn kind(&self) -> ForceKind {
        ForceKind::Drift
    }

    fn displace(&mut self, _star: &mut Star, _pointer: Option<Vec2>) -> Vec2 {
        Vec2::ZERO
    }
}

/// Shared offset eased toward the pointer's displacement from center.
#[derive(Debug, Clone)]
pub struct Parallax {
    settings: ParallaxSettings,
    current: Vec2,
}

impl Parallax {
    pub fn new(settings: ParallaxSettings) -> Self {
        Self {
            settings,
            current: Vec2::ZERO,
        }
    }

    /// The eased shared offset.
    pub fn current(&self) -> Vec2 {
        self.current
    }

    /// Offset the eased value is heading for. An unknown pointer counts as
    /// centered.
    pub fn target(&self, pointer: Option<Vec2>, bounds: Bounds) -> Vec2 {
        pointer
            .map(|p| (p - bounds.center()) * self.settings.intensity)
            .unwrap_or(Vec2::ZERO)
    }
}

impl ForceModel for Parallax {
    fn kind(&self) -> ForceKind {
        ForceKind::Parallax
    }

    fn begin_frame(&mut self, pointer: Option<Vec2>, bounds: Bounds) {
        let target = self.target(pointer, bounds);
        self.current += (target - self.current) * self.settings.ease;
    }

    fn displace(&mut self, _star: &mut Star, _pointer: Option<Vec2>) -> Vec2 {
        self.current * self.settings.fraction
    }
}

/// Per-star push away from a nearby pointer, damped back to rest.
#[derive(Debug, Clone)]
pub struct Repulsion {
    settings: RepulsionSettings,
}

impl Repulsion {
    pub fn new(settings: RepulsionSettings) -> Self {
        Self { settings }
    }

    /// Push for a star at `position`, before damping. Zero outside the
    /// avoidance radius or within [`EPSILON`] of the pointer.
    pub fn push(&self, position: Vec2, pointer: Vec2) -> Vec2 {
        let away = position - pointer;
        let distance = away.length();
        let radius = self.settings.radius;
        if distance <= EPSILON || distance >= radius {
            return Vec2::ZERO;
        }
        let magnitude = (radius - distance) / radius * self.settings.strength;
        away * (magnitude / distance)
    }
}

impl ForceModel for Repulsion {
    fn kind(&self) -> ForceKind {
        ForceKind::Repulsion
    }

    fn displace(&mut self, star: &mut Star, pointer: Option<Vec2>) -> Vec2 {
        if let Some(pointer) = pointer {
            star.offset += self.push(star.visible_position(), pointer);
        }
        star.offset *= self.settings.damping;
        Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star_at(position: Vec2) -> Star {
        Star {
            position,
            radius: 1.0,
            alpha: 0.5,
            drift: Vec2::ZERO,
            offset: Vec2::ZERO,
        }
    }

    #[test]
    fn test_build_selects_kind() {
        let settings = StarfieldSettings::default();
        for kind in [ForceKind::Drift, ForceKind::Parallax, ForceKind::Repulsion] {
            assert_eq!(build(kind, &settings).kind(), kind);
        }
    }

    #[test]
    fn test_drift_only_ignores_pointer() {
        let mut star = star_at(Vec2::new(10.0, 10.0));
        let delta = DriftOnly.displace(&mut star, Some(Vec2::new(10.0, 11.0)));
        assert_eq!(delta, Vec2::ZERO);
        assert_eq!(star.offset, Vec2::ZERO);
    }

    #[test]
    fn test_repulsion_push_at_distance_50() {
        let repulsion = Repulsion::new(RepulsionSettings::default());
        let pointer = Vec2::new(400.0, 300.0);
        let push = repulsion.push(Vec2::new(450.0, 300.0), pointer);
        let expected = (140.0 - 50.0) / 140.0 * 2.4;
        assert!((push.length() - expected).abs() < 1e-4);
        assert!((push.length() - 1.543).abs() < 1e-3);
        // Directed away from the pointer.
        assert!(push.x > 0.0 && push.y.abs() < 1e-6);
    }

    #[test]
    fn test_repulsion_offset_is_damped_same_frame() {
        let mut repulsion = Repulsion::new(RepulsionSettings::default());
        let pointer = Vec2::new(400.0, 300.0);
        let mut star = star_at(Vec2::new(430.0, 340.0));
        let delta = repulsion.displace(&mut star, Some(pointer));

        assert_eq!(delta, Vec2::ZERO);
        let expected = (140.0 - 50.0) / 140.0 * 2.4 * 0.92;
        assert!((star.offset.length() - expected).abs() < 1e-4);
        assert!((star.offset.length() - 1.419).abs() < 1e-3);
        // Base position is untouched; only the offset moves.
        assert_eq!(star.position, Vec2::new(430.0, 340.0));
    }

    #[test]
    fn test_repulsion_outside_radius_and_singularity() {
        let repulsion = Repulsion::new(RepulsionSettings::default());
        let pointer = Vec2::new(0.0, 0.0);
        assert_eq!(repulsion.push(Vec2::new(140.0, 0.0), pointer), Vec2::ZERO);
        assert_eq!(repulsion.push(Vec2::new(0.0005, 0.0), pointer), Vec2::ZERO);
        assert_eq!(repulsion.push(pointer, pointer), Vec2::ZERO);
    }

    #[test]
    fn test_repulsion_offset_decays_when_pointer_leaves() {
        let mut repulsion = Repulsion::new(RepulsionSettings::default());
        let mut star = star_at(Vec2::new(10.0, 0.0));
        for _ in 0..10 {
            repulsion.displace(&mut star, Some(Vec2::ZERO));
        }
        assert!(star.offset.length() > 1.0);

        let far = Some(Vec2::new(5000.0, 5000.0));
        let mut frames = 0;
        while star.offset.length() >= 1e-3 {
            repulsion.displace(&mut star, far);
            frames += 1;
            assert!(frames <= 200, "offset did not decay");
        }
    }

    #[test]
    fn test_repulsion_decays_without_pointer() {
        let mut repulsion = Repulsion::new(RepulsionSettings::default());
        let mut star = star_at(Vec2::ZERO);
        star.offset = Vec2::new(3.0, 4.0);
        repulsion.displace(&mut star, None);
        assert!((star.offset.length() - 5.0 * 0.92).abs() < 1e-5);
    }

    #[test]
    fn test_parallax_converges_monotonically() {
        let mut parallax = Parallax::new(ParallaxSettings::default());
        let bounds = Bounds::new(800.0, 600.0);
        let pointer = Some(Vec2::new(700.0, 100.0));
        let target = parallax.target(pointer, bounds);
        assert!((target - Vec2::new(3.0, -2.0)).length() < 1e-5);

        let mut previous = (parallax.current() - target).length();
        for _ in 0..100 {
            parallax.begin_frame(pointer, bounds);
            let gap = (parallax.current() - target).length();
            assert!(gap < previous);
            previous = gap;
        }
    }

    #[test]
    fn test_parallax_delta_is_fraction_of_shared_offset() {
        let settings = ParallaxSettings {
            ease: 1.0,
            ..ParallaxSettings::default()
        };
        let mut parallax = Parallax::new(settings);
        let bounds = Bounds::new(800.0, 600.0);
        let pointer = Some(Vec2::new(500.0, 300.0));
        parallax.begin_frame(pointer, bounds);
        assert!((parallax.current() - Vec2::new(1.0, 0.0)).length() < 1e-5);

        let mut star = star_at(Vec2::ZERO);
        let delta = parallax.displace(&mut star, pointer);
        assert!((delta.x - 0.02).abs() < 1e-6);
        assert_eq!(delta.y, 0.0);
    }

    #[test]
    fn test_parallax_without_pointer_eases_home() {
        let mut parallax = Parallax::new(ParallaxSettings::default());
        let bounds = Bounds::new(100.0, 100.0);
        parallax.begin_frame(Some(Vec2::new(100.0, 100.0)), bounds);
        let pushed = parallax.current().length();
        assert!(pushed > 0.0);
        parallax.begin_frame(None, bounds);
        assert!(parallax.current().length() < pushed);
    }
}
