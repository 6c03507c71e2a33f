//! Star particles and batch regeneration.

use std::ops::Range;

use cosmic_core::{Bounds, DriftPattern, StarfieldSettings, Vec2};
use rand::Rng;

/// A single star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Base position in logical units.
    pub position: Vec2,
    pub radius: f32,
    /// Opacity (0.0 - 1.0).
    pub alpha: f32,
    /// Constant velocity applied every frame.
    pub drift: Vec2,
    /// Transient repulsion offset, decays toward zero.
    pub offset: Vec2,
}

impl Star {
    /// Position the star is drawn at.
    pub fn visible_position(&self) -> Vec2 {
        self.position + self.offset
    }

    /// Wrap the base position toroidally, `margin` units past each edge.
    pub fn wrap(&mut self, bounds: Bounds, margin: f32) {
        self.position.x = wrap_axis(self.position.x, bounds.width, margin);
        self.position.y = wrap_axis(self.position.y, bounds.height, margin);
    }
}

fn wrap_axis(value: f32, extent: f32, margin: f32) -> f32 {
    if value < -margin {
        extent + margin
    } else if value > extent + margin {
        -margin
    } else {
        value
    }
}

/// Value ranges used when creating stars.
#[derive(Debug, Clone, PartialEq)]
pub struct StarShape {
    pub radius: Range<f32>,
    pub alpha: Range<f32>,
    pub drift: DriftPattern,
}

impl Default for StarShape {
    fn default() -> Self {
        Self::from(&StarfieldSettings::default())
    }
}

impl From<&StarfieldSettings> for StarShape {
    fn from(settings: &StarfieldSettings) -> Self {
        Self {
            radius: settings.radius_min..settings.radius_max,
            alpha: settings.alpha_min..settings.alpha_max,
            drift: settings.drift,
        }
    }
}

/// Create `count` fresh stars spread uniformly over `bounds`.
///
/// Degenerate ranges (empty bounds, `min >= max`) collapse to their start
/// value instead of panicking.
pub fn regenerate<R: Rng + ?Sized>(
    count: usize,
    bounds: Bounds,
    shape: &StarShape,
    rng: &mut R,
) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            position: Vec2::new(
                sample(rng, 0.0..bounds.width),
                sample(rng, 0.0..bounds.height),
            ),
            radius: sample(rng, shape.radius.clone()),
            alpha: sample(rng, shape.alpha.clone()),
            drift: Vec2::new(
                sample(rng, shape.drift.dx_range()),
                sample(rng, shape.drift.dy_range()),
            ),
            offset: Vec2::ZERO,
        })
        .collect()
}

fn sample<R: Rng + ?Sized>(rng: &mut R, range: Range<f32>) -> f32 {
    if range.start < range.end {
        rng.gen_range(range)
    } else {
        range.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_regenerate_count_and_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let shape = StarShape::default();
        let bounds = Bounds::new(800.0, 600.0);
        let stars = regenerate(160, bounds, &shape, &mut rng);

        assert_eq!(stars.len(), 160);
        for star in &stars {
            assert!(bounds.contains(star.position));
            assert!(shape.radius.contains(&star.radius));
            assert!(star.radius > 0.0);
            assert!(shape.alpha.contains(&star.alpha));
            assert!(DriftPattern::Jitter.dx_range().contains(&star.drift.x));
            assert!(DriftPattern::Jitter.dy_range().contains(&star.drift.y));
            assert_eq!(star.offset, Vec2::ZERO);
        }
    }

    #[test]
    fn test_stream_drifts_rightward() {
        let mut rng = StdRng::seed_from_u64(11);
        let shape = StarShape {
            drift: DriftPattern::Stream,
            ..StarShape::default()
        };
        let stars = regenerate(50, Bounds::new(100.0, 100.0), &shape, &mut rng);
        assert!(stars.iter().all(|s| s.drift.x > 0.0 && s.drift.y.abs() <= 0.02));
    }

    #[test]
    fn test_empty_bounds_do_not_panic() {
        let mut rng = StdRng::seed_from_u64(3);
        let stars = regenerate(5, Bounds::default(), &StarShape::default(), &mut rng);
        assert_eq!(stars.len(), 5);
        assert!(stars.iter().all(|s| s.position == Vec2::ZERO));
    }

    #[test]
    fn test_zero_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let stars = regenerate(0, Bounds::new(10.0, 10.0), &StarShape::default(), &mut rng);
        assert!(stars.is_empty());
    }

    #[test]
    fn test_wrap_each_axis() {
        let bounds = Bounds::new(100.0, 50.0);
        let mut star = Star {
            position: Vec2::new(-20.5, 70.1),
            radius: 1.0,
            alpha: 0.5,
            drift: Vec2::ZERO,
            offset: Vec2::ZERO,
        };
        star.wrap(bounds, 20.0);
        assert_eq!(star.position, Vec2::new(120.0, -20.0));

        // Exactly on the margin stays put.
        star.position = Vec2::new(-20.0, 70.0);
        star.wrap(bounds, 20.0);
        assert_eq!(star.position, Vec2::new(-20.0, 70.0));
    }
}
