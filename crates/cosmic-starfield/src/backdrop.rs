//! Radial gradient backdrop painted behind the stars every frame.

use cosmic_core::{Bounds, Rgba, Vec2};

use crate::surface::Surface;

/// Radius of the gradient's start circle, in logical units.
const START_RADIUS: f32 = 80.0;

/// Stops of the stock backdrop: a blue glow fading into near-black.
const BACKDROP_STOPS: [GradientStop; 3] = [
    GradientStop::new(0.0, Rgba::new(70, 110, 255, 0.35)),
    GradientStop::new(0.4, Rgba::new(20, 40, 120, 0.4)),
    GradientStop::new(1.0, Rgba::new(3, 6, 20, 1.0)),
];

/// A color at a position along a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Two-circle radial gradient.
///
/// A point's color comes from the largest `ω` for which the point lies on
/// the circle interpolated between the start and end circles at `ω` with a
/// non-negative radius. `ω` outside `[0, 1]` takes the nearest end color.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub start: Vec2,
    pub start_radius: f32,
    pub end: Vec2,
    pub end_radius: f32,
    /// Stops sorted by offset.
    pub stops: Vec<GradientStop>,
}

impl RadialGradient {
    /// Color of the gradient at `point`. Transparent where the gradient is
    /// undefined.
    pub fn sample(&self, point: Vec2) -> Rgba {
        match self.omega(point) {
            Some(omega) => self.color_at(omega),
            None => Rgba::TRANSPARENT,
        }
    }

    /// Interpolated stop color at gradient position `t`.
    pub fn color_at(&self, t: f32) -> Rgba {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Rgba::TRANSPARENT;
        };
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }
        self.stops
            .windows(2)
            .find(|pair| t <= pair[1].offset)
            .map(|pair| {
                let span = pair[1].offset - pair[0].offset;
                if span <= f32::EPSILON {
                    pair[1].color
                } else {
                    pair[0].color.lerp(pair[1].color, (t - pair[0].offset) / span)
                }
            })
            .unwrap_or(last.color)
    }

    /// Solve `|p - c(ω)| = r(ω)` for the largest `ω` with `r(ω) >= 0`.
    fn omega(&self, point: Vec2) -> Option<f32> {
        let cd = self.end - self.start;
        let pd = point - self.start;
        let dr = self.end_radius - self.start_radius;
        let r0 = self.start_radius;

        let a = cd.dot(cd) - dr * dr;
        let b = pd.dot(cd) + r0 * dr;
        let c = pd.dot(pd) - r0 * r0;
        let radius_ok = |omega: f32| r0 + omega * dr >= 0.0;

        if a.abs() <= f32::EPSILON {
            if b.abs() <= f32::EPSILON {
                return None;
            }
            let omega = c / (2.0 * b);
            return radius_ok(omega).then_some(omega);
        }

        let discriminant = b * b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let (lo, hi) = {
            let w1 = (b + root) / a;
            let w2 = (b - root) / a;
            if w1 < w2 { (w1, w2) } else { (w2, w1) }
        };
        [hi, lo].into_iter().find(|&omega| radius_ok(omega))
    }
}

/// The backdrop gradient laid out for `bounds`.
pub fn backdrop_gradient(bounds: Bounds) -> RadialGradient {
    let Bounds { width, height } = bounds;
    RadialGradient {
        start: Vec2::new(width * 0.2, height * 0.2),
        start_radius: START_RADIUS,
        end: Vec2::new(width * 0.6, height * 0.8),
        end_radius: width.max(height),
        stops: BACKDROP_STOPS.to_vec(),
    }
}

/// Paint the backdrop over the whole surface.
pub fn paint_backdrop<S: Surface + ?Sized>(surface: &mut S) {
    let gradient = backdrop_gradient(surface.bounds());
    surface.fill_gradient(&gradient);
}
