//! Starfield simulation state and the per-frame update.

use cosmic_core::{Bounds, DriftPattern, ForceKind, Rgba, StarfieldSettings, Vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::backdrop::paint_backdrop;
use crate::force::{self, ForceModel};
use crate::stars::{self, Star, StarShape};
use crate::surface::Surface;

/// Everything the animation mutates, owned in one place.
#[derive(Debug)]
pub struct Starfield {
    stars: Vec<Star>,
    bounds: Bounds,
    /// Latest pointer position, if the pointer is over the surface.
    pointer: Option<Vec2>,
    settings: StarfieldSettings,
    force: Box<dyn ForceModel>,
    rng: StdRng,
}

impl Starfield {
    /// Create a starfield seeded from the system clock.
    pub fn new(settings: StarfieldSettings, bounds: Bounds) -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::with_seed(settings, bounds, seed)
    }

    /// Create a starfield with a fixed seed.
    pub fn with_seed(settings: StarfieldSettings, bounds: Bounds, seed: u64) -> Self {
        let mut starfield = Self {
            stars: Vec::new(),
            bounds,
            pointer: None,
            force: force::build(settings.force, &settings),
            settings,
            rng: StdRng::seed_from_u64(seed),
        };
        starfield.regenerate();
        starfield
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn settings(&self) -> &StarfieldSettings {
        &self.settings
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn force_kind(&self) -> ForceKind {
        self.force.kind()
    }

    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = Some(position);
    }

    /// Forget the pointer, e.g. when it leaves the surface.
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Replace the bounds and the whole star set together.
    pub fn resize(&mut self, bounds: Bounds) {
        debug!(
            from_width = self.bounds.width,
            from_height = self.bounds.height,
            width = bounds.width,
            height = bounds.height,
            "starfield resized"
        );
        self.bounds = bounds;
        self.regenerate();
    }

    /// Resize only if `bounds` differ from the current ones.
    pub fn sync_bounds(&mut self, bounds: Bounds) -> bool {
        if bounds == self.bounds {
            return false;
        }
        self.resize(bounds);
        true
    }

    /// Throw away every star and create a fresh batch.
    pub fn regenerate(&mut self) {
        let shape = StarShape::from(&self.settings);
        self.stars = stars::regenerate(self.settings.star_count, self.bounds, &shape, &mut self.rng);
        debug!(count = self.stars.len(), "stars regenerated");
    }

    /// Switch the force model. Any repulsion offsets are dropped.
    pub fn set_force(&mut self, kind: ForceKind) {
        self.settings.force = kind;
        self.force = force::build(kind, &self.settings);
        for star in &mut self.stars {
            star.offset = Vec2::ZERO;
        }
        info!(force = kind.label(), "force model switched");
    }

    /// Switch to the next force model and return it.
    pub fn cycle_force(&mut self) -> ForceKind {
        let next = self.force.kind().next();
        self.set_force(next);
        next
    }

    /// Change the drift distribution; takes effect through a regeneration.
    pub fn set_drift_pattern(&mut self, drift: DriftPattern) {
        self.settings.drift = drift;
        self.regenerate();
    }

    /// Advance every star by one frame and draw the result.
    ///
    /// If the surface changed size since the last frame the star set is
    /// regenerated for the new bounds first.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.sync_bounds(surface.bounds());

        surface.clear();
        paint_backdrop(surface);

        let pointer = self.pointer;
        let bounds = self.bounds;
        let margin = self.settings.margin;
        self.force.begin_frame(pointer, bounds);

        for star in &mut self.stars {
            star.position += star.drift;
            let delta = self.force.displace(star, pointer);
            star.position += delta;
            star.wrap(bounds, margin);

            surface.fill_circle(star.visible_position(), star.radius, Rgba::white(star.alpha));
        }
    }
}
