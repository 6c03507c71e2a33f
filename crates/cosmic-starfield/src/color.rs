//! Color compositing for the terminal raster.

use cosmic_core::Rgba;
use ratatui::style::Color;

/// An opaque raster pixel with channels kept as floats (0.0 - 255.0) so
/// repeated blending does not accumulate rounding error.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pixel {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Composite `src` over this pixel (source-over).
    pub fn blend(&mut self, src: Rgba) {
        let a = src.a.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        self.r += (src.r as f32 - self.r) * a;
        self.g += (src.g as f32 - self.g) * a;
        self.b += (src.b as f32 - self.b) * a;
    }

    /// Convert to a truecolor terminal color.
    pub fn to_color(self) -> Color {
        let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        Color::Rgb(channel(self.r), channel(self.g), channel(self.b))
    }
}
