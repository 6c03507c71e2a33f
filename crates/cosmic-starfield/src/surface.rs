//! Drawing surfaces.
//!
//! The simulation only talks to the [`Surface`] trait, in logical units.
//! [`TerminalSurface`] backs it with a half-block raster: every terminal
//! cell holds two vertically stacked pixels, drawn as `▀` with the upper
//! pixel as foreground and the lower pixel as background.

use cosmic_core::{Bounds, Rgba, Vec2};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::backdrop::RadialGradient;
use crate::color::Pixel;

/// Something the starfield can draw on.
pub trait Surface {
    /// Logical size of the surface.
    fn bounds(&self) -> Bounds;

    /// Reset every pixel to opaque black.
    fn clear(&mut self);

    /// Composite a gradient over the whole surface.
    fn fill_gradient(&mut self, gradient: &RadialGradient);

    /// Composite a filled circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
}

/// Logical units covered by one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}

impl Default for CellSize {
    /// Roughly one logical unit per font pixel of a typical terminal.
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 16.0,
        }
    }
}

/// Half-block raster sized to a terminal area.
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    cell: CellSize,
    /// Row-major, `cols` wide and `rows * 2` tall.
    pixels: Vec<Pixel>,
}

impl TerminalSurface {
    pub fn new(cols: u16, rows: u16, cell: CellSize) -> Self {
        Self {
            cols,
            rows,
            cell,
            pixels: vec![Pixel::BLACK; cols as usize * rows as usize * 2],
        }
    }

    /// Resize the raster, discarding its contents.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if cols == self.cols && rows == self.rows {
            return;
        }
        *self = Self::new(cols, rows, self.cell);
    }

    pub fn columns(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cell_size(&self) -> CellSize {
        self.cell
    }

    /// Logical position of the center of a terminal cell.
    pub fn cell_center(&self, col: u16, row: u16) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) * self.cell.width,
            (row as f32 + 0.5) * self.cell.height,
        )
    }

    /// Raster pixel at `(x, y)`, where `y` counts half-cells.
    pub fn pixel(&self, x: u16, y: u16) -> Option<Pixel> {
        self.index(x as i64, y as i64).map(|i| self.pixels[i])
    }

    fn raster_height(&self) -> u16 {
        self.rows.saturating_mul(2)
    }

    fn pixel_width(&self) -> f32 {
        self.cell.width
    }

    fn pixel_height(&self) -> f32 {
        self.cell.height / 2.0
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.cols as i64 || y >= self.raster_height() as i64 {
            return None;
        }
        Some(y as usize * self.cols as usize + x as usize)
    }

    fn pixel_center(&self, x: i64, y: i64) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) * self.pixel_width(),
            (y as f32 + 0.5) * self.pixel_height(),
        )
    }
}

impl Surface for TerminalSurface {
    fn bounds(&self) -> Bounds {
        Bounds::new(
            self.cols as f32 * self.cell.width,
            self.rows as f32 * self.cell.height,
        )
    }

    fn clear(&mut self) {
        self.pixels.fill(Pixel::BLACK);
    }

    fn fill_gradient(&mut self, gradient: &RadialGradient) {
        let cols = self.cols as usize;
        for y in 0..self.raster_height() as i64 {
            for x in 0..cols as i64 {
                let color = gradient.sample(self.pixel_center(x, y));
                self.pixels[y as usize * cols + x as usize].blend(color);
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let (pw, ph) = (self.pixel_width(), self.pixel_height());
        if pw <= 0.0 || ph <= 0.0 {
            return;
        }
        // Only the part of the bounding box that lands on the raster.
        let x0 = (((center.x - radius) / pw).floor() as i64).max(0);
        let x1 = (((center.x + radius) / pw).floor() as i64).min(self.cols as i64 - 1);
        let y0 = (((center.y - radius) / ph).floor() as i64).max(0);
        let y1 = (((center.y + radius) / ph).floor() as i64).min(self.raster_height() as i64 - 1);

        let mut covered = false;
        for y in y0..=y1 {
            for x in x0..=x1 {
                if self.pixel_center(x, y).distance(center) > radius {
                    continue;
                }
                covered = true;
                if let Some(i) = self.index(x, y) {
                    self.pixels[i].blend(color);
                }
            }
        }

        // Stars smaller than a pixel still light the pixel they sit in.
        if !covered {
            let x = (center.x / pw).floor() as i64;
            let y = (center.y / ph).floor() as i64;
            if let Some(i) = self.index(x, y) {
                self.pixels[i].blend(color);
            }
        }
    }
}

impl Widget for &TerminalSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = self.cols.min(area.width);
        let rows = self.rows.min(area.height);
        for row in 0..rows {
            for col in 0..cols {
                let (Some(top), Some(bottom)) =
                    (self.pixel(col, row * 2), self.pixel(col, row * 2 + 1))
                else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol("▀")
                        .set_fg(top.to_color())
                        .set_bg(bottom.to_color());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backdrop::GradientStop;
    use ratatui::style::Color;

    fn surface() -> TerminalSurface {
        TerminalSurface::new(10, 5, CellSize::default())
    }

    #[test]
    fn test_bounds_in_logical_units() {
        let surface = surface();
        assert_eq!(surface.bounds(), Bounds::new(80.0, 80.0));
        assert_eq!(surface.cell_center(0, 0), Vec2::new(4.0, 8.0));
    }

    #[test]
    fn test_small_circle_lights_its_pixel() {
        let mut surface = surface();
        surface.clear();
        surface.fill_circle(Vec2::new(13.0, 9.0), 0.5, Rgba::white(1.0));
        assert_eq!(surface.pixel(1, 1).unwrap().to_color(), Color::Rgb(255, 255, 255));
        assert_eq!(surface.pixel(0, 0).unwrap(), Pixel::BLACK);
    }

    #[test]
    fn test_large_circle_covers_neighbours() {
        let mut surface = surface();
        surface.fill_circle(Vec2::new(40.0, 40.0), 9.0, Rgba::white(1.0));
        let lit = (0..10)
            .flat_map(|x| (0..10).map(move |y| (x, y)))
            .filter(|&(x, y)| surface.pixel(x, y) != Some(Pixel::BLACK))
            .count();
        assert_eq!(lit, 4);
    }

    #[test]
    fn test_offscreen_circle_is_clipped() {
        let mut surface = surface();
        surface.fill_circle(Vec2::new(-15.0, -15.0), 2.0, Rgba::white(1.0));
        surface.fill_circle(Vec2::new(500.0, 10.0), 2.0, Rgba::white(1.0));
        assert!(surface.pixels.iter().all(|p| *p == Pixel::BLACK));
    }

    #[test]
    fn test_huge_circle_is_clipped_to_raster() {
        let mut covering = surface();
        covering.fill_circle(Vec2::new(40.0, 40.0), 1.0e9, Rgba::white(1.0));
        assert!(covering.pixels.iter().all(|p| *p != Pixel::BLACK));

        let mut distant = surface();
        distant.fill_circle(Vec2::new(-1.0e9, 40.0), 1.0e6, Rgba::white(1.0));
        assert!(distant.pixels.iter().all(|p| *p == Pixel::BLACK));
    }

    #[test]
    fn test_gradient_fills_every_pixel() {
        let mut surface = surface();
        let gradient = RadialGradient {
            start: Vec2::ZERO,
            start_radius: 0.0,
            end: Vec2::ZERO,
            end_radius: 1.0,
            stops: vec![GradientStop::new(0.0, Rgba::new(3, 6, 20, 1.0))],
        };
        surface.fill_gradient(&gradient);
        assert!(surface.pixels.iter().all(|p| p.to_color() == Color::Rgb(3, 6, 20)));
    }

    #[test]
    fn test_widget_renders_half_blocks() {
        let mut surface = TerminalSurface::new(1, 1, CellSize::default());
        surface.fill_circle(Vec2::new(4.0, 4.0), 0.5, Rgba::white(1.0));

        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        (&surface).render(area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(255, 255, 255));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut surface = surface();
        surface.fill_circle(Vec2::new(4.0, 4.0), 0.5, Rgba::white(1.0));
        surface.resize(4, 2);
        assert_eq!(surface.columns(), 4);
        assert_eq!(surface.bounds(), Bounds::new(32.0, 32.0));
        assert!(surface.pixels.iter().all(|p| *p == Pixel::BLACK));
    }
}
