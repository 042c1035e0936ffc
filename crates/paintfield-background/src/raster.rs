//! In-memory RGBA raster surface.

use paintfield_core::Rgba;

use crate::surface::{RadialGradient, Surface, Viewport};

/// A surface backed by a pixel buffer at device resolution.
///
/// Logical coordinates are scaled by the viewport's pixel ratio, so a drop
/// at logical `(10, 10)` on a 2x viewport lands on device pixel `(20, 20)`.
#[derive(Debug, Clone, Default)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    scale: f32,
    pixels: Vec<Rgba>,
}

impl PixelCanvas {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            ..Default::default()
        }
    }

    /// Device size of the buffer.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel at device coordinates, `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Pixel under a logical coordinate.
    pub fn pixel_at_logical(&self, x: f32, y: f32) -> Option<Rgba> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        self.pixel((x * self.scale) as u32, (y * self.scale) as u32)
    }
}

impl Surface for PixelCanvas {
    fn resize(&mut self, viewport: Viewport) {
        let (width, height) = viewport.backing_size();
        self.width = width;
        self.height = height;
        self.scale = viewport.pixel_ratio;
        self.pixels = vec![Rgba::TRANSPARENT; (width as usize) * (height as usize)];
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    fn fill(&mut self, color: Rgba) {
        for px in &mut self.pixels {
            *px = color.over(*px);
        }
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
        if self.width == 0 || self.height == 0 || gradient.radius <= 0.0 {
            return;
        }
        let scale = self.scale;
        let reach = gradient.radius * scale;
        let (cx, cy) = (gradient.cx * scale, gradient.cy * scale);

        // Device-space bounding box of the disc, clipped to the buffer.
        let x0 = (cx - reach).floor().max(0.0) as u32;
        let y0 = (cy - reach).floor().max(0.0) as u32;
        let x1 = ((cx + reach).ceil().max(0.0) as u32).min(self.width);
        let y1 = ((cy + reach).ceil().max(0.0) as u32).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                // Sample at the pixel center, mapped back to logical space.
                let lx = (x as f32 + 0.5) / scale;
                let ly = (y as f32 + 0.5) / scale;
                let src = gradient.color_at_point(lx, ly);
                if src.a <= 0.0 {
                    continue;
                }
                let idx = (y * self.width + x) as usize;
                self.pixels[idx] = src.over(self.pixels[idx]);
            }
        }
    }
}
