//! Drawing surface abstraction.

use paintfield_core::{Rgb, Rgba};

/// Logical size of the drawing area plus its pixel density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical width in pixels.
    pub width: f32,
    /// Logical height in pixels.
    pub height: f32,
    /// Backing pixels per logical pixel, always a whole number ≥ 1.
    pub pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    /// Build a viewport, sanitising the inputs. Negative or non-finite sizes
    /// become zero and the pixel ratio is floored to a whole number ≥ 1.
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        let size = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let pixel_ratio = if pixel_ratio.is_finite() {
            pixel_ratio.floor().max(1.0)
        } else {
            1.0
        };
        Self {
            width: size(width),
            height: size(height),
            pixel_ratio,
        }
    }

    /// True when there is nothing to draw on.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Backing store dimensions in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).floor() as u32,
            (self.height * self.pixel_ratio).floor() as u32,
        )
    }
}

/// A color stop along a gradient, `offset` in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Radial gradient filling a disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub stops: [GradientStop; 3],
}

impl RadialGradient {
    /// The paint drop gradient: full strength at the center, half at 70% of
    /// the radius, transparent at the edge.
    pub fn paint_drop(cx: f32, cy: f32, radius: f32, color: Rgb, opacity: f32) -> Self {
        Self {
            cx,
            cy,
            radius,
            stops: [
                GradientStop {
                    offset: 0.0,
                    color: color.with_alpha(opacity),
                },
                GradientStop {
                    offset: 0.7,
                    color: color.with_alpha(opacity * 0.5),
                },
                GradientStop {
                    offset: 1.0,
                    color: color.with_alpha(0.0),
                },
            ],
        }
    }

    /// Color at `distance` from the center. Transparent outside the disc.
    pub fn color_at(&self, distance: f32) -> Rgba {
        if self.radius <= 0.0 || distance > self.radius {
            return Rgba::TRANSPARENT;
        }
        let t = distance / self.radius;

        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = (b.offset - a.offset).max(f32::EPSILON);
                let k = ((t - a.offset) / span).clamp(0.0, 1.0);
                let lerp = |x: f32, y: f32| x + (y - x) * k;
                return Rgba {
                    r: lerp(a.color.r, b.color.r),
                    g: lerp(a.color.g, b.color.g),
                    b: lerp(a.color.b, b.color.b),
                    a: lerp(a.color.a, b.color.a),
                };
            }
        }
        self.stops[2].color
    }

    /// Color at a point in logical coordinates.
    pub fn color_at_point(&self, x: f32, y: f32) -> Rgba {
        self.color_at((x - self.cx).hypot(y - self.cy))
    }
}

/// Something the field can draw into. Coordinates are logical pixels.
pub trait Surface {
    /// Match the surface to a new viewport.
    fn resize(&mut self, viewport: Viewport);

    /// Make every pixel transparent.
    fn clear(&mut self);

    /// Composite a flat color over the whole surface.
    fn fill(&mut self, color: Rgba);

    /// Composite a radial gradient over the disc it covers.
    fn fill_radial_gradient(&mut self, gradient: &RadialGradient);
}
