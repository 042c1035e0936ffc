//! A single paint drop and its per-frame physics.

use paintfield_core::{FieldTuning, Rgb};

use crate::surface::RadialGradient;

/// Opacity a drop is born with.
pub const SPAWN_OPACITY: f32 = 0.8;
/// Ceiling of the age-based fade curve.
pub const MAX_OPACITY: f32 = 0.9;
/// Fraction of the max radius added per growing frame.
pub const GROWTH_RATE: f32 = 0.01;
/// Share of the velocity applied to the position each frame.
pub const DRIFT_DAMPING: f32 = 0.3;
/// Velocity multiplier per frame.
pub const FRICTION: f32 = 0.99;
/// Radius multiplier per frame once a drop stops growing.
pub const SHRINK_FACTOR: f32 = 0.997;
/// Drops smaller than this are removed.
pub const MIN_VISIBLE_RADIUS: f32 = 0.5;
/// Drops older than this many frames are removed.
pub const MAX_AGE: u32 = 3000;

/// One fading radial blob of paint.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintDrop {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub max_radius: f32,
    pub color: Rgb,
    pub opacity: f32,
    /// Frames since creation.
    pub age: u32,
    pub vx: f32,
    pub vy: f32,
    /// True until the radius first reaches `max_radius`.
    pub growing: bool,
}

impl PaintDrop {
    pub fn new(x: f32, y: f32, max_radius: f32, color: Rgb, vx: f32, vy: f32) -> Self {
        Self {
            x,
            y,
            radius: 0.0,
            max_radius,
            color,
            opacity: SPAWN_OPACITY,
            age: 0,
            vx,
            vy,
            growing: true,
        }
    }

    /// Advance one frame: grow, drift, fade, shrink.
    pub fn step(&mut self, tuning: &FieldTuning) {
        if self.growing {
            self.radius = (self.radius + self.max_radius * GROWTH_RATE).min(self.max_radius);
            if self.radius >= self.max_radius {
                self.growing = false;
            }
        }

        self.x += self.vx * DRIFT_DAMPING;
        self.y += self.vy * DRIFT_DAMPING;
        self.vx *= FRICTION;
        self.vy *= FRICTION;

        self.age = self.age.saturating_add(1);
        // The curve starts above the spawn opacity; hold until it drops below.
        let faded = (MAX_OPACITY - self.age as f32 * tuning.fade_per_frame).max(0.0);
        self.opacity = self.opacity.min(faded);

        if !self.growing && tuning.shrink_on_fade {
            self.radius *= SHRINK_FACTOR;
        }
    }

    /// Whether the drop should leave the live set.
    pub fn is_dead(&self) -> bool {
        self.opacity <= 0.0 || self.radius < MIN_VISIBLE_RADIUS || self.age > MAX_AGE
    }

    /// Gradient used to draw this drop.
    pub fn gradient(&self) -> RadialGradient {
        RadialGradient::paint_drop(self.x, self.y, self.radius.max(1.0), self.color, self.opacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_drop() -> PaintDrop {
        PaintDrop::new(100.0, 100.0, 80.0, Rgb::new(0xD9, 0x5F, 0x59), 1.0, -0.5)
    }

    #[test]
    fn test_first_step_grows_and_drifts() {
        let mut d = sample_drop();
        d.step(&FieldTuning::default());
        assert!((d.radius - 0.8).abs() < 1e-6);
        assert!((d.x - 100.3).abs() < 1e-4);
        assert!((d.y - 99.85).abs() < 1e-4);
        assert!((d.vx - 0.99).abs() < 1e-6);
        assert_eq!(d.age, 1);
        assert_eq!(d.opacity, SPAWN_OPACITY);
        assert!(d.growing);
    }

    #[test]
    fn test_growth_latches_at_max_radius() {
        let mut d = sample_drop();
        let tuning = FieldTuning {
            shrink_on_fade: false,
            ..Default::default()
        };
        for _ in 0..110 {
            d.step(&tuning);
        }
        assert!(!d.growing);
        assert_eq!(d.radius, d.max_radius);

        d.step(&tuning);
        assert!(!d.growing);
        assert_eq!(d.radius, d.max_radius);
    }

    #[test]
    fn test_shrinks_after_growing() {
        let mut d = sample_drop();
        let tuning = FieldTuning::default();
        while d.growing {
            d.step(&tuning);
        }
        let peak = d.radius;
        d.step(&tuning);
        assert!(d.radius < peak);
        assert!((d.radius - peak * SHRINK_FACTOR).abs() < 1e-4);
    }

    #[test]
    fn test_opacity_follows_age_curve() {
        let mut d = sample_drop();
        let tuning = FieldTuning::default();
        for _ in 0..100 {
            d.step(&tuning);
        }
        assert!((d.opacity - (MAX_OPACITY - 100.0 * 0.002)).abs() < 1e-5);
    }

    #[test]
    fn test_dies_when_faded() {
        let mut d = sample_drop();
        let tuning = FieldTuning::default();
        // Same order as a frame: step, then check for removal.
        let mut frames = 0;
        loop {
            d.step(&tuning);
            frames += 1;
            if d.is_dead() {
                break;
            }
        }
        assert_eq!(d.opacity, 0.0);
        assert!(frames <= 451);
    }

    #[test]
    fn test_dead_conditions() {
        let mut d = sample_drop();
        d.radius = 10.0;
        assert!(!d.is_dead());

        d.radius = 0.4;
        assert!(d.is_dead());

        d.radius = 10.0;
        d.age = MAX_AGE + 1;
        assert!(d.is_dead());

        d.age = 1;
        d.opacity = 0.0;
        assert!(d.is_dead());
    }

    #[test]
    fn test_gradient_radius_has_floor() {
        let d = sample_drop();
        assert_eq!(d.gradient().radius, 1.0);
    }
}
