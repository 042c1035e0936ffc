//! Tuning knobs for the paint drop field.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Opacity lost per frame of drop age.
pub const DEFAULT_FADE_PER_FRAME: f32 = 0.002;

/// Renderer settings other than the color pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTuning {
    /// Fill painted behind the drops each frame. `None` leaves the surface
    /// transparent (cleared only).
    pub background_fill: Option<Rgb>,
    /// Age coefficient of the fade: `opacity = 0.9 - age * fade_per_frame`.
    pub fade_per_frame: f32,
    /// Shrink drops once they stop growing.
    pub shrink_on_fade: bool,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            background_fill: None,
            fade_per_frame: DEFAULT_FADE_PER_FRAME,
            shrink_on_fade: true,
        }
    }
}

impl FieldTuning {
    /// Replace out-of-range values with defaults.
    pub fn sanitized(self) -> Self {
        let fade_per_frame = if self.fade_per_frame.is_finite() && self.fade_per_frame > 0.0 {
            self.fade_per_frame
        } else {
            DEFAULT_FADE_PER_FRAME
        };
        Self {
            fade_per_frame,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_restores_bad_fade() {
        let tuning = FieldTuning {
            fade_per_frame: f32::NAN,
            ..Default::default()
        };
        assert_eq!(tuning.sanitized().fade_per_frame, DEFAULT_FADE_PER_FRAME);

        let negative = FieldTuning {
            fade_per_frame: -1.0,
            ..Default::default()
        };
        assert_eq!(negative.sanitized().fade_per_frame, DEFAULT_FADE_PER_FRAME);
    }

    #[test]
    fn test_sanitized_keeps_valid_values() {
        let tuning = FieldTuning {
            background_fill: Some(Rgb::new(1, 2, 3)),
            fade_per_frame: 0.001,
            shrink_on_fade: false,
        };
        assert_eq!(tuning.sanitized(), tuning);
    }
}
