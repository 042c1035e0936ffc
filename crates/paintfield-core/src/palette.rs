//! Built-in color palettes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgb;

/// Error returned for an unknown palette name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown palette {0:?}")]
pub struct UnknownPalette(String);

/// Name of a built-in palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaletteName {
    #[default]
    Vintage,
    Retro,
    Pastel,
}

impl PaletteName {
    /// All palettes in display order.
    pub const ALL: [PaletteName; 3] = [PaletteName::Vintage, PaletteName::Retro, PaletteName::Pastel];

    /// Cycle to the next palette.
    pub fn next(self) -> Self {
        match self {
            PaletteName::Vintage => PaletteName::Retro,
            PaletteName::Retro => PaletteName::Pastel,
            PaletteName::Pastel => PaletteName::Vintage,
        }
    }

    /// Look up the palette data for this name.
    pub fn palette(self) -> &'static Palette {
        match self {
            PaletteName::Vintage => &VINTAGE,
            PaletteName::Retro => &RETRO,
            PaletteName::Pastel => &PASTEL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaletteName::Vintage => "Vintage",
            PaletteName::Retro => "Retro",
            PaletteName::Pastel => "Pastel",
        }
    }
}

impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaletteName {
    type Err = UnknownPalette;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaletteName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPalette(s.to_string()))
    }
}

/// Colors that make up one theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Page background.
    pub background: Rgb,
    /// Body text.
    pub text: Rgb,
    /// Primary accent, used for highlights and key hints.
    pub accent: Rgb,
    /// Softer companion to the accent.
    pub accent_soft: Rgb,
    /// Card fill.
    pub card: Rgb,
    /// Card border.
    pub card_border: Rgb,
    /// Ordered pool that paint drops draw their color from.
    pub colors: &'static [Rgb],
}

static VINTAGE: Palette = Palette {
    background: Rgb::new(0xFF, 0xF8, 0xF1),
    text: Rgb::new(0x2B, 0x1D, 0x0E),
    accent: Rgb::new(0xD9, 0x5F, 0x59),
    accent_soft: Rgb::new(0xF4, 0xD0, 0x6F),
    card: Rgb::new(0xFF, 0xFF, 0xFF),
    card_border: Rgb::new(0xEB, 0xDD, 0xC6),
    colors: &[
        Rgb::new(0xD9, 0x5F, 0x59),
        Rgb::new(0xF4, 0xD0, 0x6F),
        Rgb::new(0x3A, 0xAF, 0xA9),
        Rgb::new(0x7E, 0x6B, 0x8F),
        Rgb::new(0x2D, 0x72, 0x8F),
    ],
};

static RETRO: Palette = Palette {
    background: Rgb::new(0xFC, 0xEF, 0xEA),
    text: Rgb::new(0x2E, 0x1E, 0x32),
    accent: Rgb::new(0x7D, 0x5B, 0xA6),
    accent_soft: Rgb::new(0xFE, 0xC3, 0xA6),
    card: Rgb::new(0xFF, 0xF8, 0xE7),
    card_border: Rgb::new(0xE8, 0xD5, 0xB7),
    colors: &[
        Rgb::new(0x7D, 0x5B, 0xA6),
        Rgb::new(0xFE, 0xC3, 0xA6),
        Rgb::new(0xFF, 0x8C, 0x42),
        Rgb::new(0x4E, 0x93, 0x7A),
    ],
};

static PASTEL: Palette = Palette {
    background: Rgb::new(0xFF, 0xF1, 0xF2),
    text: Rgb::new(0x2B, 0x1C, 0x1C),
    accent: Rgb::new(0xEF, 0x47, 0x6F),
    accent_soft: Rgb::new(0xFF, 0xD1, 0x66),
    card: Rgb::new(0xE6, 0xF2, 0xFF),
    card_border: Rgb::new(0xBB, 0xD6, 0xFF),
    colors: &[
        Rgb::new(0xEF, 0x47, 0x6F),
        Rgb::new(0xFF, 0xD1, 0x66),
        Rgb::new(0x06, 0xD6, 0xA0),
        Rgb::new(0x11, 0x8A, 0xB2),
    ],
};
