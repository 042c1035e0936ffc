//! Core types for the paintfield background.
//!
//! Holds the palette data model, the shared [`PaletteStore`] that hosts and
//! the renderer read the active colors from, and the renderer's
//! [`FieldTuning`].

mod color;
mod palette;
mod store;
mod tuning;

pub use color::{ParseColorError, Rgb, Rgba};
pub use palette::{Palette, PaletteName, UnknownPalette};
pub use store::PaletteStore;
pub use tuning::{DEFAULT_FADE_PER_FRAME, FieldTuning};
