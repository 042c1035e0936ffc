//! Shared palette state.

use std::sync::{Arc, RwLock};

use crate::color::Rgb;
use crate::palette::{Palette, PaletteName};

#[derive(Debug)]
struct StoreInner {
    name: PaletteName,
    colors: Arc<[Rgb]>,
    version: u64,
}

impl StoreInner {
    fn new(name: PaletteName) -> Self {
        Self {
            name,
            colors: name.palette().colors.into(),
            version: 0,
        }
    }
}

/// Handle to the active palette.
///
/// Clones share the same state. Consumers that need to react to changes
/// compare [`PaletteStore::version`] against the last value they saw.
#[derive(Debug, Clone)]
pub struct PaletteStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl Default for PaletteStore {
    fn default() -> Self {
        Self::new(PaletteName::default())
    }
}

impl PaletteStore {
    /// Create a store with `name` active.
    pub fn new(name: PaletteName) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner::new(name))),
        }
    }

    /// Name of the active palette.
    pub fn palette_name(&self) -> PaletteName {
        self.inner
            .read()
            .map(|inner| inner.name)
            .unwrap_or_default()
    }

    /// Data of the active palette.
    pub fn palette(&self) -> &'static Palette {
        self.palette_name().palette()
    }

    /// Switch to `name`. Selecting the active palette is not a change.
    pub fn set_palette(&self, name: PaletteName) {
        if let Ok(mut inner) = self.inner.write() {
            if inner.name == name {
                return;
            }
            inner.name = name;
            inner.colors = name.palette().colors.into();
            inner.version += 1;
            tracing::debug!(palette = %name, version = inner.version, "palette changed");
        }
    }

    /// Advance to the next palette and return it.
    pub fn cycle(&self) -> PaletteName {
        let next = self.palette_name().next();
        self.set_palette(next);
        next
    }

    /// Replace the drop color pool without changing the palette name.
    pub fn set_colors(&self, colors: Vec<Rgb>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.colors = colors.into();
            inner.version += 1;
            tracing::debug!(count = inner.colors.len(), version = inner.version, "color pool replaced");
        }
    }

    /// Current drop color pool. May be empty after [`PaletteStore::set_colors`].
    pub fn colors(&self) -> Arc<[Rgb]> {
        match self.inner.read() {
            Ok(inner) => inner.colors.clone(),
            Err(_) => PaletteName::default().palette().colors.into(),
        }
    }

    pub fn accent(&self) -> Rgb {
        self.palette().accent
    }

    pub fn background(&self) -> Rgb {
        self.palette().background
    }

    pub fn text(&self) -> Rgb {
        self.palette().text
    }

    /// Change counter, bumped on every effective change.
    pub fn version(&self) -> u64 {
        self.inner.read().map(|inner| inner.version).unwrap_or(0)
    }
}
