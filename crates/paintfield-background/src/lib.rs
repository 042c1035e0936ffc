//! Generative paint drop background.
//!
//! A [`PaintField`] owns a set of fading radial drops. New drops appear on a
//! timer, behind the pointer and in bursts around clicks; every frame they
//! grow, drift, fade and shrink until they are removed. Drawing goes through
//! the [`Surface`] trait: [`PixelCanvas`] rasterizes in memory and
//! [`CellCanvas`] renders to a terminal with half-block cells.

mod arena;
mod drop;
mod field;
mod raster;
mod surface;
mod terminal;
mod timer;

pub use arena::DropArena;
pub use drop::{MAX_AGE, MAX_OPACITY, MIN_VISIBLE_RADIUS, PaintDrop, SPAWN_OPACITY};
pub use field::{
    BURST_COUNT, BURST_JITTER, BURST_STAGGER_MS, FALLBACK_COLOR, FieldEvent, FrameStats,
    IDLE_SPAWN_PERIOD_MS, MOVE_SPAWN_MIN_DISTANCE, MOVE_SPAWN_MIN_INTERVAL_MS, PaintField,
    SEED_COUNT, SEED_DELAY_MS, SEED_STAGGER_MS, SpawnKind,
};
pub use raster::PixelCanvas;
pub use surface::{GradientStop, RadialGradient, Surface, Viewport};
pub use terminal::{CELL_HEIGHT, CELL_WIDTH, CellCanvas, cell_center, viewport_for};
pub use timer::{Fired, Task, TimerQueue};
