//! The paint drop field: spawning, per-frame update and lifecycle.

use std::ops::Range;

use paintfield_core::{FieldTuning, PaletteStore, Rgb};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::arena::DropArena;
use crate::drop::PaintDrop;
use crate::surface::{Surface, Viewport};
use crate::timer::{Task, TimerQueue};

/// Period of the ambient spawner.
pub const IDLE_SPAWN_PERIOD_MS: u64 = 800;
/// Pointer travel required between two move spawns.
pub const MOVE_SPAWN_MIN_DISTANCE: f32 = 48.0;
/// Time required between two move spawns.
pub const MOVE_SPAWN_MIN_INTERVAL_MS: u64 = 140;
/// Follow-up drops scheduled after a click.
pub const BURST_COUNT: u64 = 5;
/// Delay between click follow-ups.
pub const BURST_STAGGER_MS: u64 = 100;
/// Maximum offset of a click follow-up from the click point, per axis.
pub const BURST_JITTER: f32 = 50.0;
/// Drops seeded on mount.
pub const SEED_COUNT: u64 = 6;
/// Delay before the first seeded drop.
pub const SEED_DELAY_MS: u64 = 400;
/// Delay between seeded drops.
pub const SEED_STAGGER_MS: u64 = 300;
/// Used when the palette provides no colors.
pub const FALLBACK_COLOR: Rgb = Rgb::new(0xD9, 0x5F, 0x59);

/// How a drop came to be. Clicks make bigger drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Ambient,
    Click,
}

impl SpawnKind {
    /// Range the max radius is drawn from.
    pub fn radius_range(self) -> Range<f32> {
        match self {
            SpawnKind::Ambient => 50.0..130.0,
            SpawnKind::Click => 100.0..220.0,
        }
    }
}

/// Input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldEvent {
    /// Pointer moved to a surface-local position.
    PointerMove { x: f32, y: f32 },
    /// Primary click at a surface-local position.
    PointerClick { x: f32, y: f32 },
    /// Container size or pixel density changed.
    Resize(Viewport),
    /// Host became visible (`true`) or hidden.
    Visibility(bool),
}

/// Which event kinds are currently being listened to.
#[derive(Debug, Clone, Copy, Default)]
struct Listeners {
    pointer_move: bool,
    pointer_click: bool,
    resize: bool,
    visibility: bool,
}

impl Listeners {
    fn install(&mut self) {
        *self = Listeners {
            pointer_move: true,
            pointer_click: true,
            resize: true,
            visibility: true,
        };
    }

    fn remove(&mut self) {
        *self = Listeners::default();
    }

    fn accepts(&self, event: &FieldEvent) -> bool {
        match event {
            FieldEvent::PointerMove { .. } => self.pointer_move,
            FieldEvent::PointerClick { .. } => self.pointer_click,
            FieldEvent::Resize(_) => self.resize,
            FieldEvent::Visibility(_) => self.visibility,
        }
    }
}

/// Where and when the last pointer-move spawn happened.
#[derive(Debug, Clone, Copy)]
struct MoveAnchor {
    x: f32,
    y: f32,
    at_ms: u64,
}

/// Outcome of one call to [`PaintField::frame`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// False when the frame was skipped (unmounted or hidden).
    pub simulated: bool,
    /// Gradients issued to the surface.
    pub drawn: usize,
    /// Drops removed at the end of the frame.
    pub removed: usize,
    /// Drops alive after the frame.
    pub live: usize,
}

/// Decorative field of fading paint drops.
///
/// The host drives it with elapsed milliseconds: [`PaintField::tick`] runs
/// due timers, [`PaintField::frame`] advances and draws one animation frame,
/// and [`PaintField::handle_event`] feeds pointer, resize and visibility
/// input. Nothing here can fail.
#[derive(Debug)]
pub struct PaintField<S: Surface> {
    surface: S,
    palette: PaletteStore,
    tuning: FieldTuning,
    drops: DropArena,
    timers: TimerQueue,
    listeners: Listeners,
    viewport: Viewport,
    rng: SmallRng,
    /// Bumped on every teardown; timers from older epochs are ignored.
    epoch: u64,
    mounted: bool,
    visible: bool,
    last_move_spawn: Option<MoveAnchor>,
}

impl<S: Surface> PaintField<S> {
    /// Create an unmounted field seeded from the system clock.
    pub fn new(surface: S, palette: PaletteStore, tuning: FieldTuning) -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::with_seed(surface, palette, tuning, seed)
    }

    /// Create an unmounted field with a fixed RNG seed.
    pub fn with_seed(surface: S, palette: PaletteStore, tuning: FieldTuning, seed: u64) -> Self {
        Self {
            surface,
            palette,
            tuning: tuning.sanitized(),
            drops: DropArena::with_capacity(64),
            timers: TimerQueue::new(),
            listeners: Listeners::default(),
            viewport: Viewport::default(),
            rng: SmallRng::seed_from_u64(seed),
            epoch: 0,
            mounted: false,
            visible: true,
            last_move_spawn: None,
        }
    }

    /// Attach to a host: install listeners, size the surface, start the
    /// ambient spawner and schedule the seed drops.
    pub fn mount(&mut self, now_ms: u64, viewport: Viewport, visible: bool) {
        if self.mounted {
            self.unmount();
        }
        self.mounted = true;
        self.visible = visible;
        self.listeners.install();
        self.apply_viewport(viewport);

        self.timers
            .schedule_repeating(now_ms, IDLE_SPAWN_PERIOD_MS, Task::IdleSpawn, self.epoch);
        for i in 0..SEED_COUNT {
            self.timers.schedule(
                now_ms,
                SEED_DELAY_MS + i * SEED_STAGGER_MS,
                Task::SeedSpawn,
                self.epoch,
            );
        }
        tracing::debug!(
            epoch = self.epoch,
            width = viewport.width,
            height = viewport.height,
            "paint field mounted"
        );
    }

    /// Detach from the host: cancel timers, remove listeners and drop every
    /// live drop. Calling it again is a no-op.
    pub fn unmount(&mut self) {
        self.epoch += 1;
        self.timers.clear();
        self.listeners.remove();
        self.drops.clear();
        self.last_move_spawn = None;
        if std::mem::replace(&mut self.mounted, false) {
            tracing::debug!(epoch = self.epoch, "paint field unmounted");
        }
    }

    /// Deliver host input. Ignored unless the matching listener is installed.
    pub fn handle_event(&mut self, now_ms: u64, event: FieldEvent) {
        if !self.listeners.accepts(&event) {
            return;
        }
        match event {
            FieldEvent::PointerMove { x, y } => self.on_pointer_move(now_ms, x, y),
            FieldEvent::PointerClick { x, y } => self.on_pointer_click(now_ms, x, y),
            FieldEvent::Resize(viewport) => {
                self.apply_viewport(viewport);
                tracing::debug!(width = viewport.width, height = viewport.height, "paint field resized");
            }
            FieldEvent::Visibility(visible) => {
                if self.visible != visible {
                    tracing::debug!(visible, "paint field visibility changed");
                }
                self.visible = visible;
            }
        }
    }

    /// Fire every timer due at `now_ms`. Returns the number of drops spawned.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        let mut spawned = 0;
        while let Some(fired) = self.timers.pop_due(now_ms) {
            // Teardown clears the queue; the epoch check catches anything
            // scheduled against an earlier mount regardless. The page may
            // also have been hidden since.
            if fired.epoch != self.epoch || !self.mounted || !self.visible {
                continue;
            }
            let placed = match fired.task {
                Task::IdleSpawn | Task::SeedSpawn => self.spawn_random(),
                Task::BurstSpawn { x, y } => {
                    let jx = (self.rng.r#gen::<f32>() - 0.5) * 2.0 * BURST_JITTER;
                    let jy = (self.rng.r#gen::<f32>() - 0.5) * 2.0 * BURST_JITTER;
                    self.spawn(x + jx, y + jy, SpawnKind::Ambient);
                    true
                }
            };
            if placed {
                spawned += 1;
            }
        }
        spawned
    }

    /// Advance every drop by one frame and draw it.
    ///
    /// Skipped while unmounted or hidden. On a zero-size viewport drops still
    /// age but nothing is drawn.
    pub fn frame(&mut self) -> FrameStats {
        if !self.mounted || !self.visible {
            return FrameStats {
                live: self.drops.len(),
                ..Default::default()
            };
        }

        let draw = !self.viewport.is_empty();
        if draw {
            self.surface.clear();
            if let Some(fill) = self.tuning.background_fill {
                self.surface.fill(fill.with_alpha(1.0));
            }
        }

        let tuning = self.tuning;
        let surface = &mut self.surface;
        let mut drawn = 0;
        let mut removed = 0;
        self.drops.update_rev(|drop| {
            drop.step(&tuning);
            if draw {
                surface.fill_radial_gradient(&drop.gradient());
                drawn += 1;
            }
            let alive = !drop.is_dead();
            if !alive {
                removed += 1;
            }
            alive
        });

        FrameStats {
            simulated: true,
            drawn,
            removed,
            live: self.drops.len(),
        }
    }

    /// Create a drop at `(x, y)` with a color from the current palette.
    pub fn spawn(&mut self, x: f32, y: f32, kind: SpawnKind) {
        let colors = self.palette.colors();
        let color = colors.choose(&mut self.rng).copied().unwrap_or(FALLBACK_COLOR);
        let max_radius = self.rng.gen_range(kind.radius_range());
        let vx = (self.rng.r#gen::<f32>() - 0.5) * 2.0;
        let vy = (self.rng.r#gen::<f32>() - 0.5) * 2.0;
        self.drops
            .insert(PaintDrop::new(x, y, max_radius, color, vx, vy));
    }

    /// Spawn an ambient drop somewhere on the surface. Nothing happens on a
    /// zero-size viewport.
    fn spawn_random(&mut self) -> bool {
        if self.viewport.is_empty() {
            return false;
        }
        let x = self.rng.gen_range(0.0..self.viewport.width);
        let y = self.rng.gen_range(0.0..self.viewport.height);
        self.spawn(x, y, SpawnKind::Ambient);
        true
    }

    fn on_pointer_move(&mut self, now_ms: u64, x: f32, y: f32) {
        let last = self.last_move_spawn;
        let far_enough = last.is_none_or(|a| (x - a.x).hypot(y - a.y) >= MOVE_SPAWN_MIN_DISTANCE);
        let old_enough =
            last.is_none_or(|a| now_ms.saturating_sub(a.at_ms) >= MOVE_SPAWN_MIN_INTERVAL_MS);

        if far_enough && old_enough {
            self.spawn(x, y, SpawnKind::Ambient);
            self.last_move_spawn = Some(MoveAnchor { x, y, at_ms: now_ms });
        }
    }

    fn on_pointer_click(&mut self, now_ms: u64, x: f32, y: f32) {
        self.spawn(x, y, SpawnKind::Click);
        for i in 0..BURST_COUNT {
            self.timers
                .schedule(now_ms, i * BURST_STAGGER_MS, Task::BurstSpawn { x, y }, self.epoch);
        }
    }

    fn apply_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.surface.resize(viewport);
    }

    /// Remove every live drop without touching timers or listeners.
    pub fn clear(&mut self) {
        self.drops.clear();
    }

    pub fn drops(&self) -> impl Iterator<Item = &PaintDrop> {
        self.drops.iter()
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn tuning(&self) -> FieldTuning {
        self.tuning
    }

    /// Replace the tuning. Applies from the next frame.
    pub fn set_tuning(&mut self, tuning: FieldTuning) {
        self.tuning = tuning.sanitized();
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Timers still waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}

impl<S: Surface> Drop for PaintField<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}
