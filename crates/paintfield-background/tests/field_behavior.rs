use paintfield_background::{
    BURST_JITTER, FieldEvent, PaintField, RadialGradient, SpawnKind, Surface, Viewport, MAX_AGE,
    MIN_VISIBLE_RADIUS,
};
use paintfield_core::{FieldTuning, PaletteName, PaletteStore, Rgb, Rgba};

/// Surface that records what was drawn.
#[derive(Debug, Default)]
struct RecordingSurface {
    viewports: Vec<Viewport>,
    clears: usize,
    fills: Vec<Rgba>,
    gradients: Vec<RadialGradient>,
}

impl RecordingSurface {
    fn draw_calls(&self) -> usize {
        self.fills.len() + self.gradients.len()
    }

    fn reset(&mut self) {
        self.clears = 0;
        self.fills.clear();
        self.gradients.clear();
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.viewports.push(viewport);
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn fill(&mut self, color: Rgba) {
        self.fills.push(color);
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
        self.gradients.push(*gradient);
    }
}

fn viewport() -> Viewport {
    Viewport::new(1280.0, 720.0, 2.0)
}

fn field_with(palette: PaletteStore, tuning: FieldTuning) -> PaintField<RecordingSurface> {
    PaintField::with_seed(RecordingSurface::default(), palette, tuning, 0x5eed)
}

fn field() -> PaintField<RecordingSurface> {
    field_with(PaletteStore::default(), FieldTuning::default())
}

/// Tick in 16 ms steps from `from` to `to` inclusive.
fn run_timers(field: &mut PaintField<RecordingSurface>, from: u64, to: u64) {
    let mut now = from;
    while now <= to {
        field.tick(now);
        now += 16;
    }
    field.tick(to);
}

#[test]
fn move_spawns_need_distance_and_time() {
    let mut field = field();
    field.mount(0, viewport(), true);

    field.handle_event(100, FieldEvent::PointerMove { x: 100.0, y: 100.0 });
    assert_eq!(field.len(), 1);

    // Close and soon.
    field.handle_event(150, FieldEvent::PointerMove { x: 120.0, y: 110.0 });
    assert_eq!(field.len(), 1);

    // Far enough, too soon.
    field.handle_event(200, FieldEvent::PointerMove { x: 300.0, y: 100.0 });
    assert_eq!(field.len(), 1);

    // Late enough, too close.
    field.handle_event(400, FieldEvent::PointerMove { x: 130.0, y: 120.0 });
    assert_eq!(field.len(), 1);

    // Both.
    field.handle_event(400, FieldEvent::PointerMove { x: 148.0, y: 100.0 });
    assert_eq!(field.len(), 2);
    field.handle_event(540, FieldEvent::PointerMove { x: 148.0, y: 148.0 });
    assert_eq!(field.len(), 3);
}

#[test]
fn one_click_yields_six_drops_within_half_a_second() {
    let mut field = field();
    field.mount(0, viewport(), true);
    // Seeds are done by 1900 and idle fired at 2400; next idle is 3200.
    run_timers(&mut field, 0, 2401);
    field.clear();

    field.handle_event(2401, FieldEvent::PointerClick { x: 640.0, y: 360.0 });
    assert_eq!(field.len(), 1);

    run_timers(&mut field, 2401, 2901);
    assert_eq!(field.len(), 6);

    let mut drops = field.drops();
    let first = drops.next().expect("click drop");
    assert!(SpawnKind::Click.radius_range().contains(&first.max_radius));
    assert_eq!((first.x, first.y), (640.0, 360.0));
    for drop in drops {
        assert!(SpawnKind::Ambient.radius_range().contains(&drop.max_radius));
        assert!((drop.x - 640.0).abs() <= BURST_JITTER);
        assert!((drop.y - 360.0).abs() <= BURST_JITTER);
    }
}

#[test]
fn click_burst_is_dropped_when_hidden() {
    let mut field = field();
    field.mount(0, viewport(), true);
    run_timers(&mut field, 0, 2401);
    field.clear();

    field.handle_event(2401, FieldEvent::PointerClick { x: 10.0, y: 10.0 });
    field.handle_event(2402, FieldEvent::Visibility(false));
    run_timers(&mut field, 2402, 2901);
    assert_eq!(field.len(), 1);
}

#[test]
fn idle_spawner_adds_two_to_four_drops_per_window() {
    let mut field = field();
    field.mount(0, viewport(), true);
    run_timers(&mut field, 0, 2000);

    let before = field.len();
    run_timers(&mut field, 2000, 4500);
    let spawned = field.len() - before;
    assert!((2..=4).contains(&spawned), "spawned {spawned}");
}

#[test]
fn initial_seeding_places_six_drops_inside_the_surface() {
    let mut field = field();
    field.mount(0, viewport(), true);
    run_timers(&mut field, 0, 1900);
    // Six seeds plus the idle spawns at 800 and 1600.
    assert_eq!(field.len(), 6 + 2);

    for drop in field.drops() {
        assert!((0.0..1280.0).contains(&drop.x));
        assert!((0.0..720.0).contains(&drop.y));
    }
}

#[test]
fn nothing_happens_after_unmount() {
    let mut field = field();
    field.mount(0, viewport(), true);
    field.handle_event(10, FieldEvent::PointerClick { x: 50.0, y: 50.0 });
    field.tick(10);
    field.frame();
    assert!(field.len() > 0);

    field.unmount();
    field.surface_mut().reset();

    field.handle_event(20, FieldEvent::PointerClick { x: 50.0, y: 50.0 });
    field.handle_event(30, FieldEvent::PointerMove { x: 500.0, y: 500.0 });
    for now in (0..20_000).step_by(16) {
        field.tick(now);
        field.frame();
    }

    assert_eq!(field.len(), 0);
    assert_eq!(field.pending_timers(), 0);
    assert_eq!(field.surface().draw_calls(), 0);
    assert_eq!(field.surface().clears, 0);
}

#[test]
fn frame_clears_fills_and_draws_each_drop() {
    let tuning = FieldTuning {
        background_fill: Some(Rgb::new(0xFF, 0xF8, 0xF1)),
        ..Default::default()
    };
    let mut field = field_with(PaletteStore::default(), tuning);
    field.mount(0, viewport(), true);
    field.spawn(10.0, 10.0, SpawnKind::Ambient);
    field.spawn(20.0, 20.0, SpawnKind::Click);

    let stats = field.frame();
    assert!(stats.simulated);
    assert_eq!(stats.drawn, 2);
    assert_eq!(stats.live, 2);

    let surface = field.surface();
    assert_eq!(surface.clears, 1);
    assert_eq!(surface.fills.len(), 1);
    assert_eq!(surface.fills[0].a, 1.0);
    assert_eq!(surface.gradients.len(), 2);
    assert!(surface.gradients.iter().all(|g| g.radius >= 1.0));
}

#[test]
fn transparent_field_only_clears() {
    let mut field = field();
    field.mount(0, viewport(), true);
    field.frame();
    assert_eq!(field.surface().clears, 1);
    assert!(field.surface().fills.is_empty());
}

#[test]
fn resize_reaches_the_surface() {
    let mut field = field();
    field.mount(0, viewport(), true);
    let smaller = Viewport::new(320.0, 200.0, 1.0);
    field.handle_event(5, FieldEvent::Resize(smaller));
    assert_eq!(field.viewport(), smaller);
    assert_eq!(field.surface().viewports.last(), Some(&smaller));
}

#[test]
fn live_drops_never_meet_a_removal_condition() {
    let mut field = field();
    field.mount(0, viewport(), true);
    let mut now = 0;
    for frame in 0..4000u64 {
        now += 16;
        if frame % 40 == 0 {
            field.handle_event(
                now,
                FieldEvent::PointerClick {
                    x: (frame % 1280) as f32,
                    y: (frame % 720) as f32,
                },
            );
        }
        field.tick(now);
        let stats = field.frame();
        assert_eq!(stats.live, field.len());
        for drop in field.drops() {
            assert!(drop.opacity > 0.0);
            assert!(drop.radius >= MIN_VISIBLE_RADIUS);
            assert!(drop.age <= MAX_AGE);
        }
    }
}

#[test]
fn colors_are_picked_uniformly() {
    let palette = PaletteStore::new(PaletteName::Retro);
    let pool = palette.colors();
    let mut field = field_with(palette, FieldTuning::default());
    field.mount(0, viewport(), true);

    const SPAWNS: usize = 8000;
    for i in 0..SPAWNS {
        field.spawn(i as f32 % 100.0, 0.0, SpawnKind::Ambient);
    }

    let expected = SPAWNS / pool.len();
    for color in pool.iter() {
        let count = field.drops().filter(|d| d.color == *color).count();
        assert!(
            count.abs_diff(expected) < 250,
            "{color}: {count} vs expected {expected}"
        );
    }
}

#[test]
fn palette_change_affects_only_later_drops() {
    let palette = PaletteStore::new(PaletteName::Vintage);
    let mut field = field_with(palette.clone(), FieldTuning::default());
    field.mount(0, viewport(), true);

    field.spawn(1.0, 1.0, SpawnKind::Ambient);
    let first = field.drops().next().map(|d| d.color).unwrap();
    assert!(PaletteName::Vintage.palette().colors.contains(&first));

    let only = Rgb::new(0x11, 0x22, 0x33);
    palette.set_colors(vec![only]);
    field.spawn(2.0, 2.0, SpawnKind::Ambient);

    let colors: Vec<Rgb> = field.drops().map(|d| d.color).collect();
    assert_eq!(colors, vec![first, only]);
}
