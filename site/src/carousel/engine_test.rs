#![allow(clippy::float_cmp)]

use super::*;
use crate::carousel::TrackSurface;

// =============================================================
// Helpers
// =============================================================

/// Surface that lays items out arithmetically and records what the engine
/// asked of it.
#[derive(Debug, Default)]
struct FakeSurface {
    viewport: f64,
    widths: Vec<f64>,
    gap: f64,
    /// Report clone edges as a browser would once copies exist.
    rendered_edges: bool,
    /// Slot centres as a browser would report them.
    rendered_centers: Option<Vec<f64>>,
    copies: usize,
    offset: f64,
    grid: bool,
    offset_writes: usize,
}

impl TrackSurface for FakeSurface {
    fn viewport_width(&self) -> f64 {
        self.viewport
    }

    fn item_widths(&self) -> Vec<f64> {
        self.widths.clone()
    }

    #[allow(clippy::cast_precision_loss)]
    fn clone_edge_distance(&self) -> Option<f64> {
        (self.rendered_edges && self.copies > 0)
            .then(|| self.widths.iter().sum::<f64>() + self.gap * self.widths.len() as f64)
    }

    fn item_centers(&self) -> Option<Vec<f64>> {
        self.rendered_centers.clone()
    }

    fn sync_copies(&mut self, copies: usize) {
        self.copies = copies;
    }

    fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
        self.offset_writes += 1;
    }

    fn set_grid(&mut self, grid: bool) {
        self.grid = grid;
    }
}

fn surface(viewport: f64, widths: &[f64]) -> FakeSurface {
    FakeSurface { viewport, widths: widths.to_vec(), gap: 24.0, ..Default::default() }
}

fn started(viewport: f64, widths: &[f64]) -> Carousel<FakeSurface> {
    let mut carousel = Carousel::new(surface(viewport, widths), CarouselConfig::default());
    carousel.init();
    carousel
}

fn three_items() -> Carousel<FakeSurface> {
    started(200.0, &[100.0, 100.0, 100.0])
}

// =============================================================
// Construction and init
// =============================================================

#[test]
fn new_is_stopped_until_init() {
    let carousel = Carousel::new(surface(200.0, &[100.0]), CarouselConfig::default());
    assert_eq!(carousel.run_state(), RunState::Stopped);
    assert_eq!(carousel.mode(), Mode::Scrolling);
    assert_eq!(carousel.period(), 0.0);
}

#[test]
fn init_three_items_two_copies_fallback_period() {
    let mut carousel = three_items();
    assert_eq!(carousel.strip().copies(), 2);
    assert_eq!(carousel.surface().copies, 2);
    assert_eq!(carousel.period(), 300.0 + 2.0 * 24.0);
    assert_eq!(carousel.run_state(), RunState::Running);

    carousel.tick(16.0);
    assert_eq!(carousel.offset(), 1.0);
    assert_eq!(carousel.surface().offset, 1.0);
}

#[test]
fn init_prefers_rendered_clone_edges() {
    let mut fake = surface(200.0, &[100.0, 100.0, 100.0]);
    fake.rendered_edges = true;
    let mut carousel = Carousel::new(fake, CarouselConfig::default());
    carousel.init();
    assert_eq!(carousel.period(), 300.0 + 3.0 * 24.0);
}

#[test]
fn init_without_copies_uses_fallback_even_with_edges() {
    let mut fake = surface(100.0, &[400.0, 400.0]);
    fake.rendered_edges = true;
    let mut carousel = Carousel::new(fake, CarouselConfig::default());
    carousel.init();
    assert_eq!(carousel.strip().copies(), 0);
    assert_eq!(carousel.period(), 824.0);
}

#[test]
fn duplication_covers_viewport_for_many_layouts() {
    let config = CarouselConfig::default();
    for viewport in [320.0, 768.0, 1280.0, 1920.0] {
        for widths in [vec![280.0], vec![120.0, 300.0, 90.0], vec![50.0; 7]] {
            let carousel = started(viewport, &widths);
            assert!(
                carousel.strip().track_width() >= viewport * config.widen_factor + config.widen_margin,
                "viewport {viewport} widths {widths:?}"
            );
        }
    }
}

#[test]
fn single_narrow_item_on_wide_screen_is_fully_covered() {
    let carousel = started(2560.0, &[50.0]);
    assert_eq!(carousel.run_state(), RunState::Running);
    assert!(carousel.strip().track_width() >= 2560.0 * 3.0 + 200.0);
    assert_eq!(carousel.surface().copies, carousel.strip().copies());
}

#[test]
fn init_twice_keeps_same_extended_length() {
    let mut carousel = three_items();
    let len = carousel.strip().slots().len();
    carousel.init();
    assert_eq!(carousel.strip().slots().len(), len);
}

// =============================================================
// Disabled and unmeasurable strips
// =============================================================

#[test]
fn empty_strip_is_disabled() {
    let mut carousel = started(800.0, &[]);
    assert!(carousel.is_disabled());
    assert_eq!(carousel.run_state(), RunState::Stopped);

    carousel.tick(16.0);
    carousel.navigate(Direction::Next, 20.0);
    assert_eq!(carousel.offset(), 0.0);
    assert!(!carousel.is_paused());
}

#[test]
fn zero_period_defers_to_next_tick() {
    let mut carousel = started(200.0, &[0.0, 0.0, 0.0]);
    assert_eq!(carousel.run_state(), RunState::Measuring);
    assert_eq!(carousel.period(), 0.0);

    // Images land before the next frame.
    carousel.surface_mut().widths = vec![100.0, 100.0, 100.0];
    carousel.tick(16.0);
    assert_eq!(carousel.run_state(), RunState::Running);
    assert_eq!(carousel.period(), 348.0);
    assert_eq!(carousel.strip().copies(), 2);
    assert_eq!(carousel.offset(), 0.0, "the measuring frame does not advance");

    carousel.tick(32.0);
    assert_eq!(carousel.offset(), 1.0);
}

#[test]
fn persistently_unmeasurable_strip_goes_static() {
    let config = CarouselConfig { max_measure_retries: 3, ..CarouselConfig::default() };
    let mut carousel = Carousel::new(surface(200.0, &[0.0, 0.0]), config);
    carousel.init();
    for frame in 1..=3 {
        carousel.tick(f64::from(frame) * 16.0);
    }
    assert_eq!(carousel.run_state(), RunState::Stopped);
    carousel.tick(100.0);
    assert_eq!(carousel.offset(), 0.0);
}

#[test]
fn resize_revives_static_strip() {
    let config = CarouselConfig { max_measure_retries: 1, ..CarouselConfig::default() };
    let mut carousel = Carousel::new(surface(200.0, &[0.0, 0.0]), config);
    carousel.init();
    carousel.tick(16.0);
    assert_eq!(carousel.run_state(), RunState::Stopped);

    carousel.surface_mut().widths = vec![150.0, 150.0];
    carousel.request_resize(20.0);
    carousel.tick(200.0);
    assert_eq!(carousel.run_state(), RunState::Running);
    assert_eq!(carousel.period(), 324.0);
}

// =============================================================
// Auto-scroll and wrap
// =============================================================

#[test]
fn offset_stays_within_period_every_tick() {
    let config = CarouselConfig { speed: 7.3, ..CarouselConfig::default() };
    let mut carousel = Carousel::new(surface(640.0, &[180.0, 260.0, 90.0]), config);
    carousel.init();
    let period = carousel.period();
    assert!(period > 0.0);
    for frame in 0..2000 {
        carousel.tick(f64::from(frame) * 16.0);
        let offset = carousel.offset();
        assert!((0.0..period).contains(&offset), "frame {frame}: offset {offset} outside [0, {period})");
    }
}

#[test]
fn speed_larger_than_period_still_wraps() {
    let config = CarouselConfig { speed: 1000.0, ..CarouselConfig::default() };
    let mut carousel = Carousel::new(surface(200.0, &[100.0, 100.0, 100.0]), config);
    carousel.init();
    carousel.tick(16.0);
    assert_eq!(carousel.offset(), 1000.0 % 348.0);
}

#[test]
fn tick_crossing_period_wraps_to_start() {
    let config = CarouselConfig { speed: 100.0, ..CarouselConfig::default() };
    let mut carousel = Carousel::new(surface(200.0, &[100.0, 100.0, 100.0]), config);
    carousel.init();
    for frame in 1..=4 {
        carousel.tick(f64::from(frame) * 16.0);
    }
    assert_eq!(carousel.offset(), 400.0 - 348.0);
}

// =============================================================
// Navigation and pause/resume
// =============================================================

#[test]
fn next_snaps_to_nearest_item_center() {
    let mut carousel = three_items();
    // Viewport centre 100 + step 124 = 224, nearest centre 174.
    carousel.navigate(Direction::Next, 0.0);
    assert_eq!(carousel.offset(), 74.0);
    assert_eq!(carousel.surface().offset, 74.0);
}

#[test]
fn next_snaps_to_rendered_center_when_layout_differs() {
    // Stylesheet gap of 40 instead of the nominal 24.
    let mut fake = surface(200.0, &[100.0, 100.0, 100.0]);
    fake.gap = 40.0;
    fake.rendered_edges = true;
    fake.rendered_centers = Some((0..9).map(|i| 50.0 + f64::from(i) * 140.0).collect());
    let mut carousel = Carousel::new(fake, CarouselConfig::default());
    carousel.init();
    assert_eq!(carousel.period(), 420.0);

    // Centre 100 + step 124 = 224, nearest rendered centre 190.
    carousel.navigate(Direction::Next, 0.0);
    assert_eq!(carousel.offset(), 90.0);
}

#[test]
fn empty_rendered_centers_fall_back_to_model() {
    let mut fake = surface(200.0, &[100.0, 100.0, 100.0]);
    fake.rendered_centers = Some(Vec::new());
    let mut carousel = Carousel::new(fake, CarouselConfig::default());
    carousel.init();
    carousel.navigate(Direction::Next, 0.0);
    assert_eq!(carousel.offset(), 74.0);
}

#[test]
fn prev_from_start_wraps_backwards() {
    let mut carousel = three_items();
    // Viewport centre 100 - 124 = -24, nearest centre 50, offset -50 folds to 298.
    carousel.navigate(Direction::Prev, 0.0);
    assert_eq!(carousel.offset(), 298.0);
}

#[test]
fn navigation_result_is_always_wrapped() {
    let mut carousel = started(900.0, &[310.0, 220.0, 410.0, 150.0]);
    let period = carousel.period();
    for i in 0..40 {
        let direction = if i % 3 == 0 { Direction::Prev } else { Direction::Next };
        carousel.navigate(direction, f64::from(i));
        assert!((0.0..period).contains(&carousel.offset()));
    }
}

#[test]
fn navigation_pauses_immediately() {
    let mut carousel = three_items();
    carousel.navigate(Direction::Next, 1000.0);
    assert!(carousel.is_paused());
    assert_eq!(carousel.resume_deadline(), Some(5000.0));

    let before = carousel.offset();
    carousel.tick(1016.0);
    carousel.tick(1032.0);
    assert_eq!(carousel.offset(), before);
}

#[test]
fn resume_waits_for_quiet_delay_after_last_click() {
    let mut carousel = three_items();
    carousel.navigate(Direction::Next, 1000.0);
    carousel.navigate(Direction::Next, 3000.0);

    carousel.tick(5000.0);
    assert!(carousel.is_paused(), "first click's deadline must not fire");
    carousel.tick(6999.0);
    assert!(carousel.is_paused());

    let before = carousel.offset();
    carousel.tick(7000.0);
    assert!(!carousel.is_paused());
    assert_eq!(carousel.offset(), carousel.strip().wrap(before + 1.0));
}

#[test]
fn no_pause_without_navigation() {
    let mut carousel = three_items();
    for frame in 1..=10 {
        carousel.tick(f64::from(frame) * 16.0);
    }
    assert!(!carousel.is_paused());
    assert_eq!(carousel.resume_deadline(), None);
    assert_eq!(carousel.offset(), 10.0);
}

// =============================================================
// Grid mode
// =============================================================

#[test]
fn grid_freezes_offset_and_ignores_ticks() {
    let mut carousel = three_items();
    for frame in 1..=5 {
        carousel.tick(f64::from(frame) * 16.0);
    }
    carousel.toggle_grid();
    assert_eq!(carousel.mode(), Mode::Grid);
    assert!(carousel.surface().grid);

    let writes = carousel.surface().offset_writes;
    for frame in 6..=50 {
        carousel.tick(f64::from(frame) * 16.0);
    }
    assert_eq!(carousel.offset(), 5.0);
    assert_eq!(carousel.surface().offset_writes, writes);
}

#[test]
fn grid_ignores_navigation() {
    let mut carousel = three_items();
    carousel.toggle_grid();
    carousel.navigate(Direction::Next, 0.0);
    assert_eq!(carousel.offset(), 0.0);
    assert!(!carousel.is_paused());
}

#[test]
fn leaving_grid_resets_offset_and_remeasures() {
    let mut carousel = three_items();
    for frame in 1..=20 {
        carousel.tick(f64::from(frame) * 16.0);
    }
    carousel.toggle_grid();
    carousel.surface_mut().widths = vec![120.0, 120.0, 120.0];

    carousel.toggle_grid();
    assert_eq!(carousel.mode(), Mode::Scrolling);
    assert!(!carousel.surface().grid);
    assert_eq!(carousel.offset(), 0.0);
    assert_eq!(carousel.surface().offset, 0.0);
    assert_eq!(carousel.period(), 360.0 + 48.0);
    assert_eq!(carousel.run_state(), RunState::Running);
}

#[test]
fn leaving_grid_clears_pause() {
    let mut carousel = three_items();
    carousel.navigate(Direction::Next, 0.0);
    carousel.toggle_grid();
    carousel.toggle_grid();
    assert!(!carousel.is_paused());
    assert_eq!(carousel.resume_deadline(), None);
    carousel.tick(16.0);
    assert_eq!(carousel.offset(), 1.0);
}

// =============================================================
// Resize
// =============================================================

#[test]
fn resize_is_debounced() {
    let mut carousel = three_items();
    for frame in 1..=10 {
        carousel.tick(f64::from(frame) * 16.0);
    }
    carousel.request_resize(200.0);
    carousel.request_resize(300.0);

    carousel.tick(400.0);
    assert_eq!(carousel.offset(), 11.0, "still inside the quiet window");

    carousel.tick(450.0);
    assert_eq!(carousel.offset(), 0.0);
    assert_eq!(carousel.run_state(), RunState::Running);
}

#[test]
fn resize_rewidens_for_larger_viewport() {
    let mut carousel = three_items();
    assert_eq!(carousel.strip().copies(), 2);

    carousel.surface_mut().viewport = 1200.0;
    carousel.request_resize(0.0);
    carousel.tick(150.0);

    assert!(carousel.strip().track_width() >= 1200.0 * 3.0 + 200.0);
    assert_eq!(carousel.surface().copies, carousel.strip().copies());
}

#[test]
fn resize_shrinks_copies_for_smaller_viewport() {
    let mut carousel = started(1200.0, &[100.0, 100.0, 100.0]);
    let wide = carousel.strip().copies();

    carousel.surface_mut().viewport = 200.0;
    carousel.request_resize(0.0);
    carousel.tick(150.0);
    assert!(carousel.strip().copies() < wide);
}

#[test]
fn resize_during_grid_waits_for_grid_exit() {
    let mut carousel = three_items();
    carousel.tick(16.0);
    carousel.toggle_grid();
    carousel.surface_mut().viewport = 1200.0;
    carousel.request_resize(20.0);
    carousel.tick(500.0);
    assert_eq!(carousel.offset(), 1.0);
    assert_eq!(carousel.strip().copies(), 2);

    carousel.toggle_grid();
    assert!(carousel.strip().track_width() >= 1200.0 * 3.0 + 200.0);
}

#[test]
fn independent_carousels_do_not_share_state() {
    let mut a = three_items();
    let mut b = three_items();
    a.navigate(Direction::Next, 0.0);
    b.tick(16.0);
    assert!(a.is_paused());
    assert!(!b.is_paused());
    assert_eq!(b.offset(), 1.0);
}
