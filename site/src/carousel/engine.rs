//! Per-strip carousel state machine.
//!
//! Run state (`Stopped`, `Measuring`, `Running`) is crossed with a playback
//! [`Mode`] (`Scrolling`, `Grid`) and an orthogonal `paused` flag owned by the
//! [`ResumeTimer`]. Two event sources drive it: the per-frame [`Carousel::tick`]
//! and discrete user actions ([`Carousel::navigate`], [`Carousel::toggle_grid`],
//! [`Carousel::request_resize`]). Only navigation pauses; hover, focus and
//! user scrolling never do.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use super::TrackSurface;
use super::strip::{Strip, nearest};
use super::timer::{Debounce, ResumeTimer};
use crate::consts::{
    GAP_PX, MAX_MEASURE_RETRIES, MIN_PERIOD_PX, RESIZE_DEBOUNCE_MS, RESUME_DELAY_MS, SPEED_PX_PER_FRAME,
    WIDEN_FACTOR, WIDEN_MARGIN_PX,
};

/// Tunables for one carousel instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    pub gap: f64,
    pub speed: f64,
    pub widen_factor: f64,
    pub widen_margin: f64,
    pub min_period: f64,
    pub max_measure_retries: u32,
    pub resume_delay_ms: f64,
    pub resize_debounce_ms: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            gap: GAP_PX,
            speed: SPEED_PX_PER_FRAME,
            widen_factor: WIDEN_FACTOR,
            widen_margin: WIDEN_MARGIN_PX,
            min_period: MIN_PERIOD_PX,
            max_measure_retries: MAX_MEASURE_RETRIES,
            resume_delay_ms: RESUME_DELAY_MS,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
        }
    }
}

/// Whether the tick loop is doing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Not initialised, disabled (no items) or given up on measurement.
    #[default]
    Stopped,
    /// Period not measurable yet; each tick retries.
    Measuring,
    /// Period known; ticks advance the offset.
    Running,
}

/// Playback layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Scrolling,
    /// Static grid: offset frozen, ticks are no-ops.
    Grid,
}

/// Manual navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Prev => -1.0,
            Self::Next => 1.0,
        }
    }
}

/// One carousel instance and the surface it drives.
pub struct Carousel<S> {
    surface: S,
    config: CarouselConfig,
    strip: Strip,
    viewport: f64,
    mode: Mode,
    run: RunState,
    timer: ResumeTimer,
    resize: Debounce,
    measure_attempts: u32,
}

impl<S: TrackSurface> Carousel<S> {
    /// Wrap a surface. Nothing is measured until [`Carousel::init`].
    #[must_use]
    pub fn new(surface: S, config: CarouselConfig) -> Self {
        Self {
            strip: Strip::new(Vec::new(), config.gap),
            resize: Debounce::new(config.resize_debounce_ms),
            surface,
            config,
            viewport: 0.0,
            mode: Mode::Scrolling,
            run: RunState::Stopped,
            timer: ResumeTimer::default(),
            measure_attempts: 0,
        }
    }

    /// Widen the track, measure the period and start running. Safe to call
    /// again; each call begins a fresh sizing epoch.
    pub fn init(&mut self) {
        self.restart();
    }

    // --- Event inputs ---

    /// Advance one display frame at host time `now` (milliseconds).
    pub fn tick(&mut self, now: f64) {
        if self.timer.poll(now) {
            log::debug!("carousel: auto-play resumed");
        }
        if self.resize.fire(now) && self.mode == Mode::Scrolling {
            log::debug!("carousel: reconciling resize");
            self.restart();
            return;
        }

        match self.run {
            RunState::Stopped => {}
            RunState::Measuring => self.retry_measure(),
            RunState::Running => {
                if self.mode == Mode::Scrolling && !self.timer.is_paused() {
                    self.set_offset(self.strip.offset + self.config.speed);
                }
            }
        }
    }

    /// Step one item left or right, snapping to the nearest rendered item
    /// centre (model centres when the surface has no layout), then
    /// pause auto-play and schedule it to resume after the configured delay.
    /// Ignored in grid mode and on a disabled strip.
    pub fn navigate(&mut self, direction: Direction, now: f64) {
        if self.mode == Mode::Grid || self.strip.is_empty() {
            return;
        }
        self.timer.pause();
        self.timer.resume_after(now, self.config.resume_delay_ms);

        if self.strip.period <= 0.0 {
            return;
        }
        let Some(first_width) = self.strip.first_width() else {
            return;
        };
        let half_viewport = self.viewport / 2.0;
        let step = first_width + self.config.gap;
        let target_center = self.strip.offset + half_viewport + direction.sign() * step;
        // Rendered positions win; the model only knows the nominal gap.
        let centers = self
            .surface
            .item_centers()
            .filter(|centers| !centers.is_empty())
            .unwrap_or_else(|| self.strip.slot_centers());
        if let Some(center) = nearest(&centers, target_center) {
            self.set_offset(center - half_viewport);
        }
    }

    /// Flip between scrolling and grid layout.
    ///
    /// Entering grid freezes the offset. Leaving grid starts a fresh sizing
    /// epoch (offset back to zero, period remeasured) and clears any pause.
    pub fn toggle_grid(&mut self) {
        match self.mode {
            Mode::Scrolling => {
                self.mode = Mode::Grid;
                self.surface.set_grid(true);
                log::debug!("carousel: grid mode");
            }
            Mode::Grid => {
                self.mode = Mode::Scrolling;
                self.surface.set_grid(false);
                self.timer.clear();
                self.restart();
                log::debug!("carousel: scrolling mode");
            }
        }
    }

    /// Note a viewport resize. Reconciliation happens on the first tick after
    /// the debounce window has been quiet. Resizes while in grid are picked
    /// up when grid is left.
    pub fn request_resize(&mut self, now: f64) {
        self.resize.trigger(now);
    }

    // --- Queries ---

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.strip.offset
    }

    #[must_use]
    pub fn period(&self) -> f64 {
        self.strip.period
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.run
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.timer.is_paused()
    }

    /// Pending auto-resume deadline, if any.
    #[must_use]
    pub fn resume_deadline(&self) -> Option<f64> {
        self.timer.deadline()
    }

    /// A strip with no items never runs.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.strip.is_empty()
    }

    #[must_use]
    pub fn strip(&self) -> &Strip {
        &self.strip
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // --- Internals ---

    /// Stop, rewind, re-read the layout, re-widen, remeasure, restart.
    fn restart(&mut self) {
        self.run = RunState::Stopped;
        self.measure_attempts = 0;
        self.viewport = self.surface.viewport_width();
        self.strip.reset(self.surface.item_widths());
        self.surface.set_offset(0.0);

        if self.strip.is_empty() {
            self.surface.sync_copies(0);
            log::debug!("carousel: no items, disabled");
            return;
        }

        self.strip
            .widen(self.viewport, self.config.widen_factor, self.config.widen_margin);
        self.surface.sync_copies(self.strip.copies());

        self.run = if self.measure() { RunState::Running } else { RunState::Measuring };
        log::debug!(
            "carousel: epoch viewport={} copies={} period={} state={:?}",
            self.viewport,
            self.strip.copies(),
            self.strip.period,
            self.run
        );
    }

    /// Measure the period, preferring rendered clone edges. Returns whether
    /// the result is usable.
    fn measure(&mut self) -> bool {
        if self.strip.items_width() <= 0.0 {
            self.strip.period = 0.0;
            return false;
        }
        let measured = if self.strip.copies() > 0 {
            self.surface
                .clone_edge_distance()
                .filter(|d| d.is_finite() && *d > 0.0)
                .unwrap_or_else(|| self.strip.fallback_period())
        } else {
            self.strip.fallback_period()
        };

        if measured >= self.config.min_period {
            self.strip.period = measured;
            true
        } else {
            self.strip.period = 0.0;
            false
        }
    }

    fn retry_measure(&mut self) {
        // Item widths may only now be known (images, fonts); re-read them.
        let widths = self.surface.item_widths();
        if self.strip.items_width() <= 0.0 && widths.iter().sum::<f64>() > 0.0 {
            self.strip.reset(widths);
            self.strip
                .widen(self.viewport, self.config.widen_factor, self.config.widen_margin);
            self.surface.sync_copies(self.strip.copies());
        }

        if self.measure() {
            self.run = RunState::Running;
            log::debug!("carousel: period measured on retry: {}", self.strip.period);
            return;
        }
        self.measure_attempts += 1;
        if self.measure_attempts >= self.config.max_measure_retries {
            self.run = RunState::Stopped;
            log::warn!("carousel: period unmeasurable, staying static until resize");
        }
    }

    fn set_offset(&mut self, offset: f64) {
        self.strip.offset = self.strip.wrap(offset);
        self.surface.set_offset(self.strip.offset);
    }
}
