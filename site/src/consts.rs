//! Shared numeric constants for the site crate.

// ── Carousel ────────────────────────────────────────────────────

/// Inter-item gap of the carousel track, matching the stylesheet.
pub const GAP_PX: f64 = 24.0;

/// Auto-scroll advance per display frame.
pub const SPEED_PX_PER_FRAME: f64 = 1.0;

/// Track must cover at least `viewport * WIDEN_FACTOR + WIDEN_MARGIN_PX`.
pub const WIDEN_FACTOR: f64 = 3.0;

/// Extra width added on top of the viewport multiple when widening.
pub const WIDEN_MARGIN_PX: f64 = 200.0;

/// Periods below this are treated as "layout not ready yet".
pub const MIN_PERIOD_PX: f64 = 10.0;

/// Frames spent retrying an unmeasurable period before giving up until resize.
pub const MAX_MEASURE_RETRIES: u32 = 60;

/// Auto-play resumes this long after the last navigation click.
pub const RESUME_DELAY_MS: f64 = 4000.0;

/// Quiet window before a burst of resize events is reconciled.
pub const RESIZE_DEBOUNCE_MS: f64 = 150.0;

// ── Page chrome ─────────────────────────────────────────────────

/// Scroll depth at which the header turns sticky and go-top appears.
pub const HEADER_ACTIVE_SCROLL_Y: f64 = 400.0;

/// Breathing room left above an anchor target under the fixed header.
pub const ANCHOR_EXTRA_OFFSET_PX: f64 = 16.0;

// ── Counters ────────────────────────────────────────────────────

pub const COUNTER_DURATION_MS: f64 = 1300.0;

/// Fraction of the counters section that must be visible to start.
pub const COUNTER_VISIBILITY_THRESHOLD: f64 = 0.35;
