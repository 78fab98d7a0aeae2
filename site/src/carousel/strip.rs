//! Strip geometry: the original items, their decorative copies, and the
//! arithmetic for widening, period fallback and wrap-around.
//!
//! Slots are laid out left to right with a fixed gap between every pair of
//! neighbours, the way a flex row with `gap` renders.

#[cfg(test)]
#[path = "strip_test.rs"]
mod strip_test;

/// One rendered position on the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Index into the original item sequence.
    pub source: usize,
    /// Decorative copies are hidden from assistive tech and not interactive.
    pub decorative: bool,
}

/// Fold `offset` into `[0, period)`. A non-positive period folds to zero.
#[must_use]
pub fn wrap_offset(offset: f64, period: f64) -> f64 {
    if period <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    let wrapped = offset.rem_euclid(period);
    // rem_euclid can round up to `period` for tiny negative inputs.
    if wrapped >= period { 0.0 } else { wrapped }
}

/// Items, copies and scroll state of one carousel instance.
#[derive(Debug, Clone)]
pub struct Strip {
    widths: Vec<f64>,
    gap: f64,
    slots: Vec<Slot>,
    /// Viewport width the current sizing epoch was widened for.
    widened_for: Option<f64>,
    pub period: f64,
    pub offset: f64,
}

impl Strip {
    #[must_use]
    pub fn new(widths: Vec<f64>, gap: f64) -> Self {
        let slots = originals(widths.len());
        Self { widths, gap, slots, widened_for: None, period: 0.0, offset: 0.0 }
    }

    /// Start a new sizing epoch: drop every copy, forget the widening and the
    /// period, rewind to the start.
    pub fn reset(&mut self, widths: Vec<f64>) {
        self.slots = originals(widths.len());
        self.widths = widths;
        self.widened_for = None;
        self.period = 0.0;
        self.offset = 0.0;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of full decorative copies appended after the originals.
    #[must_use]
    pub fn copies(&self) -> usize {
        match self.widths.len() {
            0 => 0,
            n => self.slots.len() / n - 1,
        }
    }

    /// Width of the first original item, if any.
    #[must_use]
    pub fn first_width(&self) -> Option<f64> {
        self.widths.first().copied()
    }

    /// Sum of the original item widths, gaps excluded.
    #[must_use]
    pub fn items_width(&self) -> f64 {
        self.widths.iter().sum()
    }

    /// Distance from one copy's first item to the next copy's first item.
    #[must_use]
    pub fn cycle_width(&self) -> f64 {
        self.items_width() + self.gap * count(self.widths.len())
    }

    /// Rendered width of the whole extended track.
    #[must_use]
    pub fn track_width(&self) -> f64 {
        if self.slots.is_empty() {
            return 0.0;
        }
        let items = self.slots.iter().map(|s| self.widths[s.source]).sum::<f64>();
        items + self.gap * count(self.slots.len() - 1)
    }

    /// Append whole copies of the originals until the track is at least
    /// `viewport * factor + margin` wide. Returns the number of copies added.
    ///
    /// Idempotent within a sizing epoch: repeating the call for the same
    /// viewport adds nothing. A wider viewport may grow the track further;
    /// nothing is ever removed before [`Strip::reset`].
    pub fn widen(&mut self, viewport: f64, factor: f64, margin: f64) -> usize {
        if self.widened_for == Some(viewport) {
            return 0;
        }
        self.widened_for = Some(viewport);
        // Unmeasured (zero-width) items would only ever grow the track by gaps.
        if self.is_empty() || self.items_width() <= 0.0 {
            return 0;
        }

        let target = viewport * factor + margin;
        let shortfall = target - self.track_width();
        if !shortfall.is_finite() || shortfall <= 0.0 {
            return 0;
        }
        let cycle = self.cycle_width();
        if cycle <= 0.0 {
            return 0;
        }
        // Each copy adds one full cycle: the items plus a gap before each.
        let mut added = copies_for(shortfall, cycle);
        self.append_copies(added);
        if self.track_width() < target {
            // Rounding in the summed width can land a hair short.
            self.append_copies(1);
            added += 1;
        }
        added
    }

    fn append_copies(&mut self, copies: usize) {
        let n = self.widths.len();
        self.slots
            .extend((0..copies * n).map(|i| Slot { source: i % n, decorative: true }));
    }

    /// Period estimate from item widths alone: every original plus the gaps
    /// between them, without a trailing gap.
    #[must_use]
    pub fn fallback_period(&self) -> f64 {
        match self.widths.len() {
            0 => 0.0,
            n => (self.items_width() + self.gap * count(n - 1)).max(0.0),
        }
    }

    /// Centre of every slot, left to right.
    #[must_use]
    pub fn slot_centers(&self) -> Vec<f64> {
        let mut left = 0.0;
        self.slots
            .iter()
            .map(|s| {
                let width = self.widths[s.source];
                let center = left + width / 2.0;
                left += width + self.gap;
                center
            })
            .collect()
    }

    /// Fold `value` into `[0, period)`.
    #[must_use]
    pub fn wrap(&self, value: f64) -> f64 {
        wrap_offset(value, self.period)
    }
}

/// The value in `centers` closest to `x`, ties resolved toward the left.
#[must_use]
pub fn nearest(centers: &[f64], x: f64) -> Option<f64> {
    centers
        .iter()
        .copied()
        .min_by(|a, b| (a - x).abs().total_cmp(&(b - x).abs()))
}

fn originals(len: usize) -> Vec<Slot> {
    (0..len).map(|source| Slot { source, decorative: false }).collect()
}

#[allow(clippy::cast_precision_loss)]
fn count(n: usize) -> f64 {
    n as f64
}

/// Whole cycles needed to cover `shortfall`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn copies_for(shortfall: f64, cycle: f64) -> usize {
    (shortfall / cycle).ceil() as usize
}
