//! Animated number counters.
//!
//! Each `.counter` counts from zero up to its `data-target` with an ease-out
//! cubic curve. All counters on the page start together, once, the first
//! time their section becomes visible enough.

#[cfg(test)]
#[path = "counter_test.rs"]
mod counter_test;

use crate::consts::COUNTER_DURATION_MS;

#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Leading integer of an attribute value, `0` when there is none
/// (`"12%"` → 12, `"abc"` → 0).
#[must_use]
pub fn parse_target(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(i, _)| i);
    digits[..end].parse::<i64>().map_or(0, |n| sign * n)
}

/// One counter's configuration, read from its data attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    pub to: i64,
    pub prefix: String,
    pub suffix: String,
    pub duration_ms: f64,
}

impl Counter {
    #[must_use]
    pub fn from_attrs(target: Option<&str>, prefix: Option<&str>, suffix: Option<&str>) -> Self {
        Self {
            to: target.map_or(0, parse_target),
            prefix: prefix.unwrap_or_default().to_owned(),
            suffix: suffix.unwrap_or_default().to_owned(),
            duration_ms: COUNTER_DURATION_MS,
        }
    }

    /// Progress in `[0, 1]` after `elapsed_ms`.
    #[must_use]
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Displayed value after `elapsed_ms`.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn value_at(&self, elapsed_ms: f64) -> i64 {
        (self.to as f64 * ease_out_cubic(self.progress(elapsed_ms))).round() as i64
    }

    #[must_use]
    pub fn render(&self, value: i64) -> String {
        format!("{}{value}{}", self.prefix, self.suffix)
    }

    #[must_use]
    pub fn text_at(&self, elapsed_ms: f64) -> String {
        self.render(self.value_at(elapsed_ms))
    }

    /// Final text, shown immediately when the user prefers reduced motion.
    #[must_use]
    pub fn final_text(&self) -> String {
        self.render(self.to)
    }

    #[must_use]
    pub fn is_done(&self, elapsed_ms: f64) -> bool {
        self.progress(elapsed_ms) >= 1.0
    }
}

/// Fires once, on the first intersecting observation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OnceTrigger {
    fired: bool,
}

impl OnceTrigger {
    /// Returns `true` only for the first observation that is intersecting.
    pub fn observe(&mut self, intersecting: bool) -> bool {
        if self.fired || !intersecting {
            return false;
        }
        self.fired = true;
        true
    }

    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
