//! Deadline-based timers.
//!
//! The engine never holds host timer handles. It stores deadlines on the
//! host clock (milliseconds) and checks them when the next tick arrives, so
//! rescheduling is a plain overwrite and nothing can leak.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

/// Pause flag with a single debounced auto-resume deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResumeTimer {
    paused: bool,
    deadline: Option<f64>,
}

impl ResumeTimer {
    /// Pause now and cancel any pending resume.
    pub fn pause(&mut self) {
        self.paused = true;
        self.deadline = None;
    }

    /// (Re)schedule the resume for `now + delay`. Last call wins.
    pub fn resume_after(&mut self, now: f64, delay: f64) {
        self.deadline = Some(now + delay);
    }

    /// Unpause immediately and drop the pending resume.
    pub fn clear(&mut self) {
        self.paused = false;
        self.deadline = None;
    }

    /// Fire the resume if its deadline has passed. Returns `true` when it fired.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pending resume deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }
}

/// Trailing-edge debounce: fires once, `delay` after the last trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Debounce {
    delay: f64,
    deadline: Option<f64>,
}

impl Debounce {
    #[must_use]
    pub fn new(delay: f64) -> Self {
        Self { delay, deadline: None }
    }

    pub fn trigger(&mut self, now: f64) {
        self.deadline = Some(now + self.delay);
    }

    /// Returns `true` exactly once per quiet window that has elapsed.
    pub fn fire(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
