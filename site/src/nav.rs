//! Navigation chrome: the mobile navbar drawer, dropdown menus and the
//! sticky-header threshold.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::consts::HEADER_ACTIVE_SCROLL_Y;

/// User actions that affect the navbar drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    OpenClicked,
    CloseClicked,
    OverlayClicked,
    LinkClicked,
    /// The `Escape` key anywhere on the page.
    Escape,
}

/// Open/closed state of the navbar drawer and its overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    /// Apply an event. Returns `true` when the open state changed.
    pub fn apply(&mut self, event: NavEvent) -> bool {
        let next = matches!(event, NavEvent::OpenClicked);
        let changed = self.open != next;
        self.open = next;
        changed
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// Whether the header should be in its sticky style (and the go-top button
/// visible) at the given vertical scroll position.
#[must_use]
pub fn header_active(scroll_y: f64) -> bool {
    scroll_y >= HEADER_ACTIVE_SCROLL_Y
}

/// At most one open dropdown among the navbar's `.has-dropdown` items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dropdowns {
    open: Option<usize>,
}

impl Dropdowns {
    /// Toggle dropdown `index`, closing any other.
    pub fn toggle(&mut self, index: usize) {
        self.open = if self.open == Some(index) { None } else { Some(index) };
    }

    pub fn close_all(&mut self) {
        self.open = None;
    }

    /// A document click closes everything unless it landed inside a dropdown.
    pub fn on_document_click(&mut self, inside_dropdown: bool) {
        if !inside_dropdown {
            self.close_all();
        }
    }

    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    #[must_use]
    pub fn open_index(&self) -> Option<usize> {
        self.open
    }
}
