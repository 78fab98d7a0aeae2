//! Smooth anchor scrolling that accounts for the fixed header.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

use crate::consts::ANCHOR_EXTRA_OFFSET_PX;

/// The in-page fragment of a link's `href`, if it should be smooth-scrolled.
/// A bare `#` is left to the browser.
#[must_use]
pub fn anchor_fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty()).map(|_| href)
}

/// Document scroll position that puts a target just under the fixed header.
///
/// `target_top` is the target's viewport-relative top edge, `page_y` the
/// current document scroll offset.
#[must_use]
pub fn anchor_scroll_top(target_top: f64, page_y: f64, header_height: f64) -> f64 {
    target_top + page_y - header_height - ANCHOR_EXTRA_OFFSET_PX
}
