//! DOM binding for [`crate::carousel`]: clones slides into the track,
//! scrolls it, and forwards buttons, the grid toggle and window resizes.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::{animation_loop, elements, listen, now_ms, toggle_class};
use crate::carousel::{Carousel, CarouselConfig, Direction, Mode, TrackSurface};

const ROOT_SELECTOR: &str = "[data-carousel], #ia-carousel";
const FOCUSABLE: &str = "a[href], button, input, select, textarea, [tabindex]";
const GRID_CLASS: &str = "is-grid";

/// A carousel track as rendered in the page.
pub struct DomTrack {
    root: Element,
    track: HtmlElement,
    originals: Vec<Element>,
    clones: Vec<Element>,
}

impl DomTrack {
    fn new(root: Element, track: HtmlElement, originals: Vec<Element>) -> Self {
        Self { root, track, originals, clones: Vec::new() }
    }

    fn make_clone(&self, source: &Element) -> Option<Element> {
        let node = match source.clone_node_with_deep(true) {
            Ok(node) => node,
            Err(err) => {
                log::warn!("carousel: clone failed: {err:?}");
                return None;
            }
        };
        let copy = node.dyn_into::<Element>().ok()?;
        mark_decorative(&copy);
        Some(copy)
    }
}

/// Hide a copy from assistive technology and the tab order.
fn mark_decorative(el: &Element) {
    if let Err(err) = el.remove_attribute("id") {
        log::warn!("carousel: drop id: {err:?}");
    }
    for (name, value) in [("aria-hidden", "true"), ("inert", "")] {
        if let Err(err) = el.set_attribute(name, value) {
            log::warn!("carousel: set {name}: {err:?}");
        }
    }
    for focusable in elements(el.query_selector_all(FOCUSABLE)) {
        if let Err(err) = focusable.set_attribute("tabindex", "-1") {
            log::warn!("carousel: set tabindex: {err:?}");
        }
    }
}

impl TrackSurface for DomTrack {
    fn viewport_width(&self) -> f64 {
        match self.track.client_width() {
            0 => f64::from(self.root.client_width()),
            width => f64::from(width),
        }
    }

    fn item_widths(&self) -> Vec<f64> {
        self.originals
            .iter()
            .map(|el| el.get_bounding_client_rect().width())
            .collect()
    }

    fn clone_edge_distance(&self) -> Option<f64> {
        let first = self.originals.first()?;
        let copy = self.clones.first()?;
        let distance = copy.get_bounding_client_rect().left() - first.get_bounding_client_rect().left();
        (distance > 0.0).then_some(distance)
    }

    fn item_centers(&self) -> Option<Vec<f64>> {
        // Client rects move with scrolling; add the scroll back to get track
        // coordinates.
        let origin = self.track.get_bounding_client_rect().left() - f64::from(self.track.scroll_left());
        let centers: Vec<f64> = self
            .originals
            .iter()
            .chain(&self.clones)
            .map(|el| {
                let rect = el.get_bounding_client_rect();
                rect.left() + rect.width() / 2.0 - origin
            })
            .collect();
        (!centers.is_empty()).then_some(centers)
    }

    fn sync_copies(&mut self, copies: usize) {
        let wanted = copies * self.originals.len();
        while self.clones.len() > wanted {
            if let Some(extra) = self.clones.pop() {
                extra.remove();
            }
        }
        while self.clones.len() < wanted {
            let source = &self.originals[self.clones.len() % self.originals.len()];
            let Some(copy) = self.make_clone(source) else {
                return;
            };
            if let Err(err) = self.track.append_child(&copy) {
                log::warn!("carousel: append clone: {err:?}");
                return;
            }
            self.clones.push(copy);
        }
    }

    fn set_offset(&mut self, offset: f64) {
        self.track.scroll_to_with_x_and_y(offset, 0.0);
    }

    fn set_grid(&mut self, grid: bool) {
        toggle_class(&self.root, GRID_CLASS, grid);
    }
}

/// Bind every carousel root on the page.
pub(super) fn install(document: &Document) {
    for root in elements(document.query_selector_all(ROOT_SELECTOR)) {
        install_one(document, root);
    }
}

fn install_one(document: &Document, root: Element) {
    let Some(track) = root
        .query_selector(".carousel-track")
        .unwrap_or_default()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        log::debug!("carousel: root without track, skipped");
        return;
    };
    if let Err(err) = track.style().set_property("scroll-behavior", "auto") {
        log::warn!("carousel: scroll-behavior: {err:?}");
    }

    let originals = elements(root.query_selector_all(".carousel-slide"));
    let prev = root.query_selector(".carousel-btn.prev").unwrap_or_default();
    let next = root.query_selector(".carousel-btn.next").unwrap_or_default();
    let grid_toggle = root
        .closest("section")
        .unwrap_or_default()
        .and_then(|section| section.query_selector("[data-carousel-grid-toggle]").unwrap_or_default());

    let surface = DomTrack::new(root, track, originals);
    let carousel = Rc::new(RefCell::new(Carousel::new(surface, CarouselConfig::default())));

    for (button, direction) in [(prev, Direction::Prev), (next, Direction::Next)] {
        let Some(button) = button else { continue };
        let carousel = Rc::clone(&carousel);
        listen(&button, "click", move |_| {
            carousel.borrow_mut().navigate(direction, now_ms());
        });
    }

    if let Some(toggle) = grid_toggle {
        let carousel = Rc::clone(&carousel);
        let toggle_for_cb = toggle.clone();
        listen(&toggle, "click", move |_| {
            let mut carousel = carousel.borrow_mut();
            carousel.toggle_grid();
            let pressed = if carousel.mode() == Mode::Grid { "true" } else { "false" };
            if let Err(err) = toggle_for_cb.set_attribute("aria-pressed", pressed) {
                log::warn!("carousel: aria-pressed: {err:?}");
            }
        });
    }

    let Some(window) = web_sys::window() else {
        return;
    };
    {
        let carousel = Rc::clone(&carousel);
        listen(&window, "resize", move |_| {
            carousel.borrow_mut().request_resize(now_ms());
        });
    }

    let start = move || {
        carousel.borrow_mut().init();
        let carousel = Rc::clone(&carousel);
        animation_loop(move |ts| {
            carousel.borrow_mut().tick(ts);
            true
        });
    };

    // Slide widths depend on images and fonts, so wait for full load.
    if document.ready_state() == "complete" {
        start();
    } else {
        let mut start = Some(start);
        listen(&window, "load", move |_| {
            if let Some(start) = start.take() {
                start();
            }
        });
    }
}
