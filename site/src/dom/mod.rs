//! WebAssembly entry point and shared DOM helpers.
//!
//! Each submodule looks up its own markup and silently does nothing when the
//! page does not carry it, so one bundle serves every page of the site.

mod carousel;
mod chrome;
mod contact;
mod counter;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Document, Element, EventTarget, NodeList};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    chrome::install(&document);
    contact::install(&document);
    counter::install(&document);
    carousel::install(&document);
}

/// Host clock in milliseconds, the same timeline as animation-frame stamps.
pub(crate) fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or_else(js_sys::Date::now, |p| p.now())
}

/// Attach a listener that lives for the rest of the page.
pub(crate) fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(web_sys::Event) + 'static,
{
    let cb = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    if let Err(err) = target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
        log::warn!("listen {event}: {err:?}");
    }
    cb.forget();
}

/// Elements of a `querySelectorAll` result, empty on a bad selector.
pub(crate) fn elements(list: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).unwrap_or_default()
}

pub(crate) fn query_as<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    query(document, selector).and_then(|el| el.dyn_into::<T>().ok())
}

/// The element an event landed on, if it was an element.
pub(crate) fn event_element(event: &web_sys::Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

pub(crate) fn toggle_class(el: &Element, class: &str, on: bool) {
    if let Err(err) = el.class_list().toggle_with_force(class, on) {
        log::warn!("toggle class {class}: {err:?}");
    }
}

/// Run `frame` on every animation frame until it returns `false`.
pub(crate) fn animation_loop<F>(mut frame: F)
where
    F: FnMut(f64) -> bool + 'static,
{
    let Some(window) = web_sys::window() else {
        return;
    };

    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let window_for_cb = window.clone();
    let cb = Closure::<dyn FnMut(f64)>::new(move |ts: f64| {
        if !frame(ts) {
            holder_for_cb.borrow_mut().take();
            return;
        }
        if let Some(cb) = holder_for_cb.borrow().as_ref() {
            if let Err(err) = window_for_cb.request_animation_frame(cb.as_ref().unchecked_ref()) {
                log::warn!("animation frame: {err:?}");
            }
        }
    });

    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(_) => *holder.borrow_mut() = Some(cb),
        Err(err) => log::warn!("animation frame: {err:?}"),
    }
}
