//! Starts the page counters once their section scrolls into view.

use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::{animation_loop, elements, now_ms, query};
use crate::consts::COUNTER_VISIBILITY_THRESHOLD;
use crate::counter::{Counter, OnceTrigger};

const SECTION_SELECTOR: &str = "#about-ia";
const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

pub(super) fn install(document: &Document) {
    let counters = elements(document.query_selector_all(".counter"));
    if counters.is_empty() {
        return;
    }
    let Some(section) = query(document, SECTION_SELECTOR).or_else(|| document.document_element()) else {
        return;
    };
    let reduced_motion = prefers_reduced_motion();

    let mut trigger = OnceTrigger::default();
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let intersecting = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .any(|entry| entry.is_intersecting());
            if !trigger.observe(intersecting) {
                return;
            }
            observer.disconnect();
            for el in &counters {
                run(el.clone(), reduced_motion);
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(COUNTER_VISIBILITY_THRESHOLD));
    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            observer.observe(&section);
            callback.forget();
        }
        Err(err) => log::warn!("counters: observer unavailable: {err:?}"),
    }
}

fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media(REDUCED_MOTION_QUERY).unwrap_or_default())
        .is_some_and(|list| list.matches())
}

fn run(el: Element, reduced_motion: bool) {
    let counter = Counter::from_attrs(
        el.get_attribute("data-target").as_deref(),
        el.get_attribute("data-prefix").as_deref(),
        el.get_attribute("data-suffix").as_deref(),
    );
    if reduced_motion {
        el.set_text_content(Some(&counter.final_text()));
        return;
    }

    let started = now_ms();
    animation_loop(move |ts| {
        let elapsed = ts - started;
        el.set_text_content(Some(&counter.text_at(elapsed)));
        !counter.is_done(elapsed)
    });
}
