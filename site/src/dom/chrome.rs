//! Navbar drawer, dropdowns, sticky header and anchor smooth scroll.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, ScrollBehavior, ScrollToOptions};

use super::{elements, event_element, listen, query, query_as, toggle_class};
use crate::nav::{Dropdowns, NavEvent, NavMenu, header_active};
use crate::scroll::{anchor_fragment, anchor_scroll_top};

const ACTIVE_CLASS: &str = "active";
const OPEN_CLASS: &str = "open";

pub(super) fn install(document: &Document) {
    install_navbar(document);
    install_sticky_header(document);
    install_dropdowns(document);
    install_anchor_scroll(document);
}

fn install_navbar(document: &Document) {
    let (Some(navbar), Some(overlay)) = (query(document, "[data-navbar]"), query(document, "[data-overlay]")) else {
        return;
    };
    let mut bindings: Vec<(Element, NavEvent)> = vec![(overlay.clone(), NavEvent::OverlayClicked)];
    if let Some(open) = query(document, "[data-nav-open-btn]") {
        bindings.push((open, NavEvent::OpenClicked));
    }
    if let Some(close) = query(document, "[data-nav-close-btn]") {
        bindings.push((close, NavEvent::CloseClicked));
    }
    for link in elements(document.query_selector_all("[data-navbar-link]")) {
        bindings.push((link, NavEvent::LinkClicked));
    }

    let menu = RefCell::new(NavMenu::default());
    let apply = Rc::new(move |event: NavEvent| {
        let mut menu = menu.borrow_mut();
        if menu.apply(event) {
            toggle_class(&navbar, ACTIVE_CLASS, menu.is_open());
            toggle_class(&overlay, ACTIVE_CLASS, menu.is_open());
        }
    });

    for (el, event) in bindings {
        let apply = Rc::clone(&apply);
        listen(&el, "click", move |_| apply(event));
    }

    if let Some(window) = web_sys::window() {
        listen(&window, "keydown", move |event| {
            let escape = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|key| key.key() == "Escape");
            if escape {
                apply(NavEvent::Escape);
            }
        });
    }
}

fn install_sticky_header(document: &Document) {
    let header = query(document, "[data-header]");
    let go_top = query(document, "[data-go-top]");
    if header.is_none() && go_top.is_none() {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let window_for_cb = window.clone();
    listen(&window, "scroll", move |_| {
        let active = header_active(window_for_cb.scroll_y().unwrap_or_default());
        for el in header.iter().chain(go_top.iter()) {
            toggle_class(el, ACTIVE_CLASS, active);
        }
    });
}

fn install_dropdowns(document: &Document) {
    let items = Rc::new(elements(document.query_selector_all(".navbar .has-dropdown")));
    if items.is_empty() {
        return;
    }
    let state = Rc::new(RefCell::new(Dropdowns::default()));

    let render = {
        let items = Rc::clone(&items);
        move |state: &Dropdowns| {
            for (i, li) in items.iter().enumerate() {
                toggle_class(li, OPEN_CLASS, state.is_open(i));
            }
        }
    };
    let render = Rc::new(render);

    for toggle in elements(document.query_selector_all(".navbar .dropdown-toggle")) {
        let Some(li) = toggle.closest(".has-dropdown").unwrap_or_default() else {
            continue;
        };
        let Some(index) = items.iter().position(|item| *item == li) else {
            continue;
        };
        let state = Rc::clone(&state);
        let render = Rc::clone(&render);
        listen(&toggle, "click", move |event| {
            event.prevent_default();
            let mut state = state.borrow_mut();
            state.toggle(index);
            render(&state);
        });
    }

    for link in elements(document.query_selector_all(".navbar .dropdown .dropdown-link")) {
        let state = Rc::clone(&state);
        let render = Rc::clone(&render);
        listen(&link, "click", move |_| {
            let mut state = state.borrow_mut();
            state.close_all();
            render(&state);
        });
    }

    listen(document, "click", move |event| {
        let inside = event_element(&event)
            .and_then(|el| el.closest(".navbar .has-dropdown").unwrap_or_default())
            .is_some();
        let mut state = state.borrow_mut();
        state.on_document_click(inside);
        render(&state);
    });
}

fn install_anchor_scroll(document: &Document) {
    let header = query_as::<HtmlElement>(document, "[data-header]");
    let document_for_cb = document.clone();
    listen(document, "click", move |event| {
        let Some(link) = event_element(&event).and_then(|el| el.closest("a[href^=\"#\"]").unwrap_or_default()) else {
            return;
        };
        let Some(href) = link.get_attribute("href") else {
            return;
        };
        let Some(selector) = anchor_fragment(&href) else {
            return;
        };
        let Some(target) = query(&document_for_cb, selector) else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };

        event.prevent_default();
        let header_height = header.as_ref().map_or(0.0, |h| f64::from(h.offset_height()));
        let top = anchor_scroll_top(
            target.get_bounding_client_rect().top(),
            window.page_y_offset().unwrap_or_default(),
            header_height,
        );
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    });
}
