//! Browser behaviors for the Levantiq marketing site.
//!
//! Every behavior is split in two: a pure state machine that can be driven by
//! synthetic ticks and events in native tests, and (behind the `hydrate`
//! feature) a thin DOM layer compiled to WebAssembly that feeds real browser
//! events into it and applies the results.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`carousel`] | Infinite auto-scrolling strip: duplication, period, wrap, navigation, grid mode |
//! | [`nav`] | Mobile navbar, dropdown menus, sticky header threshold |
//! | [`scroll`] | Anchor smooth-scroll target computation |
//! | [`counter`] | Eased number counters triggered once on visibility |
//! | [`contact`] | Contact form payload, honeypot, service prefill, feedback text |
//! | [`consts`] | Shared numeric constants |
//! | `dom` | WebAssembly bindings (`hydrate` feature only) |

pub mod carousel;
pub mod consts;
pub mod contact;
pub mod counter;
pub mod nav;
pub mod scroll;

#[cfg(feature = "hydrate")]
pub mod dom;
