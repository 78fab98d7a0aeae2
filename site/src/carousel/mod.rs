//! Infinite auto-scrolling carousel.
//!
//! A carousel root owns one [`Carousel`], which owns its [`TrackSurface`].
//! The surface is the only thing that knows about rendering; the engine sees
//! widths, a viewport and a scroll offset. Native tests drive the engine with
//! a fake surface and synthetic timestamps.
//!
//! | Module | Role |
//! |--------|------|
//! | [`strip`] | Extended item sequence, widening, period fallback, wrap arithmetic |
//! | [`timer`] | Deadline-based pause/resume and resize debounce |
//! | [`engine`] | The per-strip state machine |

pub mod engine;
pub mod strip;
pub mod timer;

pub use engine::{Carousel, CarouselConfig, Direction, Mode, RunState};
pub use strip::{Slot, Strip, nearest, wrap_offset};

/// Rendering side of a carousel, implemented by the DOM layer and by test fakes.
pub trait TrackSurface {
    /// Visible width of the track.
    fn viewport_width(&self) -> f64;

    /// Rendered widths of the original (non-decorative) items, in order.
    fn item_widths(&self) -> Vec<f64>;

    /// Distance between the left edge of the first original item and the left
    /// edge of the first decorative copy, when a copy is rendered and
    /// measurable.
    fn clone_edge_distance(&self) -> Option<f64>;

    /// Centres of every rendered slot, originals then copies, in track
    /// coordinates (offset 0 at the start of the track), when laid out.
    fn item_centers(&self) -> Option<Vec<f64>>;

    /// Make the rendered track hold exactly `copies` decorative copies of the
    /// original items, appended after them.
    fn sync_copies(&mut self, copies: usize);

    /// Scroll the track to `offset`.
    fn set_offset(&mut self, offset: f64);

    /// Switch between the scrolling strip and the static grid layout.
    fn set_grid(&mut self, grid: bool);
}
