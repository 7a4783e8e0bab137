use crate::error::Result;
use crate::geometry::{ChromeLayout, Point, Span, ViewportMetrics};
use crate::registry::SlotId;
use crate::timers::Millis;
use crate::transform::ZoomPan;

/// The document a viewer is embedded in.
///
/// The viewer only ever talks to its page region, a handful of labels and
/// the viewport through this trait. Image load and error completions are
/// not returned from here: the host reports them later through
/// [`crate::InputEvent::ImageSettled`] with the [`SlotId`] it was given.
pub trait PageHost {
    /// Handle to one page image owned by the host.
    type Image;

    /// Current time on the host's clock.
    fn now_ms(&self) -> Millis;

    /// Create a detached page image and start fetching `src`.
    fn create_image(&mut self, slot: SlotId, index: usize, src: &str, alt: &str)
        -> Result<Self::Image>;

    /// Insert after every attached image.
    fn append_image(&mut self, image: &Self::Image);

    /// Insert before every attached image.
    fn prepend_image(&mut self, image: &Self::Image);

    /// Remove every image from the page region.
    fn clear_images(&mut self);

    /// Give a failed image its degraded look and replacement alt text.
    fn mark_failed(&mut self, image: &Self::Image, alt: &str);

    /// Vertical extent of an attached image in document coordinates.
    fn image_span(&self, image: &Self::Image) -> Span;

    fn apply_transform(&mut self, transform: &ZoomPan);

    /// Warm the cache for `src` without attaching anything.
    fn prefetch(&mut self, src: &str);

    fn scroll_top(&self) -> f64;
    fn viewport_height(&self) -> f64;
    /// Total scrollable height of the document.
    fn document_height(&self) -> f64;
    fn scroll_to(&mut self, top: f64);

    fn chrome(&self) -> ChromeLayout;

    /// Top-left corner of the reading area in client coordinates.
    fn reading_area_origin(&self) -> Point;

    fn set_current_page_label(&mut self, label: &str);
    fn set_total_pages_label(&mut self, label: &str);
    /// No-op for hosts without a page indicator.
    fn set_indicator_visible(&mut self, visible: bool);
    /// No-op for hosts without a loading indicator.
    fn set_loading(&mut self, loading: bool);

    fn viewport_metrics(&self) -> ViewportMetrics {
        ViewportMetrics {
            scroll_top: self.scroll_top(),
            viewport_height: self.viewport_height(),
            document_height: self.document_height(),
        }
    }
}
