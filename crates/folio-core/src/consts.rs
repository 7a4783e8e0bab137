/// Quiet period after the last scroll event before the viewport is re-examined.
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// How far past the visible area (in viewport heights) neighbors are attached.
pub const DEFAULT_LOOKAHEAD_VIEWPORTS: f64 = 1.5;

/// The page indicator is hidden while the viewport bottom is within this
/// fraction of a viewport height past the header's bottom edge.
pub const DEFAULT_HEADER_HIDE_FRACTION: f64 = 0.3;

/// The page indicator is hidden once the viewport top is within this
/// fraction of a viewport height before the footer's top edge.
pub const DEFAULT_FOOTER_HIDE_FRACTION: f64 = 0.7;

/// Pause after a page jump before window extension resumes.
pub const DEFAULT_SETTLE_MS: u64 = 500;

/// Number of neighbors on each side fetched into the cache after a page change.
pub const DEFAULT_PREFETCH_RADIUS: usize = 2;

/// Minimum horizontal travel (in CSS pixels) for a touch to count as a swipe.
pub const DEFAULT_SWIPE_THRESHOLD_PX: f64 = 50.0;

/// Lower zoom bound. 1.0 is the unzoomed page.
pub const DEFAULT_MIN_ZOOM: f64 = 1.0;

/// Upper zoom bound for pinch gestures.
pub const DEFAULT_MAX_ZOOM: f64 = 4.0;

/// Pages attached strictly in order before the viewer reports ready.
pub const DEFAULT_PRIORITY_PAGES: usize = 3;

/// Layout height of a broken-image placeholder in the headless document.
pub const BROKEN_IMAGE_HEIGHT: f64 = 20.0;

/// CSS class added to an image whose source failed to load.
pub const FAILED_IMAGE_CLASS: &str = "failed";

/// CSS class carried by every attached page image.
pub const PAGE_IMAGE_CLASS: &str = "folio-page";
