use crate::input::ImageOutcome;

/// Hooks into viewer activity, for progress output and diagnostics.
///
/// All methods have default no-op implementations.
pub trait ViewerObserver {
    /// The debounced viewport check ran.
    fn window_checked(&self) {}

    /// A page image was inserted into the document.
    fn slot_attached(&self, _index: usize) {}

    /// A page image finished loading or failed.
    fn slot_settled(&self, _index: usize, _outcome: ImageOutcome) {}

    /// The current page changed.
    fn page_changed(&self, _index: usize) {}

    /// The priority window of the initial preload has settled.
    fn ready(&self) {}
}

/// Observer used when none is installed.
pub struct NoOpObserver;
impl ViewerObserver for NoOpObserver {}
