use tracing::{debug, info};

use crate::host::PageHost;
use crate::timers::{TimerId, TimerKind};
use crate::transform::ZoomPan;

use super::tracker::TrackerPhase;
use super::Viewer;

impl<H: PageHost> Viewer<H> {
    /// Jump to the following page. Returns false at the last page.
    pub fn next_page(&mut self) -> bool {
        let next = self.state.current_page + 1;
        if !self.catalog.contains(next) {
            return false;
        }
        self.goto_page(next)
    }

    /// Jump to the preceding page. Returns false at the first page.
    pub fn previous_page(&mut self) -> bool {
        match self.state.current_page.checked_sub(1) {
            Some(prev) => self.goto_page(prev),
            None => false,
        }
    }

    /// Replace the document's pages with `index` alone.
    ///
    /// Infinite scroll is suspended for the configured settle delay so the
    /// scroll event caused by the jump cannot extend the one-page window.
    pub fn goto_page(&mut self, index: usize) -> bool {
        if self.disposed {
            return false;
        }
        if !self.catalog.contains(index) {
            debug!(index, "Navigation target out of range");
            return false;
        }
        info!(page = index + 1, "Jumping to page");

        self.state.infinite_scroll = false;
        if let TrackerPhase::DebouncePending(id) = self.tracker {
            self.timers.cancel(id);
        }
        self.tracker = TrackerPhase::Idle;
        if self.preload.take().is_some() {
            debug!("Initial preload superseded by navigation");
        }
        if !self.ready {
            self.mark_ready();
        }

        self.host.clear_images();
        self.slots.clear();
        self.gestures.reset();
        self.set_transform(ZoomPan::IDENTITY);

        self.set_current_page(index);
        self.attach_at_end(index);
        self.prefetch_neighbors(index);

        let reading_top = self.host.chrome().header_extent();
        self.host.scroll_to(reading_top);
        self.refresh_indicator();

        if let Some(id) = self.settle_timer.take() {
            self.timers.cancel(id);
        }
        let deadline = self.host.now_ms() + self.config.navigation.settle_ms;
        self.settle_timer = Some(self.timers.schedule(TimerKind::NavigationSettled, deadline));
        true
    }

    pub(super) fn on_settle_fired(&mut self, id: TimerId) {
        if self.settle_timer != Some(id) {
            return;
        }
        self.settle_timer = None;
        self.state.infinite_scroll = true;
        debug!("Infinite scroll resumed");
    }
}
