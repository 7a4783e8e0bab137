use tracing::debug;

use crate::geometry;
use crate::host::PageHost;
use crate::input::Handled;
use crate::timers::{TimerId, TimerKind};

use super::Viewer;

/// Scroll debounce state. At most one debounce timer is ever pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum TrackerPhase {
    Idle,
    DebouncePending(TimerId),
}

impl<H: PageHost> Viewer<H> {
    pub(super) fn on_scroll(&mut self) -> Handled {
        if !self.state.infinite_scroll {
            debug!("Scroll ignored while navigation settles");
            return Handled::Ignored;
        }
        if let TrackerPhase::DebouncePending(id) = self.tracker {
            self.timers.cancel(id);
        }
        let deadline = self.host.now_ms() + self.config.tracker.debounce_ms;
        let id = self.timers.schedule(TimerKind::ScrollSettled, deadline);
        self.tracker = TrackerPhase::DebouncePending(id);
        Handled::Consumed
    }

    pub(super) fn on_debounce_fired(&mut self, id: TimerId) {
        if self.tracker != TrackerPhase::DebouncePending(id) {
            return;
        }
        self.tracker = TrackerPhase::Idle;
        self.extend_window();
        self.update_current_page();
        self.refresh_indicator();
    }

    /// Attach the next or previous page when the viewport, widened by the
    /// lookahead margin, reaches past the attached pages.
    pub fn extend_window(&mut self) {
        self.observer.window_checked();

        let metrics = self.host.viewport_metrics();
        let margin = metrics.viewport_height * self.config.tracker.lookahead_viewports;

        let last = self
            .slots
            .last_by_index()
            .map(|s| (s.index, self.host.image_span(&s.image)));
        if let Some((index, span)) = last {
            let next = index + 1;
            if metrics.scroll_bottom() + margin > span.bottom()
                && self.catalog.contains(next)
                && !self.slots.has(next)
            {
                debug!(index = next, "Extending window forward");
                self.attach_at_end(next);
            }
        }

        let first = self
            .slots
            .first_by_index()
            .map(|s| (s.index, self.host.image_span(&s.image)));
        if let Some((index, span)) = first {
            if index > 0 && metrics.scroll_top - margin < span.top && !self.slots.has(index - 1) {
                debug!(index = index - 1, "Extending window backward");
                self.attach_at_start(index - 1);
            }
        }
    }

    /// Make the page under the viewport's vertical midpoint current.
    pub fn update_current_page(&mut self) {
        let center = self.host.viewport_metrics().center();
        let host = &self.host;
        let Some(index) = self.slots.index_at(center, |image| host.image_span(image)) else {
            return;
        };
        if index != self.state.current_page {
            self.set_current_page(index);
            self.prefetch_neighbors(index);
        }
    }

    /// Show or hide the page indicator depending on how close the view is to
    /// the header and footer.
    pub fn refresh_indicator(&mut self) {
        let visible = geometry::indicator_visible(
            &self.host.viewport_metrics(),
            &self.host.chrome(),
            self.config.tracker.header_hide_fraction,
            self.config.tracker.footer_hide_fraction,
        );
        self.host.set_indicator_visible(visible);
    }
}
