//! The viewer engine: one instance per embedded reader.
//!
//! A [`Viewer`] owns the page catalog, the slot registry and the timer
//! queue, and drives a [`PageHost`]. It is single-threaded and
//! event-driven: the host forwards input through [`Viewer::handle`] and
//! calls [`Viewer::tick`] once [`Viewer::next_deadline`] has passed.

mod loader;
mod navigation;
mod touch;
mod tracker;

use std::rc::Rc;

use tracing::{debug, info};

use crate::catalog::PageCatalog;
use crate::config::ViewerConfig;
use crate::error::Result;
use crate::gesture::GestureInterpreter;
use crate::geometry::{self, Point};
use crate::host::PageHost;
use crate::input::{Handled, InputEvent, NavKey, NavZone};
use crate::observer::{NoOpObserver, ViewerObserver};
use crate::registry::SlotRegistry;
use crate::state::ViewerState;
use crate::timers::{Millis, TimerId, TimerKind, TimerQueue};
use crate::transform::ZoomPan;

use loader::PreloadChain;
use tracker::TrackerPhase;

pub struct Viewer<H: PageHost> {
    host: H,
    catalog: PageCatalog,
    config: ViewerConfig,
    state: ViewerState,
    slots: SlotRegistry<H::Image>,
    timers: TimerQueue,
    tracker: TrackerPhase,
    settle_timer: Option<TimerId>,
    preload: Option<PreloadChain>,
    ready: bool,
    gestures: GestureInterpreter,
    observer: Rc<dyn ViewerObserver>,
    next_slot: u64,
    disposed: bool,
}

impl<H: PageHost> Viewer<H> {
    /// Build a viewer over `host`. Sets the page counters and the initial
    /// indicator visibility; nothing is attached until
    /// [`Viewer::preload_initial_window`] or a navigation call.
    pub fn new(mut host: H, catalog: PageCatalog, config: ViewerConfig) -> Result<Self> {
        config.validate()?;

        let mut gestures = GestureInterpreter::new();
        gestures.configure(config.gestures.clone());

        host.set_total_pages_label(&catalog.len().to_string());
        host.set_current_page_label("1");

        let mut viewer = Self {
            host,
            catalog,
            config,
            state: ViewerState::default(),
            slots: SlotRegistry::new(),
            timers: TimerQueue::new(),
            tracker: TrackerPhase::Idle,
            settle_timer: None,
            preload: None,
            ready: false,
            gestures,
            observer: Rc::new(NoOpObserver),
            next_slot: 0,
            disposed: false,
        };
        viewer.refresh_indicator();
        info!(pages = viewer.catalog.len(), "Viewer initialized");
        Ok(viewer)
    }

    pub fn with_observer(mut self, observer: Rc<dyn ViewerObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    pub fn transform(&self) -> ZoomPan {
        self.state.transform
    }

    pub fn is_infinite_scroll(&self) -> bool {
        self.state.infinite_scroll
    }

    /// True once the priority window of the initial preload has settled.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn slots(&self) -> &SlotRegistry<H::Image> {
        &self.slots
    }

    pub fn catalog(&self) -> &PageCatalog {
        &self.catalog
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// When the host should call [`Viewer::tick`] next.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    /// Dispatch one input event.
    pub fn handle(&mut self, event: InputEvent) -> Handled {
        if self.disposed {
            debug!(?event, "Event after teardown ignored");
            return Handled::Ignored;
        }
        match event {
            InputEvent::Scroll => self.on_scroll(),
            InputEvent::Key(NavKey::Left) => {
                self.previous_page();
                Handled::Consumed
            }
            InputEvent::Key(NavKey::Right) => {
                self.next_page();
                Handled::Consumed
            }
            InputEvent::Click { zone, client_y } => self.on_click(zone, client_y),
            InputEvent::TouchStart { touches } => self.on_touch_start(&touches),
            InputEvent::TouchMove { touches } => self.on_touch_move(&touches),
            InputEvent::TouchEnd { point, remaining } => self.on_touch_end(point, remaining),
            InputEvent::ContextMenu => Handled::PreventDefault,
            InputEvent::ImageSettled { slot, outcome } => {
                self.on_image_settled(slot, outcome);
                Handled::Consumed
            }
        }
    }

    /// Fire every timer whose deadline has passed on the host clock.
    pub fn tick(&mut self) {
        if self.disposed {
            return;
        }
        let now = self.host.now_ms();
        while let Some((id, kind)) = self.timers.pop_due(now) {
            match kind {
                TimerKind::ScrollSettled => self.on_debounce_fired(id),
                TimerKind::NavigationSettled => self.on_settle_fired(id),
            }
        }
    }

    /// Cancel all timers and stop reacting to input. The host is expected to
    /// detach its listeners as well.
    pub fn teardown(&mut self) {
        if self.disposed {
            return;
        }
        self.timers.clear();
        self.tracker = TrackerPhase::Idle;
        self.settle_timer = None;
        self.preload = None;
        self.gestures.reset();
        self.disposed = true;
        info!("Viewer torn down");
    }

    fn on_click(&mut self, zone: NavZone, client_y: f64) -> Handled {
        if !self.in_reading_area(client_y) {
            debug!(client_y, "Click outside reading area ignored");
            return Handled::Ignored;
        }
        match zone {
            NavZone::Left => self.previous_page(),
            NavZone::Right => self.next_page(),
        };
        Handled::Consumed
    }

    fn in_reading_area(&self, client_y: f64) -> bool {
        geometry::point_in_reading_area(
            client_y,
            self.host.scroll_top(),
            &self.host.chrome(),
            self.host.document_height(),
        )
    }

    /// Client coordinates to reading-area coordinates.
    fn to_local(&self, point: Point) -> Point {
        point - self.host.reading_area_origin()
    }

    fn set_transform(&mut self, transform: ZoomPan) {
        self.state.transform = transform;
        self.host.apply_transform(&transform);
    }

    fn set_current_page(&mut self, index: usize) {
        self.state.current_page = index;
        self.host.set_current_page_label(&(index + 1).to_string());
        self.observer.page_changed(index);
        debug!(page = index + 1, "Current page changed");
    }

    /// Warm the cache for the pages around `index`, nearest first, forward
    /// before backward.
    fn prefetch_neighbors(&mut self, index: usize) {
        let radius = self.config.navigation.prefetch_radius;
        for offset in 1..=radius {
            if let Some(src) = self.catalog.source(index + offset) {
                self.host.prefetch(src);
            }
        }
        for offset in 1..=radius {
            if let Some(src) = index
                .checked_sub(offset)
                .and_then(|prev| self.catalog.source(prev))
            {
                self.host.prefetch(src);
            }
        }
    }
}
