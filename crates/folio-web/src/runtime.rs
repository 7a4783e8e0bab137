use std::cell::RefCell;
use std::rc::Rc;

use folio_core::geometry::Point;
use folio_core::input::{Handled, InputEvent, NavKey, NavZone};
use folio_core::timers::Millis;
use folio_core::{FolioError, PageCatalog, PageHost, Result, Viewer, ViewerConfig};
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::timers::callback::Timeout;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, KeyboardEvent, MouseEvent, TouchEvent, TouchList, Window};

use crate::dom::{ElementIds, ViewerElements, WebDocument};
use crate::logging::init_logging;

/// Shared state behind a [`ComicViewer`]: the engine, the one armed browser
/// timeout, and every document-level listener.
pub(crate) struct Runtime {
    viewer: RefCell<Viewer<WebDocument>>,
    timer: RefCell<Option<(Millis, Timeout)>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl Runtime {
    /// Forward one event to the viewer and re-arm the timeout.
    pub(crate) fn dispatch(self: &Rc<Self>, event: InputEvent) -> Handled {
        let handled = match self.viewer.try_borrow_mut() {
            Ok(mut viewer) => viewer.handle(event),
            Err(_) => {
                warn!(?event, "Viewer busy, event dropped");
                return Handled::Ignored;
            }
        };
        self.rearm();
        handled
    }

    fn with_viewer<R>(self: &Rc<Self>, f: impl FnOnce(&mut Viewer<WebDocument>) -> R) -> Option<R> {
        let result = match self.viewer.try_borrow_mut() {
            Ok(mut viewer) => f(&mut viewer),
            Err(_) => {
                warn!("Viewer busy, call dropped");
                return None;
            }
        };
        self.rearm();
        Some(result)
    }

    fn fire_timers(self: &Rc<Self>) {
        self.timer.borrow_mut().take();
        self.with_viewer(|viewer| viewer.tick());
    }

    /// Keep exactly one browser timeout armed for the viewer's earliest
    /// deadline.
    fn rearm(self: &Rc<Self>) {
        let (next, now) = match self.viewer.try_borrow() {
            Ok(viewer) => (viewer.next_deadline(), viewer.host().now_ms()),
            Err(_) => return,
        };
        let mut timer = self.timer.borrow_mut();
        let Some(deadline) = next else {
            *timer = None;
            return;
        };
        if matches!(*timer, Some((armed, _)) if armed == deadline) {
            return;
        }
        let delay = deadline.saturating_sub(now).min(u32::MAX as Millis) as u32;
        let runtime = Rc::downgrade(self);
        let timeout = Timeout::new(delay, move || {
            if let Some(runtime) = runtime.upgrade() {
                runtime.fire_timers();
            }
        });
        debug!(deadline, delay, "Timer armed");
        *timer = Some((deadline, timeout));
    }

    fn listen(
        self: &Rc<Self>,
        target: &EventTarget,
        kind: &'static str,
        passive: bool,
        to_input: impl Fn(&Event) -> Option<InputEvent> + 'static,
    ) {
        let runtime = Rc::downgrade(self);
        let options = EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive,
        };
        let listener = EventListener::new_with_options(target, kind, options, move |event| {
            let Some(runtime) = runtime.upgrade() else {
                return;
            };
            let Some(input) = to_input(event) else {
                return;
            };
            if runtime.dispatch(input) == Handled::PreventDefault {
                event.prevent_default();
            }
        });
        self.listeners.borrow_mut().push(listener);
    }

    fn install_listeners(self: &Rc<Self>, window: &Window, elements: &ViewerElements) {
        self.listen(window, "scroll", true, |_| Some(InputEvent::Scroll));
        self.listen(window, "keydown", false, |event| {
            let key = event.dyn_ref::<KeyboardEvent>()?.key();
            NavKey::from_dom_key(&key).map(InputEvent::Key)
        });

        for (element, zone) in [
            (&elements.nav_left, NavZone::Left),
            (&elements.nav_right, NavZone::Right),
        ] {
            self.listen(element, "click", false, move |event| {
                let event = event.dyn_ref::<MouseEvent>()?;
                Some(InputEvent::Click {
                    zone,
                    client_y: event.client_y() as f64,
                })
            });
        }

        let area = &elements.reading_area;
        self.listen(area, "touchstart", false, |event| {
            let event = event.dyn_ref::<TouchEvent>()?;
            Some(InputEvent::TouchStart {
                touches: touch_points(&event.touches()),
            })
        });
        self.listen(area, "touchmove", false, |event| {
            let event = event.dyn_ref::<TouchEvent>()?;
            Some(InputEvent::TouchMove {
                touches: touch_points(&event.touches()),
            })
        });
        for kind in ["touchend", "touchcancel"] {
            self.listen(area, kind, false, |event| {
                let event = event.dyn_ref::<TouchEvent>()?;
                let point = *touch_points(&event.changed_touches()).first()?;
                Some(InputEvent::TouchEnd {
                    point,
                    remaining: event.touches().length() as usize,
                })
            });
        }
        self.listen(area, "contextmenu", false, |_| Some(InputEvent::ContextMenu));
    }

    fn shutdown(&self) {
        self.listeners.borrow_mut().clear();
        self.timer.borrow_mut().take();
        match self.viewer.try_borrow_mut() {
            Ok(mut viewer) => {
                viewer.teardown();
                viewer.host_mut().detach_listeners();
            }
            Err(_) => warn!("Viewer busy during dispose"),
        }
    }
}

fn touch_points(list: &TouchList) -> Vec<Point> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| Point::new(t.client_x() as f64, t.client_y() as f64))
        .collect()
}

fn to_js(e: FolioError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// A paginated comic viewer bound to the current page's DOM.
#[wasm_bindgen]
pub struct ComicViewer {
    runtime: Rc<Runtime>,
}

#[wasm_bindgen]
impl ComicViewer {
    /// Look up the standard element ids and start loading `pages`.
    #[wasm_bindgen(constructor)]
    pub fn new(pages: Box<[JsValue]>) -> std::result::Result<ComicViewer, JsValue> {
        init_logging("info");
        let pages: Vec<String> = pages.iter().filter_map(JsValue::as_string).collect();
        let catalog = PageCatalog::new(pages).map_err(to_js)?;
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let elements =
            ViewerElements::from_ids(&document, &ElementIds::default()).map_err(to_js)?;
        Self::attach(window, elements, catalog, ViewerConfig::default()).map_err(to_js)
    }

    #[wasm_bindgen(js_name = nextPage)]
    pub fn next_page(&self) -> bool {
        self.runtime
            .with_viewer(|v| v.next_page())
            .unwrap_or(false)
    }

    #[wasm_bindgen(js_name = previousPage)]
    pub fn previous_page(&self) -> bool {
        self.runtime
            .with_viewer(|v| v.previous_page())
            .unwrap_or(false)
    }

    /// Jump to a 0-based page index.
    #[wasm_bindgen(js_name = gotoPage)]
    pub fn goto_page(&self, index: usize) -> bool {
        self.runtime
            .with_viewer(|v| v.goto_page(index))
            .unwrap_or(false)
    }

    /// 0-based index of the current page.
    #[wasm_bindgen(js_name = currentPage)]
    pub fn current_page(&self) -> usize {
        self.runtime.viewer.borrow().current_page()
    }

    #[wasm_bindgen(js_name = totalPages)]
    pub fn total_pages(&self) -> usize {
        self.runtime.viewer.borrow().catalog().len()
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.runtime.viewer.borrow().is_ready()
    }

    /// Detach every listener and cancel every timer.
    pub fn dispose(&self) {
        self.runtime.shutdown();
    }
}

impl ComicViewer {
    /// Build a viewer over explicit element handles and start the initial
    /// preload.
    pub fn attach(
        window: Window,
        elements: ViewerElements,
        catalog: PageCatalog,
        config: ViewerConfig,
    ) -> Result<Self> {
        let priority = config.loading.priority_pages;
        let host = WebDocument::new(window.clone(), elements.clone())?;
        let viewer = Viewer::new(host, catalog, config)?;
        let runtime = Rc::new(Runtime {
            viewer: RefCell::new(viewer),
            timer: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });
        runtime
            .viewer
            .borrow_mut()
            .host_mut()
            .set_runtime(Rc::downgrade(&runtime));
        runtime.install_listeners(&window, &elements);
        runtime.with_viewer(|v| v.preload_initial_window(priority));
        Ok(Self { runtime })
    }
}
