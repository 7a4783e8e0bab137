#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio_core::headless::HeadlessDocument;
use folio_core::input::ImageOutcome;
use folio_core::observer::ViewerObserver;
use folio_core::{PageCatalog, Viewer, ViewerConfig};

/// Catalog of `n` pages named `page-00.png`, `page-01.png`, ...
pub fn catalog(n: usize) -> PageCatalog {
    PageCatalog::new((0..n).map(page_src).collect()).unwrap()
}

pub fn page_src(index: usize) -> String {
    format!("page-{:02}.png", index)
}

/// Viewer over a headless document with default configuration.
pub fn viewer(doc: HeadlessDocument, pages: usize) -> Viewer<HeadlessDocument> {
    Viewer::new(doc, catalog(pages), ViewerConfig::default()).unwrap()
}

/// Viewer with a counting observer attached.
pub fn observed_viewer(
    doc: HeadlessDocument,
    pages: usize,
) -> (Viewer<HeadlessDocument>, Rc<CountingObserver>) {
    let observer = Rc::new(CountingObserver::default());
    let viewer = viewer(doc, pages).with_observer(observer.clone());
    (viewer, observer)
}

/// Every page attached and loaded, scrolled to the top.
pub fn fully_loaded(doc: HeadlessDocument, pages: usize) -> Viewer<HeadlessDocument> {
    let mut v = viewer(doc, pages);
    v.preload_initial_window(3);
    v.settle_all(|_| ImageOutcome::Loaded);
    v
}

/// Records every observer callback.
#[derive(Default)]
pub struct CountingObserver {
    pub window_checks: Cell<usize>,
    pub attached: RefCell<Vec<usize>>,
    pub settled: RefCell<Vec<(usize, ImageOutcome)>>,
    pub pages: RefCell<Vec<usize>>,
    pub ready_calls: Cell<usize>,
}

impl ViewerObserver for CountingObserver {
    fn window_checked(&self) {
        self.window_checks.set(self.window_checks.get() + 1);
    }

    fn slot_attached(&self, index: usize) {
        self.attached.borrow_mut().push(index);
    }

    fn slot_settled(&self, index: usize, outcome: ImageOutcome) {
        self.settled.borrow_mut().push((index, outcome));
    }

    fn page_changed(&self, index: usize) {
        self.pages.borrow_mut().push(index);
    }

    fn ready(&self) {
        self.ready_calls.set(self.ready_calls.get() + 1);
    }
}
