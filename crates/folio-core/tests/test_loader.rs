mod common;

use approx::assert_abs_diff_eq;
use folio_core::consts::FAILED_IMAGE_CLASS;
use folio_core::headless::HeadlessDocument;
use folio_core::input::{ImageOutcome, InputEvent};
use folio_core::registry::LoadState;
use folio_core::PageHost;

use common::{observed_viewer, page_src, viewer};

// ---------------------------------------------------------------------------
// Attachment
// ---------------------------------------------------------------------------

#[test]
fn test_attach_is_idempotent() {
    let mut v = viewer(HeadlessDocument::new(1000.0), 5);
    assert!(v.attach_at_end(2));
    assert!(!v.attach_at_end(2));
    assert!(!v.attach_at_start(2));
    assert_eq!(v.slots().len(), 1);
    assert_eq!(v.host().images().len(), 1);
}

#[test]
fn test_attach_out_of_range_is_noop() {
    let mut v = viewer(HeadlessDocument::new(1000.0), 3);
    assert!(!v.attach_at_end(3));
    assert!(!v.attach_at_start(99));
    assert!(v.slots().is_empty());
    assert!(v.host().images().is_empty());
}

#[test]
fn test_attach_orders_document() {
    let mut v = viewer(HeadlessDocument::new(1000.0), 5);
    v.attach_at_end(2);
    v.attach_at_end(3);
    v.attach_at_start(1);
    assert_eq!(v.host().page_order(), vec![1, 2, 3]);
    assert_eq!(v.slots().indices(), vec![1, 2, 3]);
}

#[test]
fn test_attached_image_alt_text() {
    let mut v = viewer(HeadlessDocument::new(1000.0), 3);
    v.attach_at_end(0);
    let img = &v.host().images()[0];
    assert_eq!(img.alt, "Page 1");
    assert_eq!(img.src, page_src(0));
}

// ---------------------------------------------------------------------------
// Prepend scroll compensation
// ---------------------------------------------------------------------------

fn anchored_viewer(outcome: ImageOutcome) -> folio_core::Viewer<HeadlessDocument> {
    let doc = HeadlessDocument::new(500.0)
        .with_page_height(1000.0)
        .with_page_heights([(1, 250.0)]);
    let mut v = viewer(doc, 5);
    v.attach_at_end(2);
    v.settle_next(ImageOutcome::Loaded);
    v.host_mut().scroll_to(400.0);
    assert_abs_diff_eq!(v.host().document_height(), 1000.0);

    assert!(v.attach_at_start(1));
    v.settle_next(outcome);
    v
}

#[test]
fn test_prepend_preserves_view() {
    let v = anchored_viewer(ImageOutcome::Loaded);
    assert_abs_diff_eq!(v.host().document_height(), 1250.0);
    assert_abs_diff_eq!(v.host().scroll_top(), 650.0);
}

#[test]
fn test_failed_prepend_skips_compensation() {
    let v = anchored_viewer(ImageOutcome::Failed);
    assert_abs_diff_eq!(v.host().scroll_top(), 400.0);
}

#[test]
fn test_prepend_ignores_growth_below_reader() {
    let doc = HeadlessDocument::new(500.0).with_page_height(1000.0);
    let mut v = viewer(doc, 5);
    v.attach_at_end(2);
    v.settle_next(ImageOutcome::Loaded);
    v.host_mut().scroll_to(100.0);

    assert!(v.attach_at_start(1));
    assert!(v.attach_at_end(3));
    let pending = v.host().pending_loads().to_vec();
    assert_eq!(pending.len(), 2);

    // The page below the reader arrives first.
    v.settle(pending[1], ImageOutcome::Loaded);
    assert_abs_diff_eq!(v.host().scroll_top(), 100.0);
    v.settle(pending[0], ImageOutcome::Loaded);

    let reading = v.host().images().iter().find(|i| i.index == 2).unwrap().slot;
    let top = v.host().image_span(&reading).top;
    assert_abs_diff_eq!(v.host().scroll_top() - top, 100.0);
    assert_abs_diff_eq!(v.host().scroll_top(), 1100.0);
}

#[test]
fn test_two_prepends_compensate_once_each() {
    let doc = HeadlessDocument::new(500.0)
        .with_page_height(1000.0)
        .with_page_heights([(1, 300.0), (2, 200.0)]);
    let mut v = viewer(doc, 5);
    v.attach_at_end(3);
    v.settle_next(ImageOutcome::Loaded);
    v.host_mut().scroll_to(50.0);

    assert!(v.attach_at_start(2));
    assert!(v.attach_at_start(1));
    let pending = v.host().pending_loads().to_vec();
    v.settle(pending[1], ImageOutcome::Loaded);
    v.settle(pending[0], ImageOutcome::Loaded);

    assert_eq!(v.host().page_order(), vec![1, 2, 3]);
    assert_abs_diff_eq!(v.host().scroll_top(), 550.0);
}

#[test]
fn test_append_does_not_move_view() {
    let doc = HeadlessDocument::new(500.0).with_page_height(1000.0);
    let mut v = viewer(doc, 5);
    v.attach_at_end(0);
    v.settle_next(ImageOutcome::Loaded);
    v.host_mut().scroll_to(300.0);
    v.attach_at_end(1);
    v.settle_next(ImageOutcome::Loaded);
    assert_abs_diff_eq!(v.host().scroll_top(), 300.0);
}

// ---------------------------------------------------------------------------
// Load failures and stale events
// ---------------------------------------------------------------------------

#[test]
fn test_failed_load_is_marked() {
    let (mut v, observer) = observed_viewer(HeadlessDocument::new(1000.0), 3);
    v.attach_at_end(0);
    let slot = v.settle_next(ImageOutcome::Failed).unwrap();

    let img = v.host().image(slot).unwrap();
    assert_eq!(img.alt, "Failed to load page 1");
    assert!(img.classes.iter().any(|c| c == FAILED_IMAGE_CLASS));
    assert_eq!(v.slots().get(0).unwrap().state, LoadState::Failed);
    assert_eq!(*observer.settled.borrow(), vec![(0, ImageOutcome::Failed)]);
}

#[test]
fn test_duplicate_settle_ignored() {
    let (mut v, observer) = observed_viewer(HeadlessDocument::new(1000.0), 3);
    v.attach_at_end(0);
    let slot = v.settle_next(ImageOutcome::Loaded).unwrap();
    v.handle(InputEvent::ImageSettled {
        slot,
        outcome: ImageOutcome::Failed,
    });
    assert_eq!(v.slots().get(0).unwrap().state, LoadState::Loaded);
    assert_eq!(observer.settled.borrow().len(), 1);
}

#[test]
fn test_settle_after_navigation_ignored() {
    let (mut v, observer) = observed_viewer(HeadlessDocument::new(1000.0), 5);
    v.goto_page(0);
    let stale = v.host().pending_loads()[0];
    v.goto_page(3);

    v.settle(stale, ImageOutcome::Loaded);
    assert!(observer.settled.borrow().is_empty());
    assert_eq!(v.slots().indices(), vec![3]);
    assert_eq!(v.slots().get(3).unwrap().state, LoadState::Pending);
}
