mod common;

use approx::assert_abs_diff_eq;
use folio_core::headless::HeadlessDocument;
use folio_core::input::{Handled, ImageOutcome, InputEvent, NavKey, NavZone};
use folio_core::transform::ZoomPan;
use folio_core::PageHost;

use common::{fully_loaded, observed_viewer, page_src, viewer};

// ---------------------------------------------------------------------------
// goto_page
// ---------------------------------------------------------------------------

#[test]
fn test_goto_replaces_window() {
    let doc = HeadlessDocument::new(800.0).with_header(120.0);
    let mut v = fully_loaded(doc, 6);
    assert_eq!(v.slots().len(), 6);

    assert!(v.goto_page(3));
    assert_eq!(v.slots().indices(), vec![3]);
    assert_eq!(v.host().page_order(), vec![3]);
    assert_eq!(v.current_page(), 3);
    assert_eq!(v.host().current_page_label(), "4");
    assert!(!v.is_infinite_scroll());
    assert!(v.transform().is_identity());
    assert_eq!(v.host().transform(), ZoomPan::IDENTITY);
}

#[test]
fn test_goto_scrolls_to_reading_area() {
    let doc = HeadlessDocument::new(500.0)
        .with_header(120.0)
        .with_footer(1000.0)
        .with_page_height(1000.0);
    let mut v = viewer(doc, 4);
    v.goto_page(2);
    v.settle_next(ImageOutcome::Loaded);
    v.host_mut().scroll_to(600.0);

    v.goto_page(1);
    assert_abs_diff_eq!(v.host().scroll_top(), 120.0);
}

#[test]
fn test_goto_prefetches_neighbors() {
    let mut v = viewer(HeadlessDocument::new(1000.0), 8);
    v.goto_page(4);
    let expected: Vec<String> = [5, 6, 3, 2].into_iter().map(page_src).collect();
    assert_eq!(v.host().prefetched(), expected.as_slice());
}

#[test]
fn test_goto_out_of_range_is_noop() {
    let mut v = viewer(HeadlessDocument::new(1000.0), 3);
    v.goto_page(1);
    assert!(!v.goto_page(3));
    assert_eq!(v.current_page(), 1);
    assert_eq!(v.slots().indices(), vec![1]);
}

#[test]
fn test_settle_delay_restores_infinite_scroll() {
    let mut v = viewer(HeadlessDocument::new(1000.0), 5);
    v.goto_page(2);
    v.advance_clock(499);
    assert!(!v.is_infinite_scroll());
    v.advance_clock(1);
    assert!(v.is_infinite_scroll());
}

#[test]
fn test_repeated_goto_restarts_settle_delay() {
    let mut v = viewer(HeadlessDocument::new(1000.0), 5);
    v.goto_page(2);
    v.advance_clock(400);
    v.goto_page(3);
    v.advance_clock(400);
    assert!(!v.is_infinite_scroll());
    v.advance_clock(100);
    assert!(v.is_infinite_scroll());
}

#[test]
fn test_scroll_ignored_while_settling() {
    let (mut v, observer) = observed_viewer(HeadlessDocument::new(1000.0), 5);
    v.goto_page(2);
    assert_eq!(v.handle(InputEvent::Scroll), Handled::Ignored);
    v.advance_clock(1000);
    assert_eq!(observer.window_checks.get(), 0);
}

// ---------------------------------------------------------------------------
// next / previous
// ---------------------------------------------------------------------------

#[test]
fn test_next_and_previous() {
    let mut v = viewer(HeadlessDocument::new(1000.0), 3);
    assert!(v.next_page());
    assert_eq!(v.current_page(), 1);
    assert!(v.previous_page());
    assert_eq!(v.current_page(), 0);
}

#[test]
fn test_boundaries_are_noops() {
    let mut v = viewer(HeadlessDocument::new(1000.0), 3);
    assert!(!v.previous_page());
    assert!(v.slots().is_empty());

    v.goto_page(2);
    let slots_before = v.slots().indices();
    assert!(!v.next_page());
    assert_eq!(v.current_page(), 2);
    assert_eq!(v.slots().indices(), slots_before);
}

#[test]
fn test_arrow_keys_navigate() {
    let mut v = viewer(HeadlessDocument::new(1000.0), 3);
    v.handle(InputEvent::Key(NavKey::Right));
    v.handle(InputEvent::Key(NavKey::Right));
    assert_eq!(v.current_page(), 2);
    v.handle(InputEvent::Key(NavKey::Right));
    assert_eq!(v.current_page(), 2);
    v.handle(InputEvent::Key(NavKey::Left));
    assert_eq!(v.current_page(), 1);
}

#[test]
fn test_nav_key_from_dom() {
    assert_eq!(NavKey::from_dom_key("ArrowLeft"), Some(NavKey::Left));
    assert_eq!(NavKey::from_dom_key("ArrowRight"), Some(NavKey::Right));
    assert_eq!(NavKey::from_dom_key("ArrowUp"), None);
}

// ---------------------------------------------------------------------------
// Click zones
// ---------------------------------------------------------------------------

fn chrome_viewer() -> folio_core::Viewer<HeadlessDocument> {
    let doc = HeadlessDocument::new(1000.0)
        .with_header(200.0)
        .with_footer(300.0)
        .with_page_height(1000.0);
    let mut v = viewer(doc, 5);
    v.goto_page(1);
    v.settle_next(ImageOutcome::Loaded);
    v
}

#[test]
fn test_click_in_header_ignored() {
    let mut v = chrome_viewer();
    v.host_mut().scroll_to(0.0);
    let handled = v.handle(InputEvent::Click {
        zone: NavZone::Right,
        client_y: 100.0,
    });
    assert_eq!(handled, Handled::Ignored);
    assert_eq!(v.current_page(), 1);
}

#[test]
fn test_click_in_footer_ignored() {
    let mut v = chrome_viewer();
    v.host_mut().scroll_to(500.0);
    let handled = v.handle(InputEvent::Click {
        zone: NavZone::Left,
        client_y: 900.0,
    });
    assert_eq!(handled, Handled::Ignored);
    assert_eq!(v.current_page(), 1);
}

#[test]
fn test_click_in_reading_area_navigates() {
    let mut v = chrome_viewer();
    v.host_mut().scroll_to(0.0);
    v.handle(InputEvent::Click {
        zone: NavZone::Right,
        client_y: 500.0,
    });
    assert_eq!(v.current_page(), 2);
    v.settle_next(ImageOutcome::Loaded);

    v.handle(InputEvent::Click {
        zone: NavZone::Left,
        client_y: 500.0,
    });
    assert_eq!(v.current_page(), 1);
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_initial_labels() {
    let v = viewer(HeadlessDocument::new(1000.0), 7);
    assert_eq!(v.host().total_pages_label(), "7");
    assert_eq!(v.host().current_page_label(), "1");
}

#[test]
fn test_context_menu_prevented() {
    let mut v = viewer(HeadlessDocument::new(1000.0), 2);
    assert_eq!(v.handle(InputEvent::ContextMenu), Handled::PreventDefault);
}

#[test]
fn test_teardown_stops_everything() {
    let mut v = viewer(HeadlessDocument::new(1000.0), 5);
    v.goto_page(1);
    v.handle(InputEvent::Scroll);
    v.teardown();

    assert!(v.is_disposed());
    assert_eq!(v.next_deadline(), None);
    assert_eq!(v.handle(InputEvent::Key(NavKey::Right)), Handled::Ignored);
    assert!(!v.goto_page(3));
    assert_eq!(v.current_page(), 1);
}
