//! A deterministic in-memory document for tests and offline simulation.
//!
//! Layout is a single column: the header, then every attached image in
//! document order, then the footer. An image is zero pixels tall until it
//! settles; a loaded image takes its page height and a failed one a small
//! placeholder height. The clock only moves when told to.

use std::collections::HashMap;

use crate::consts::{BROKEN_IMAGE_HEIGHT, FAILED_IMAGE_CLASS};
use crate::error::Result;
use crate::geometry::{ChromeLayout, Point, Span};
use crate::host::PageHost;
use crate::input::{Handled, ImageOutcome, InputEvent};
use crate::registry::{LoadState, SlotId};
use crate::timers::Millis;
use crate::transform::ZoomPan;
use crate::viewer::Viewer;

#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessImage {
    pub slot: SlotId,
    pub index: usize,
    pub src: String,
    pub alt: String,
    pub state: LoadState,
    pub classes: Vec<String>,
}

#[derive(Debug)]
pub struct HeadlessDocument {
    now: Millis,
    viewport_height: f64,
    header_height: Option<f64>,
    footer_height: Option<f64>,
    default_page_height: f64,
    page_heights: HashMap<usize, f64>,
    images: Vec<HeadlessImage>,
    detached: Vec<HeadlessImage>,
    pending: Vec<SlotId>,
    scroll_top: f64,
    current_label: String,
    total_label: String,
    indicator_visible: Option<bool>,
    loading: bool,
    transform: ZoomPan,
    prefetched: Vec<String>,
}

impl HeadlessDocument {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            now: 0,
            viewport_height,
            header_height: None,
            footer_height: None,
            default_page_height: viewport_height,
            page_heights: HashMap::new(),
            images: Vec::new(),
            detached: Vec::new(),
            pending: Vec::new(),
            scroll_top: 0.0,
            current_label: String::new(),
            total_label: String::new(),
            indicator_visible: None,
            loading: false,
            transform: ZoomPan::IDENTITY,
            prefetched: Vec::new(),
        }
    }

    pub fn with_header(mut self, height: f64) -> Self {
        self.header_height = Some(height);
        self
    }

    pub fn with_footer(mut self, height: f64) -> Self {
        self.footer_height = Some(height);
        self
    }

    /// Height of every page without an explicit override.
    pub fn with_page_height(mut self, height: f64) -> Self {
        self.default_page_height = height;
        self
    }

    pub fn with_page_heights(mut self, heights: impl IntoIterator<Item = (usize, f64)>) -> Self {
        self.page_heights.extend(heights);
        self
    }

    pub fn set_now(&mut self, now: Millis) {
        self.now = now;
    }

    pub fn page_height(&self, index: usize) -> f64 {
        self.page_heights
            .get(&index)
            .copied()
            .unwrap_or(self.default_page_height)
    }

    /// Finish the fetch for `slot`. Returns false when the slot was never
    /// pending (already settled or unknown). The image may already be
    /// detached; the browser still fires its event in that case.
    pub fn complete(&mut self, slot: SlotId, outcome: ImageOutcome) -> bool {
        let Some(pos) = self.pending.iter().position(|s| *s == slot) else {
            return false;
        };
        self.pending.remove(pos);
        if let Some(image) = self.images.iter_mut().find(|i| i.slot == slot) {
            image.state = match outcome {
                ImageOutcome::Loaded => LoadState::Loaded,
                ImageOutcome::Failed => LoadState::Failed,
            };
        }
        self.clamp_scroll();
        true
    }

    /// Fetches still in flight, oldest first.
    pub fn pending_loads(&self) -> &[SlotId] {
        &self.pending
    }

    pub fn images(&self) -> &[HeadlessImage] {
        &self.images
    }

    pub fn image(&self, slot: SlotId) -> Option<&HeadlessImage> {
        self.images.iter().find(|i| i.slot == slot)
    }

    /// Page indices in document order.
    pub fn page_order(&self) -> Vec<usize> {
        self.images.iter().map(|i| i.index).collect()
    }

    pub fn current_page_label(&self) -> &str {
        &self.current_label
    }

    pub fn total_pages_label(&self) -> &str {
        &self.total_label
    }

    pub fn indicator_visible(&self) -> Option<bool> {
        self.indicator_visible
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn transform(&self) -> ZoomPan {
        self.transform
    }

    pub fn prefetched(&self) -> &[String] {
        &self.prefetched
    }

    fn take_detached(&mut self, slot: SlotId) -> Option<HeadlessImage> {
        let pos = self.detached.iter().position(|i| i.slot == slot)?;
        Some(self.detached.remove(pos))
    }

    fn rendered_height(&self, image: &HeadlessImage) -> f64 {
        match image.state {
            LoadState::Pending => 0.0,
            LoadState::Loaded => self.page_height(image.index),
            LoadState::Failed => BROKEN_IMAGE_HEIGHT,
        }
    }

    fn pages_height(&self) -> f64 {
        self.images.iter().map(|i| self.rendered_height(i)).sum()
    }

    fn content_height(&self) -> f64 {
        self.header_height.unwrap_or(0.0) + self.pages_height() + self.footer_height.unwrap_or(0.0)
    }

    fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport_height).max(0.0)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_scroll());
    }
}

impl PageHost for HeadlessDocument {
    type Image = SlotId;

    fn now_ms(&self) -> Millis {
        self.now
    }

    fn create_image(&mut self, slot: SlotId, index: usize, src: &str, alt: &str) -> Result<SlotId> {
        self.pending.push(slot);
        // Held outside the column until inserted.
        self.detached.push(HeadlessImage {
            slot,
            index,
            src: src.to_string(),
            alt: alt.to_string(),
            state: LoadState::Pending,
            classes: Vec::new(),
        });
        Ok(slot)
    }

    fn append_image(&mut self, image: &SlotId) {
        if let Some(img) = self.take_detached(*image) {
            self.images.push(img);
        }
    }

    fn prepend_image(&mut self, image: &SlotId) {
        if let Some(img) = self.take_detached(*image) {
            self.images.insert(0, img);
        }
    }

    fn clear_images(&mut self) {
        self.images.clear();
        self.clamp_scroll();
    }

    fn mark_failed(&mut self, image: &SlotId, alt: &str) {
        if let Some(img) = self.images.iter_mut().find(|i| i.slot == *image) {
            img.alt = alt.to_string();
            img.classes.push(FAILED_IMAGE_CLASS.to_string());
        }
    }

    fn image_span(&self, image: &SlotId) -> Span {
        let mut top = self.header_height.unwrap_or(0.0);
        for img in &self.images {
            let height = self.rendered_height(img);
            if img.slot == *image {
                return Span::new(top, height);
            }
            top += height;
        }
        Span::default()
    }

    fn apply_transform(&mut self, transform: &ZoomPan) {
        self.transform = *transform;
    }

    fn prefetch(&mut self, src: &str) {
        self.prefetched.push(src.to_string());
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn document_height(&self) -> f64 {
        self.content_height().max(self.viewport_height)
    }

    fn scroll_to(&mut self, top: f64) {
        self.scroll_top = top;
        self.clamp_scroll();
    }

    fn chrome(&self) -> ChromeLayout {
        let header = self.header_height.map(|h| Span::new(0.0, h));
        let footer = self.footer_height.map(|h| {
            Span::new(self.header_height.unwrap_or(0.0) + self.pages_height(), h)
        });
        ChromeLayout { header, footer }
    }

    fn reading_area_origin(&self) -> Point {
        Point::new(0.0, -self.scroll_top)
    }

    fn set_current_page_label(&mut self, label: &str) {
        self.current_label = label.to_string();
    }

    fn set_total_pages_label(&mut self, label: &str) {
        self.total_label = label.to_string();
    }

    fn set_indicator_visible(&mut self, visible: bool) {
        self.indicator_visible = Some(visible);
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

/// Drivers that play the browser's part against a headless document.
impl Viewer<HeadlessDocument> {
    /// Move the clock forward by `ms`, firing timers at their own deadlines.
    pub fn advance_clock(&mut self, ms: Millis) {
        let target = self.host().now_ms() + ms;
        while let Some(deadline) = self.next_deadline().filter(|d| *d <= target) {
            let now = self.host().now_ms().max(deadline);
            self.host_mut().set_now(now);
            self.tick();
            if self.is_disposed() {
                break;
            }
        }
        self.host_mut().set_now(target);
    }

    /// Scroll as a reader would: move the viewport, then report the scroll.
    pub fn scroll_by_user(&mut self, top: f64) -> Handled {
        self.host_mut().scroll_to(top);
        self.handle(InputEvent::Scroll)
    }

    /// Finish one fetch and deliver its load or error event.
    pub fn settle(&mut self, slot: SlotId, outcome: ImageOutcome) -> Handled {
        if !self.host_mut().complete(slot, outcome) {
            return Handled::Ignored;
        }
        self.handle(InputEvent::ImageSettled { slot, outcome })
    }

    /// Settle the oldest fetch in flight. Returns its slot.
    pub fn settle_next(&mut self, outcome: ImageOutcome) -> Option<SlotId> {
        let slot = *self.host().pending_loads().first()?;
        self.settle(slot, outcome);
        Some(slot)
    }

    /// Settle fetches oldest first until none remain, including ones started
    /// along the way. `outcome_for` receives the page index. Returns how many
    /// were settled.
    pub fn settle_all(&mut self, mut outcome_for: impl FnMut(usize) -> ImageOutcome) -> usize {
        let mut settled = 0;
        while let Some(&slot) = self.host().pending_loads().first() {
            let outcome = self
                .host()
                .image(slot)
                .map(|img| outcome_for(img.index))
                .unwrap_or(ImageOutcome::Loaded);
            self.settle(slot, outcome);
            settled += 1;
        }
        settled
    }
}
