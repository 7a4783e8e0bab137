use std::collections::HashMap;
use std::rc::Weak;

use folio_core::consts::{FAILED_IMAGE_CLASS, PAGE_IMAGE_CLASS};
use folio_core::geometry::{ChromeLayout, Point, Span};
use folio_core::input::{ImageOutcome, InputEvent};
use folio_core::registry::SlotId;
use folio_core::timers::Millis;
use folio_core::transform::ZoomPan;
use folio_core::{FolioError, PageHost, Result};
use gloo::events::EventListener;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, HtmlImageElement, Window};

use crate::runtime::Runtime;

/// Class toggled on the loading element while the first pages load.
const LOADING_ACTIVE_CLASS: &str = "active";

/// Element ids looked up by [`ViewerElements::from_ids`].
#[derive(Clone, Debug)]
pub struct ElementIds {
    pub reading_area: String,
    pub page_container: String,
    pub current_page: String,
    pub total_pages: String,
    pub nav_left: String,
    pub nav_right: String,
    pub header: String,
    pub footer: String,
    pub indicator: String,
    pub loading: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            reading_area: "viewer".into(),
            page_container: "page-container".into(),
            current_page: "current-page".into(),
            total_pages: "total-pages".into(),
            nav_left: "nav-left".into(),
            nav_right: "nav-right".into(),
            header: "header".into(),
            footer: "footer".into(),
            indicator: "page-indicator".into(),
            loading: "loading".into(),
        }
    }
}

/// Handles to the page regions the viewer drives. The optional ones may be
/// absent; header and footer then occupy no space.
#[derive(Clone, Debug)]
pub struct ViewerElements {
    pub reading_area: HtmlElement,
    pub page_container: HtmlElement,
    pub current_page: HtmlElement,
    pub total_pages: HtmlElement,
    pub nav_left: HtmlElement,
    pub nav_right: HtmlElement,
    pub header: Option<HtmlElement>,
    pub footer: Option<HtmlElement>,
    pub indicator: Option<HtmlElement>,
    pub loading: Option<HtmlElement>,
}

impl ViewerElements {
    pub fn from_ids(document: &Document, ids: &ElementIds) -> Result<Self> {
        Ok(Self {
            reading_area: required(document, &ids.reading_area)?,
            page_container: required(document, &ids.page_container)?,
            current_page: required(document, &ids.current_page)?,
            total_pages: required(document, &ids.total_pages)?,
            nav_left: required(document, &ids.nav_left)?,
            nav_right: required(document, &ids.nav_right)?,
            header: optional(document, &ids.header),
            footer: optional(document, &ids.footer),
            indicator: optional(document, &ids.indicator),
            loading: optional(document, &ids.loading),
        })
    }
}

fn optional(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

fn required(document: &Document, id: &str) -> Result<HtmlElement> {
    optional(document, id).ok_or_else(|| FolioError::MissingElement(id.to_string()))
}

pub(crate) fn js_error(e: JsValue) -> FolioError {
    FolioError::Host(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

fn span_of(element: &HtmlElement) -> Span {
    Span::new(element.offset_top() as f64, element.offset_height() as f64)
}

pub struct WebDocument {
    window: Window,
    document: Document,
    elements: ViewerElements,
    runtime: Weak<Runtime>,
    /// Load and error listeners for every image still in the document.
    image_listeners: HashMap<SlotId, [EventListener; 2]>,
}

impl WebDocument {
    pub fn new(window: Window, elements: ViewerElements) -> Result<Self> {
        let document = window
            .document()
            .ok_or_else(|| FolioError::MissingElement("document".into()))?;
        // Zoom and pan are expressed relative to the container's corner.
        elements
            .page_container
            .style()
            .set_property("transform-origin", "0 0")
            .map_err(js_error)?;
        Ok(Self {
            window,
            document,
            elements,
            runtime: Weak::new(),
            image_listeners: HashMap::new(),
        })
    }

    pub(crate) fn set_runtime(&mut self, runtime: Weak<Runtime>) {
        self.runtime = runtime;
    }

    pub(crate) fn detach_listeners(&mut self) {
        self.image_listeners.clear();
    }

    fn settle_listener(
        &self,
        image: &HtmlImageElement,
        slot: SlotId,
        kind: &'static str,
        outcome: ImageOutcome,
    ) -> EventListener {
        let runtime = self.runtime.clone();
        EventListener::once(image, kind, move |_| {
            if let Some(runtime) = runtime.upgrade() {
                runtime.dispatch(InputEvent::ImageSettled { slot, outcome });
            }
        })
    }
}

impl PageHost for WebDocument {
    type Image = HtmlImageElement;

    fn now_ms(&self) -> Millis {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or(0.0) as Millis
    }

    fn create_image(
        &mut self,
        slot: SlotId,
        index: usize,
        src: &str,
        alt: &str,
    ) -> Result<HtmlImageElement> {
        let image: HtmlImageElement = self
            .document
            .create_element("img")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| FolioError::Host("created element is not an image".into()))?;
        image.set_alt(alt);
        image.class_list().add_1(PAGE_IMAGE_CLASS).map_err(js_error)?;
        image
            .set_attribute("data-page", &(index + 1).to_string())
            .map_err(js_error)?;

        let listeners = [
            self.settle_listener(&image, slot, "load", ImageOutcome::Loaded),
            self.settle_listener(&image, slot, "error", ImageOutcome::Failed),
        ];
        self.image_listeners.insert(slot, listeners);
        // The fetch starts here, after both listeners are in place.
        image.set_src(src);
        Ok(image)
    }

    fn append_image(&mut self, image: &HtmlImageElement) {
        if let Err(e) = self.elements.page_container.append_child(image) {
            warn!(error = ?e, "Could not append page image");
        }
    }

    fn prepend_image(&mut self, image: &HtmlImageElement) {
        let first = self.elements.page_container.first_child();
        if let Err(e) = self
            .elements
            .page_container
            .insert_before(image, first.as_ref())
        {
            warn!(error = ?e, "Could not prepend page image");
        }
    }

    fn clear_images(&mut self) {
        self.elements.page_container.set_inner_html("");
        self.image_listeners.clear();
    }

    fn mark_failed(&mut self, image: &HtmlImageElement, alt: &str) {
        image.set_alt(alt);
        if let Err(e) = image.class_list().add_1(FAILED_IMAGE_CLASS) {
            warn!(error = ?e, "Could not mark page image as failed");
        }
    }

    fn image_span(&self, image: &HtmlImageElement) -> Span {
        span_of(image)
    }

    fn apply_transform(&mut self, transform: &ZoomPan) {
        if let Err(e) = self
            .elements
            .page_container
            .style()
            .set_property("transform", &transform.css())
        {
            warn!(error = ?e, "Could not apply page transform");
        }
    }

    fn prefetch(&mut self, src: &str) {
        match HtmlImageElement::new() {
            Ok(image) => image.set_src(src),
            Err(e) => warn!(error = ?e, src, "Could not prefetch page"),
        }
    }

    fn scroll_top(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }

    fn document_height(&self) -> f64 {
        self.document
            .document_element()
            .map(|root| root.scroll_height() as f64)
            .unwrap_or(0.0)
    }

    fn scroll_to(&mut self, top: f64) {
        self.window.scroll_to_with_x_and_y(0.0, top);
    }

    fn chrome(&self) -> ChromeLayout {
        ChromeLayout {
            header: self.elements.header.as_ref().map(span_of),
            footer: self.elements.footer.as_ref().map(span_of),
        }
    }

    fn reading_area_origin(&self) -> Point {
        let rect = self.elements.reading_area.get_bounding_client_rect();
        Point::new(rect.left(), rect.top())
    }

    fn set_current_page_label(&mut self, label: &str) {
        self.elements.current_page.set_text_content(Some(label));
    }

    fn set_total_pages_label(&mut self, label: &str) {
        self.elements.total_pages.set_text_content(Some(label));
    }

    fn set_indicator_visible(&mut self, visible: bool) {
        let Some(indicator) = &self.elements.indicator else {
            return;
        };
        let display = if visible { "block" } else { "none" };
        if let Err(e) = indicator.style().set_property("display", display) {
            warn!(error = ?e, "Could not toggle page indicator");
        }
    }

    fn set_loading(&mut self, loading: bool) {
        let Some(element) = &self.elements.loading else {
            return;
        };
        let classes = element.class_list();
        let result = if loading {
            classes.add_1(LOADING_ACTIVE_CLASS)
        } else {
            classes.remove_1(LOADING_ACTIVE_CLASS)
        };
        if let Err(e) = result {
            warn!(error = ?e, "Could not toggle loading indicator");
        }
    }
}
