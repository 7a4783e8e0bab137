//! Pure layout questions answered from element bounds supplied by the host.
//!
//! All vertical positions are document coordinates (scroll offset included)
//! unless a parameter name says `client`.

use std::ops::{Add, Sub};

/// A position in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Vertical extent of an element (`offsetTop` / `offsetHeight`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Span {
    pub top: f64,
    pub height: f64,
}

impl Span {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Inclusive on both edges.
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y <= self.bottom()
    }
}

/// Header and footer bands. A missing element is `None` and occupies nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChromeLayout {
    pub header: Option<Span>,
    pub footer: Option<Span>,
}

impl ChromeLayout {
    /// Document height covered by the header, measured from the top.
    pub fn header_extent(&self) -> f64 {
        self.header.map_or(0.0, |h| h.bottom())
    }

    /// Where the footer band begins. Without a footer the band starts at the
    /// end of the document.
    pub fn footer_top(&self, document_height: f64) -> f64 {
        self.footer.map_or(document_height, |f| f.top)
    }

    pub fn reading_area(&self, document_height: f64) -> ReadingArea {
        ReadingArea {
            top: self.header_extent(),
            bottom: self.footer_top(document_height),
        }
    }
}

/// The band between header and footer where navigation input is honored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReadingArea {
    pub top: f64,
    pub bottom: f64,
}

impl ReadingArea {
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y <= self.bottom
    }
}

/// Whether a pointer at viewport-relative `client_y` lands in the reading area.
pub fn point_in_reading_area(
    client_y: f64,
    scroll_top: f64,
    chrome: &ChromeLayout,
    document_height: f64,
) -> bool {
    chrome
        .reading_area(document_height)
        .contains(client_y + scroll_top)
}

/// Viewport measurements used by the chrome visibility rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportMetrics {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ViewportMetrics {
    pub fn scroll_bottom(&self) -> f64 {
        self.scroll_top + self.viewport_height
    }

    /// Vertical midpoint of the visible area.
    pub fn center(&self) -> f64 {
        self.scroll_top + self.viewport_height / 2.0
    }
}

/// The page indicator is hidden while the view is mostly header or mostly
/// footer.
pub fn indicator_visible(
    metrics: &ViewportMetrics,
    chrome: &ChromeLayout,
    header_fraction: f64,
    footer_fraction: f64,
) -> bool {
    let vh = metrics.viewport_height;
    let in_header = metrics.scroll_bottom() < chrome.header_extent() + vh * header_fraction;
    let in_footer =
        metrics.scroll_top > chrome.footer_top(metrics.document_height) - vh * footer_fraction;
    !(in_header || in_footer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chrome() -> ChromeLayout {
        ChromeLayout {
            header: Some(Span::new(0.0, 200.0)),
            footer: Some(Span::new(3000.0, 300.0)),
        }
    }

    fn metrics(scroll_top: f64) -> ViewportMetrics {
        ViewportMetrics {
            scroll_top,
            viewport_height: 1000.0,
            document_height: 3300.0,
        }
    }

    #[test]
    fn test_click_in_header_rejected() {
        assert!(!point_in_reading_area(150.0, 0.0, &chrome(), 3300.0));
        assert!(point_in_reading_area(150.0, 100.0, &chrome(), 3300.0));
    }

    #[test]
    fn test_click_in_footer_rejected() {
        assert!(!point_in_reading_area(900.0, 2200.0, &chrome(), 3300.0));
        assert!(point_in_reading_area(700.0, 2200.0, &chrome(), 3300.0));
    }

    #[test]
    fn test_missing_chrome_is_whole_document() {
        let none = ChromeLayout::default();
        assert!(point_in_reading_area(0.0, 0.0, &none, 500.0));
        assert!(point_in_reading_area(500.0, 0.0, &none, 500.0));
        assert!(!point_in_reading_area(501.0, 0.0, &none, 500.0));
    }

    #[test]
    fn test_indicator_hidden_near_header() {
        // scroll bottom 1000 is past 200 + 300
        assert!(indicator_visible(&metrics(0.0), &chrome(), 0.3, 0.7));
        let tall_header = ChromeLayout {
            header: Some(Span::new(0.0, 800.0)),
            ..chrome()
        };
        assert!(!indicator_visible(&metrics(0.0), &tall_header, 0.3, 0.7));
    }

    #[test]
    fn test_indicator_hidden_near_footer() {
        // footer top 3000 - 700 = 2300
        assert!(indicator_visible(&metrics(2300.0), &chrome(), 0.3, 0.7));
        assert!(!indicator_visible(&metrics(2301.0), &chrome(), 0.3, 0.7));
    }

    #[test]
    fn test_point_helpers() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(6.0, 8.0);
        assert_eq!(a.distance(b), 10.0);
        assert_eq!(a.midpoint(b), Point::new(3.0, 4.0));
        assert_eq!(b - a, b);
    }
}
