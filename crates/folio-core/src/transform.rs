use crate::geometry::Point;

/// Zoom and pan applied to the page region as one transform:
/// `screen = content * zoom + pan`, with the origin at the region's top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomPan {
    pub zoom: f64,
    pub pan: Point,
}

impl Default for ZoomPan {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomPan {
    pub const IDENTITY: Self = Self {
        zoom: 1.0,
        pan: Point::ZERO,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoom > 1.0
    }

    pub fn to_content(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.zoom,
            (screen.y - self.pan.y) / self.zoom,
        )
    }

    pub fn to_screen(&self, content: Point) -> Point {
        Point::new(
            content.x * self.zoom + self.pan.x,
            content.y * self.zoom + self.pan.y,
        )
    }

    /// Rescale to `new_zoom` while the content under `focus` stays put.
    pub fn zoomed_about(&self, focus: Point, new_zoom: f64) -> Self {
        let anchor = self.to_content(focus);
        Self {
            zoom: new_zoom,
            pan: Point::new(focus.x - anchor.x * new_zoom, focus.y - anchor.y * new_zoom),
        }
    }

    /// CSS `transform` value for this state.
    pub fn css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.pan.x, self.pan.y, self.zoom
        )
    }
}
