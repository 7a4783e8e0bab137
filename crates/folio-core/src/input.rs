use crate::geometry::Point;
use crate::registry::SlotId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Left or right click target beside the pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavZone {
    Left,
    Right,
}

/// How an image fetch ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageOutcome {
    Loaded,
    Failed,
}

/// Everything the host forwards to the viewer. Positions are client
/// coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Scroll,
    Key(NavKey),
    Click { zone: NavZone, client_y: f64 },
    /// `touches` lists every finger currently down.
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point> },
    /// `point` is the finger that lifted; `remaining` counts fingers still down.
    TouchEnd { point: Point, remaining: usize },
    ContextMenu,
    ImageSettled { slot: SlotId, outcome: ImageOutcome },
}

/// What the host should do with the originating browser event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handled {
    /// Not acted on.
    Ignored,
    /// Acted on; the browser default may proceed.
    Consumed,
    /// Acted on; the host should cancel the browser default.
    PreventDefault,
}
