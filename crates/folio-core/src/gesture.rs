//! Touch interpretation: swipe-to-turn, pinch zoom, and drag panning.
//!
//! The interpreter only turns touch points into [`GestureAction`]s. It never
//! touches the document or the page state; the viewer decides what a swipe
//! means and where the reading area is.

use crate::config::GestureConfig;
use crate::geometry::Point;
use crate::transform::ZoomPan;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger travelled right-to-left.
    Left,
    /// Finger travelled left-to-right.
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureAction {
    None,
    /// A completed horizontal swipe. `start` is where the finger went down.
    Swipe {
        direction: SwipeDirection,
        start: Point,
    },
    /// New zoom/pan to apply to the page region.
    Transform(ZoomPan),
}

#[derive(Clone, Copy, Debug)]
struct PinchStart {
    distance: f64,
    transform: ZoomPan,
    midpoint: Point,
}

#[derive(Clone, Copy, Debug)]
struct DragStart {
    origin: Point,
    pan: Point,
}

#[derive(Clone, Copy, Debug)]
enum Phase {
    Idle,
    /// One finger down. `drag` is set when the page was zoomed at touch start.
    Touch {
        start: Point,
        drag: Option<DragStart>,
    },
    Pinch(PinchStart),
    /// A pinch ended but fingers are still down; nothing more happens until
    /// they all lift.
    Spent,
}

#[derive(Debug)]
pub struct GestureInterpreter {
    config: GestureConfig,
    phase: Phase,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self {
            config: GestureConfig::default(),
            phase: Phase::Idle,
        }
    }
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install thresholds and zoom bounds. Any gesture in progress is dropped.
    pub fn configure(&mut self, config: GestureConfig) {
        self.config = config;
        self.phase = Phase::Idle;
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn touch_start(&mut self, touches: &[Point], current: &ZoomPan) {
        match touches {
            [] => {}
            [point] => {
                let drag = current.is_zoomed().then_some(DragStart {
                    origin: *point,
                    pan: current.pan,
                });
                self.phase = Phase::Touch {
                    start: *point,
                    drag,
                };
            }
            [a, b, ..] => {
                let distance = a.distance(*b);
                if distance > 0.0 {
                    self.phase = Phase::Pinch(PinchStart {
                        distance,
                        transform: *current,
                        midpoint: a.midpoint(*b),
                    });
                } else {
                    self.phase = Phase::Spent;
                }
            }
        }
    }

    pub fn touch_move(&mut self, touches: &[Point], current: &ZoomPan) -> GestureAction {
        match (self.phase, touches) {
            (Phase::Pinch(pinch), [a, b, ..]) => {
                let scale = a.distance(*b) / pinch.distance;
                let zoom = (pinch.transform.zoom * scale)
                    .clamp(self.config.min_zoom, self.config.max_zoom);
                let next = pinch.transform.zoomed_about(pinch.midpoint, zoom);
                // One finger cannot pan an unzoomed page, so leave nothing to undo.
                if next.is_zoomed() {
                    GestureAction::Transform(next)
                } else {
                    GestureAction::Transform(ZoomPan {
                        zoom,
                        pan: Point::ZERO,
                    })
                }
            }
            (
                Phase::Touch {
                    drag: Some(drag), ..
                },
                [point],
            ) => {
                let delta = *point - drag.origin;
                GestureAction::Transform(ZoomPan {
                    zoom: current.zoom,
                    pan: drag.pan + delta,
                })
            }
            _ => GestureAction::None,
        }
    }

    pub fn touch_end(&mut self, point: Point, remaining: usize) -> GestureAction {
        match self.phase {
            Phase::Touch { start, drag } if remaining == 0 => {
                self.phase = Phase::Idle;
                if drag.is_some() {
                    return GestureAction::None;
                }
                let dx = start.x - point.x;
                if dx.abs() > self.config.swipe_threshold_px {
                    let direction = if dx > 0.0 {
                        SwipeDirection::Left
                    } else {
                        SwipeDirection::Right
                    };
                    return GestureAction::Swipe { direction, start };
                }
                GestureAction::None
            }
            Phase::Pinch(_) | Phase::Spent | Phase::Touch { .. } => {
                self.phase = if remaining == 0 {
                    Phase::Idle
                } else {
                    Phase::Spent
                };
                GestureAction::None
            }
            Phase::Idle => GestureAction::None,
        }
    }
}
