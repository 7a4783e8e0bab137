use tracing::debug;

use crate::geometry::Point;
use crate::gesture::{GestureAction, SwipeDirection};
use crate::host::PageHost;
use crate::input::Handled;

use super::Viewer;

impl<H: PageHost> Viewer<H> {
    pub(super) fn on_touch_start(&mut self, touches: &[Point]) -> Handled {
        let local: Vec<Point> = touches.iter().map(|p| self.to_local(*p)).collect();
        self.gestures.touch_start(&local, &self.state.transform);
        if local.len() >= 2 || self.state.transform.is_zoomed() {
            Handled::PreventDefault
        } else {
            Handled::Consumed
        }
    }

    pub(super) fn on_touch_move(&mut self, touches: &[Point]) -> Handled {
        let local: Vec<Point> = touches.iter().map(|p| self.to_local(*p)).collect();
        match self.gestures.touch_move(&local, &self.state.transform) {
            GestureAction::Transform(transform) => {
                self.set_transform(transform);
                Handled::PreventDefault
            }
            _ => Handled::Ignored,
        }
    }

    pub(super) fn on_touch_end(&mut self, point: Point, remaining: usize) -> Handled {
        let local = self.to_local(point);
        match self.gestures.touch_end(local, remaining) {
            GestureAction::Swipe { direction, start } => self.on_swipe(direction, start),
            GestureAction::Transform(transform) => {
                self.set_transform(transform);
                Handled::Consumed
            }
            GestureAction::None => Handled::Ignored,
        }
    }

    /// `start` is in reading-area coordinates, which do not move when the
    /// document scrolls.
    fn on_swipe(&mut self, direction: SwipeDirection, start: Point) -> Handled {
        let client_y = start.y + self.host.reading_area_origin().y;
        if !self.in_reading_area(client_y) {
            debug!(client_y, "Swipe outside reading area ignored");
            return Handled::Ignored;
        }
        match direction {
            SwipeDirection::Left => self.next_page(),
            SwipeDirection::Right => self.previous_page(),
        };
        Handled::Consumed
    }
}
