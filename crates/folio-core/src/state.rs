use crate::transform::ZoomPan;

/// Mutable reader-facing state owned by a viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerState {
    pub current_page: usize,
    pub infinite_scroll: bool,
    pub transform: ZoomPan,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            current_page: 0,
            infinite_scroll: true,
            transform: ZoomPan::IDENTITY,
        }
    }
}
