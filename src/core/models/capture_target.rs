use crate::core::models::{DisplayGeometry, ScreenRegion};

/// A finished selection: the display it was drawn on and the region in that
/// display's own capture pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureTarget {
    pub display: DisplayGeometry,
    pub region: ScreenRegion,
}

impl CaptureTarget {
    pub fn new(display: DisplayGeometry, region: ScreenRegion) -> Self {
        Self { display, region }
    }
}
