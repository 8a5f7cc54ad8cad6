use crate::core::errors::CaptureError;
use crate::core::models::{CaptureTarget, CapturedImage, DisplayGeometry};

pub trait ScreenCapturer: Send + Sync {
    /// Geometry of the display containing the desktop point `(x, y)`.
    fn display_at_point(&self, x: i32, y: i32) -> Result<DisplayGeometry, CaptureError>;

    /// Captures exactly the pixels covered by the target's region, taken from
    /// the target's display only.
    fn capture_region(&self, target: &CaptureTarget) -> Result<CapturedImage, CaptureError>;
}
