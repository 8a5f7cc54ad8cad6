/// A rectangle of capture pixels, relative to the top-left pixel of the
/// display it was selected on.
///
/// `right` and `bottom` are exclusive, so the region covers
/// `(right - left) x (bottom - top)` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRegion {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ScreenRegion {
    /// Builds a region from two opposite corners in any order.
    ///
    /// Returns `None` for a zero-area selection.
    pub fn from_corners(first: (i32, i32), second: (i32, i32)) -> Option<Self> {
        let left = first.0.min(second.0);
        let top = first.1.min(second.1);
        let right = first.0.max(second.0);
        let bottom = first.1.max(second.1);

        if right == left || bottom == top {
            log::debug!(
                "[SCREEN_REGION] rejecting degenerate region ({}, {}) -> ({}, {})",
                left,
                top,
                right,
                bottom
            );
            return None;
        }

        Some(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    pub fn width(&self) -> u32 {
        self.right.abs_diff(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.abs_diff(self.top)
    }

    pub fn is_at_least(&self, min_size: u32) -> bool {
        self.width() >= min_size && self.height() >= min_size
    }
}
