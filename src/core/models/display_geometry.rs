use crate::core::models::ScreenRegion;

/// One attached display as seen by the capture backend.
///
/// `x`/`y` is the desktop origin as the backend reports it and only serves to
/// identify the display. The logical size is what windows are laid out in; the
/// pixel size is what a capture of the display produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayGeometry {
    pub x: i32,
    pub y: i32,
    pub logical_width: u32,
    pub logical_height: u32,
    pub scale_factor: f32,
}

impl DisplayGeometry {
    pub fn pixel_width(&self) -> u32 {
        (self.logical_width as f32 * self.scale_factor).round() as u32
    }

    pub fn pixel_height(&self) -> u32 {
        (self.logical_height as f32 * self.scale_factor).round() as u32
    }

    /// Same origin and logical size. Scale is left out since it is a float
    /// and may be re-reported with rounding noise.
    pub fn is_same_display(&self, other: &DisplayGeometry) -> bool {
        self.x == other.x
            && self.y == other.y
            && self.logical_width == other.logical_width
            && self.logical_height == other.logical_height
    }

    /// `region` is in this display's own pixels.
    pub fn contains_local_region(&self, region: &ScreenRegion) -> bool {
        region.left >= 0
            && region.top >= 0
            && region.right as i64 <= self.pixel_width() as i64
            && region.bottom as i64 <= self.pixel_height() as i64
    }

    /// Maps a point on an overlay of `surface_width x surface_height` logical
    /// units covering this display onto this display's capture pixels.
    pub fn surface_point_to_local_pixels(
        &self,
        point_x: f32,
        point_y: f32,
        surface_width: f32,
        surface_height: f32,
    ) -> (i32, i32) {
        let scale_x = if surface_width > 0.0 {
            self.pixel_width() as f32 / surface_width
        } else {
            self.scale_factor
        };
        let scale_y = if surface_height > 0.0 {
            self.pixel_height() as f32 / surface_height
        } else {
            self.scale_factor
        };

        let pixel_x = (point_x.max(0.0) * scale_x).round() as i32;
        let pixel_y = (point_y.max(0.0) * scale_y).round() as i32;

        (
            pixel_x.min(self.pixel_width() as i32),
            pixel_y.min(self.pixel_height() as i32),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidpi_display() -> DisplayGeometry {
        DisplayGeometry {
            x: 0,
            y: 0,
            logical_width: 1440,
            logical_height: 900,
            scale_factor: 2.0,
        }
    }

    fn standard_display_right_of_hidpi() -> DisplayGeometry {
        DisplayGeometry {
            x: 1440,
            y: 0,
            logical_width: 1920,
            logical_height: 1080,
            scale_factor: 1.0,
        }
    }

    #[test]
    fn test_pixel_size_applies_scale_factor() {
        let display = hidpi_display();

        assert_eq!(display.pixel_width(), 2880);
        assert_eq!(display.pixel_height(), 1800);
    }

    #[test]
    fn test_contains_local_region_inside_and_outside() {
        let display = standard_display_right_of_hidpi();

        let inside = ScreenRegion::from_corners((10, 10), (110, 110)).unwrap();
        let past_right_edge = ScreenRegion::from_corners((1900, 10), (1930, 110)).unwrap();
        let negative = ScreenRegion::from_corners((-10, 10), (100, 110)).unwrap();

        assert!(display.contains_local_region(&inside));
        assert!(!display.contains_local_region(&past_right_edge));
        assert!(!display.contains_local_region(&negative));
    }

    #[test]
    fn test_surface_point_to_local_pixels_scales_to_capture_pixels() {
        let display = hidpi_display();

        let point = display.surface_point_to_local_pixels(100.0, 50.0, 1440.0, 900.0);

        assert_eq!(point, (200, 100));
    }

    #[test]
    fn test_surface_point_to_local_pixels_clamps_to_display() {
        let display = hidpi_display();

        let point = display.surface_point_to_local_pixels(5000.0, -20.0, 1440.0, 900.0);

        assert_eq!(point, (2880, 0));
    }

    #[test]
    fn test_secondary_display_points_stay_local_next_to_hidpi_primary() {
        let secondary = standard_display_right_of_hidpi();

        let first = secondary.surface_point_to_local_pixels(100.0, 100.0, 1920.0, 1080.0);
        let second = secondary.surface_point_to_local_pixels(400.0, 300.0, 1920.0, 1080.0);

        assert_eq!((first, second), ((100, 100), (400, 300)));
    }

    #[test]
    fn test_is_same_display_distinguishes_mixed_scale_neighbours() {
        let primary = hidpi_display();
        let secondary = standard_display_right_of_hidpi();
        let secondary_rereported = DisplayGeometry {
            scale_factor: 1.0000001,
            ..secondary
        };

        assert!(!primary.is_same_display(&secondary));
        assert!(secondary.is_same_display(&secondary_rereported));
    }
}
