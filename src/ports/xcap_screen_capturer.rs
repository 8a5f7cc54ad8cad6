use crate::core::errors::CaptureError;
use crate::core::interfaces::ports::ScreenCapturer;
use crate::core::models::{CaptureTarget, CapturedImage, DisplayGeometry, ScreenRegion};
use crate::global_constants::LOG_TAG_CAPTURE;

pub struct XcapScreenCapturer;

impl XcapScreenCapturer {
    pub fn initialize() -> Self {
        log::debug!("{} initializing xcap screen capturer", LOG_TAG_CAPTURE);
        Self
    }

    fn describe_monitor(&self, monitor: &xcap::Monitor) -> Result<DisplayGeometry, CaptureError> {
        let platform_error = |e: xcap::XCapError| CaptureError::Platform(e.to_string());

        let geometry = DisplayGeometry {
            x: monitor.x().map_err(platform_error)?,
            y: monitor.y().map_err(platform_error)?,
            logical_width: monitor.width().map_err(platform_error)?,
            logical_height: monitor.height().map_err(platform_error)?,
            scale_factor: monitor.scale_factor().map_err(platform_error)?,
        };

        log::debug!("{} monitor geometry: {:?}", LOG_TAG_CAPTURE, geometry);
        Ok(geometry)
    }

    fn find_monitor_for(
        &self,
        display: &DisplayGeometry,
    ) -> Result<xcap::Monitor, CaptureError> {
        let monitors =
            xcap::Monitor::all().map_err(|e| CaptureError::Platform(e.to_string()))?;

        let mut geometries = Vec::with_capacity(monitors.len());
        for monitor in &monitors {
            geometries.push(self.describe_monitor(monitor)?);
        }

        matching_display_index(&geometries, display)
            .and_then(|index| monitors.into_iter().nth(index))
            .ok_or_else(|| {
                log::error!(
                    "{} display {:?} is no longer attached",
                    LOG_TAG_CAPTURE,
                    display
                );
                CaptureError::NoDisplayAt {
                    x: display.x,
                    y: display.y,
                }
            })
    }

    fn capture_monitor_image(&self, monitor: &xcap::Monitor) -> Result<CapturedImage, CaptureError> {
        let image = monitor
            .capture_image()
            .map_err(|e| CaptureError::Platform(e.to_string()))?;

        let width_pixels = image.width();
        let height_pixels = image.height();
        log::info!(
            "{} captured {}x{} monitor frame",
            LOG_TAG_CAPTURE,
            width_pixels,
            height_pixels
        );

        CapturedImage::build_from_raw_rgba(width_pixels, height_pixels, image.into_raw()).ok_or_else(
            || CaptureError::Platform("monitor frame has an invalid pixel buffer".to_string()),
        )
    }
}

/// Position of `target` among the attached displays.
pub(crate) fn matching_display_index(
    displays: &[DisplayGeometry],
    target: &DisplayGeometry,
) -> Option<usize> {
    displays
        .iter()
        .position(|display| display.is_same_display(target))
}

/// Cuts `region` out of a full frame of the display it was selected on.
pub(crate) fn crop_frame_to_region(
    frame: &CapturedImage,
    region: &ScreenRegion,
) -> Result<CapturedImage, CaptureError> {
    let outside = || CaptureError::OutsideDisplays {
        left: region.left,
        top: region.top,
        right: region.right,
        bottom: region.bottom,
    };

    let offset_x = u32::try_from(region.left).map_err(|_| outside())?;
    let offset_y = u32::try_from(region.top).map_err(|_| outside())?;

    frame
        .crop_region(offset_x, offset_y, region.width(), region.height())
        .ok_or_else(outside)
}

impl ScreenCapturer for XcapScreenCapturer {
    fn display_at_point(&self, x: i32, y: i32) -> Result<DisplayGeometry, CaptureError> {
        let monitor = xcap::Monitor::from_point(x, y).map_err(|e| {
            log::error!("{} no monitor at ({}, {}): {}", LOG_TAG_CAPTURE, x, y, e);
            CaptureError::NoDisplayAt { x, y }
        })?;
        self.describe_monitor(&monitor)
    }

    fn capture_region(&self, target: &CaptureTarget) -> Result<CapturedImage, CaptureError> {
        log::debug!(
            "{} capturing region {:?} on display {:?}",
            LOG_TAG_CAPTURE,
            target.region,
            target.display
        );

        let monitor = self.find_monitor_for(&target.display)?;
        let frame = self.capture_monitor_image(&monitor)?;
        let captured = crop_frame_to_region(&frame, &target.region)?;

        log::info!(
            "{} captured region {}x{}",
            LOG_TAG_CAPTURE,
            captured.width(),
            captured.height()
        );
        Ok(captured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32) -> CapturedImage {
        CapturedImage::build_from_raw_rgba(width, height, vec![255u8; (width * height * 4) as usize])
            .unwrap()
    }

    fn display_at(x: i32, y: i32, width: u32, height: u32, scale_factor: f32) -> DisplayGeometry {
        DisplayGeometry {
            x,
            y,
            logical_width: width,
            logical_height: height,
            scale_factor,
        }
    }

    #[test]
    fn test_initialize_creates_capturer() {
        let capturer = XcapScreenCapturer::initialize();

        assert!(std::mem::size_of_val(&capturer) == 0);
    }

    #[test]
    fn test_crop_returns_exact_region_dimensions() {
        let frame = frame(200, 100);

        for (left, top, right, bottom) in [(0, 0, 1, 1), (10, 20, 60, 90), (0, 0, 200, 100)] {
            let region = ScreenRegion::from_corners((left, top), (right, bottom)).unwrap();

            let captured = crop_frame_to_region(&frame, &region).unwrap();

            assert_eq!(captured.width(), (right - left) as u32);
            assert_eq!(captured.height(), (bottom - top) as u32);
        }
    }

    #[test]
    fn test_crop_takes_pixels_at_local_offset() {
        let mut buffer = image::RgbaImage::from_pixel(40, 20, image::Rgba([0, 0, 0, 255]));
        buffer.put_pixel(30, 5, image::Rgba([255, 0, 0, 255]));
        let frame = CapturedImage::from_dynamic(image::DynamicImage::ImageRgba8(buffer));
        let region = ScreenRegion::from_corners((30, 5), (32, 7)).unwrap();

        let captured = crop_frame_to_region(&frame, &region).unwrap();

        assert_eq!(
            captured.pixels().to_rgba8().get_pixel(0, 0),
            &image::Rgba([255, 0, 0, 255])
        );
    }

    #[test]
    fn test_crop_outside_frame_is_capture_error() {
        let frame = frame(200, 100);
        let region = ScreenRegion::from_corners((150, 50), (250, 90)).unwrap();

        let error = crop_frame_to_region(&frame, &region).unwrap_err();

        assert!(matches!(error, CaptureError::OutsideDisplays { .. }));
    }

    #[test]
    fn test_crop_with_negative_offset_is_capture_error() {
        let frame = frame(200, 100);
        let region = ScreenRegion::from_corners((-50, 10), (20, 20)).unwrap();

        assert!(crop_frame_to_region(&frame, &region).is_err());
    }

    #[test]
    fn test_selection_on_standard_display_beside_hidpi_primary_uses_that_display() {
        let primary = display_at(0, 0, 1440, 900, 2.0);
        let secondary = display_at(1440, 0, 1920, 1080, 1.0);
        let attached = [primary, secondary];
        let region = ScreenRegion::from_corners((100, 100), (400, 300)).unwrap();

        let index = matching_display_index(&attached, &secondary).unwrap();
        let captured = crop_frame_to_region(
            &frame(secondary.pixel_width(), secondary.pixel_height()),
            &region,
        )
        .unwrap();

        assert_eq!(index, 1);
        assert_eq!((captured.width(), captured.height()), (300, 200));
    }

    #[test]
    fn test_detached_display_has_no_match() {
        let attached = [display_at(0, 0, 1440, 900, 2.0)];

        assert_eq!(
            matching_display_index(&attached, &display_at(1440, 0, 1920, 1080, 1.0)),
            None
        );
    }
}
