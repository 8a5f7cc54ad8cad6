use image::{DynamicImage, GenericImageView, RgbaImage};

/// Raster produced by a capture and threaded through preprocessing.
#[derive(Clone)]
pub struct CapturedImage {
    pixels: DynamicImage,
}

impl std::fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("color", &self.pixels.color())
            .finish()
    }
}

impl CapturedImage {
    pub fn from_dynamic(pixels: DynamicImage) -> Self {
        Self { pixels }
    }

    pub fn build_from_raw_rgba(width: u32, height: u32, raw_rgba_data: Vec<u8>) -> Option<Self> {
        log::debug!("[CAPTURED_IMAGE] building image: {}x{}", width, height);

        RgbaImage::from_raw(width, height, raw_rgba_data)
            .map(|buffer| Self::from_dynamic(DynamicImage::ImageRgba8(buffer)))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    pub fn into_pixels(self) -> DynamicImage {
        self.pixels
    }

    /// Copies out the `crop_width x crop_height` block at `(x, y)`.
    ///
    /// Returns `None` when the block does not lie fully inside the image.
    pub fn crop_region(&self, x: u32, y: u32, crop_width: u32, crop_height: u32) -> Option<Self> {
        if crop_width == 0 || crop_height == 0 {
            return None;
        }

        let fits_horizontally = x.checked_add(crop_width).is_some_and(|end| end <= self.width());
        let fits_vertically = y.checked_add(crop_height).is_some_and(|end| end <= self.height());
        if !fits_horizontally || !fits_vertically {
            log::debug!(
                "[CAPTURED_IMAGE] crop {}x{} at ({}, {}) exceeds {}x{}",
                crop_width,
                crop_height,
                x,
                y,
                self.width(),
                self.height()
            );
            return None;
        }

        Some(Self::from_dynamic(
            self.pixels.crop_imm(x, y, crop_width, crop_height),
        ))
    }

    /// Encodes the image as PNG bytes.
    pub fn encode_png(&self) -> image::ImageResult<Vec<u8>> {
        let mut buffer = Vec::new();
        self.pixels
            .write_to(&mut std::io::Cursor::new(&mut buffer), image::ImageFormat::Png)?;
        Ok(buffer)
    }
}
