use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};

use crate::core::models::{CapturedImage, PreprocessSettings};
use crate::global_constants::{LOG_TAG_PREPROCESS, MAX_UPSCALE_FACTOR};

/// One pure image transform in the preprocessing chain.
pub trait PreprocessStep: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, image: CapturedImage) -> CapturedImage;
}

/// Single-channel luminance-weighted grayscale.
pub struct GrayscaleStep;

impl PreprocessStep for GrayscaleStep {
    fn name(&self) -> &'static str {
        "grayscale"
    }

    fn apply(&self, image: CapturedImage) -> CapturedImage {
        CapturedImage::from_dynamic(DynamicImage::ImageLuma8(image.pixels().to_luma8()))
    }
}

/// Stretches the luminance histogram after clipping `cutoff_percent` of the
/// darkest and brightest pixels.
pub struct AutoContrastStep {
    pub cutoff_percent: f32,
}

impl AutoContrastStep {
    fn stretch_bounds(&self, luma: &GrayImage) -> Option<(u8, u8)> {
        let mut histogram = [0u64; 256];
        for pixel in luma.pixels() {
            histogram[pixel.0[0] as usize] += 1;
        }

        let total: u64 = histogram.iter().sum();
        let clip = ((total as f64) * (self.cutoff_percent.clamp(0.0, 49.0) as f64) / 100.0) as u64;

        let mut low = 0usize;
        let mut skipped = 0u64;
        while low < 255 && skipped + histogram[low] <= clip {
            skipped += histogram[low];
            low += 1;
        }

        let mut high = 255usize;
        skipped = 0;
        while high > 0 && skipped + histogram[high] <= clip {
            skipped += histogram[high];
            high -= 1;
        }

        (high > low).then_some((low as u8, high as u8))
    }
}

impl PreprocessStep for AutoContrastStep {
    fn name(&self) -> &'static str {
        "auto-contrast"
    }

    fn apply(&self, image: CapturedImage) -> CapturedImage {
        let mut luma = image.into_pixels().into_luma8();

        if let Some((low, high)) = self.stretch_bounds(&luma) {
            let span = (high - low) as f32;
            for pixel in luma.pixels_mut() {
                let value = pixel.0[0].clamp(low, high);
                pixel.0[0] = (((value - low) as f32) * 255.0 / span).round() as u8;
            }
        }

        CapturedImage::from_dynamic(DynamicImage::ImageLuma8(luma))
    }
}

/// Binarizes: values above `cut_point` become white, the rest black.
pub struct ThresholdStep {
    pub cut_point: u8,
}

impl PreprocessStep for ThresholdStep {
    fn name(&self) -> &'static str {
        "threshold"
    }

    fn apply(&self, image: CapturedImage) -> CapturedImage {
        let mut luma = image.into_pixels().into_luma8();
        for pixel in luma.pixels_mut() {
            pixel.0[0] = if pixel.0[0] > self.cut_point { 255 } else { 0 };
        }
        CapturedImage::from_dynamic(DynamicImage::ImageLuma8(luma))
    }
}

/// Integer upscale; a factor of 1 or less leaves the image untouched.
pub struct UpscaleStep {
    pub factor: u32,
    pub filter: FilterType,
}

impl PreprocessStep for UpscaleStep {
    fn name(&self) -> &'static str {
        "upscale"
    }

    fn apply(&self, image: CapturedImage) -> CapturedImage {
        if self.factor <= 1 {
            return image;
        }

        let target_width = image.width().saturating_mul(self.factor);
        let target_height = image.height().saturating_mul(self.factor);
        CapturedImage::from_dynamic(image.pixels().resize_exact(
            target_width,
            target_height,
            self.filter,
        ))
    }
}

/// The ordered preprocessing chain run before OCR.
pub struct ImagePreprocessor {
    steps: Vec<Box<dyn PreprocessStep>>,
}

impl ImagePreprocessor {
    pub fn with_steps(steps: Vec<Box<dyn PreprocessStep>>) -> Self {
        Self { steps }
    }

    pub fn from_settings(settings: &PreprocessSettings) -> Self {
        let mut steps: Vec<Box<dyn PreprocessStep>> = Vec::new();

        if settings.grayscale {
            steps.push(Box::new(GrayscaleStep));
        }
        if settings.auto_contrast {
            steps.push(Box::new(AutoContrastStep {
                cutoff_percent: settings.auto_contrast_cutoff_percent,
            }));
        }
        steps.push(Box::new(ThresholdStep {
            cut_point: settings.threshold,
        }));
        let upscale_factor = settings.upscale_factor.clamp(1, MAX_UPSCALE_FACTOR);
        if upscale_factor != settings.upscale_factor {
            log::warn!(
                "{} upscale factor {} out of range, using {}",
                LOG_TAG_PREPROCESS,
                settings.upscale_factor,
                upscale_factor
            );
        }
        if upscale_factor > 1 {
            steps.push(Box::new(UpscaleStep {
                factor: upscale_factor,
                filter: settings.upscale_filter.into(),
            }));
        }

        Self::with_steps(steps)
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    pub fn process(&self, image: CapturedImage) -> CapturedImage {
        if image.is_empty() {
            log::warn!("{} skipping empty image", LOG_TAG_PREPROCESS);
            return image;
        }

        log::info!(
            "{} preprocessing {}x{} image through {:?}",
            LOG_TAG_PREPROCESS,
            image.width(),
            image.height(),
            self.step_names()
        );

        self.steps.iter().fold(image, |current, step| {
            let next = step.apply(current);
            log::debug!(
                "{} after {}: {}x{}",
                LOG_TAG_PREPROCESS,
                step.name(),
                next.width(),
                next.height()
            );
            next
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::UpscaleFilter;
    use image::{Rgba, RgbaImage};

    fn gradient_image(width: u32, height: u32) -> CapturedImage {
        let buffer = RgbaImage::from_fn(width, height, |x, y| {
            let value = ((x * 7 + y * 13) % 256) as u8;
            Rgba([value, value.wrapping_mul(3), 255 - value, 255])
        });
        CapturedImage::from_dynamic(DynamicImage::ImageRgba8(buffer))
    }

    fn luma_values(image: &CapturedImage) -> Vec<u8> {
        image.pixels().to_luma8().into_raw()
    }

    #[test]
    fn test_grayscale_produces_single_channel_luma() {
        let result = GrayscaleStep.apply(gradient_image(8, 4));

        assert!(matches!(result.pixels(), DynamicImage::ImageLuma8(_)));
        assert_eq!((result.width(), result.height()), (8, 4));
    }

    #[test]
    fn test_grayscale_weights_green_above_blue() {
        let green = RgbaImage::from_pixel(1, 1, Rgba([0, 255, 0, 255]));
        let blue = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 255, 255]));

        let green_luma = luma_values(&GrayscaleStep.apply(CapturedImage::from_dynamic(
            DynamicImage::ImageRgba8(green),
        )));
        let blue_luma = luma_values(&GrayscaleStep.apply(CapturedImage::from_dynamic(
            DynamicImage::ImageRgba8(blue),
        )));

        assert!(green_luma[0] > blue_luma[0]);
    }

    #[test]
    fn test_threshold_binarizes_around_cut_point() {
        let luma = GrayImage::from_raw(4, 1, vec![0, 150, 151, 255]).unwrap();
        let image = CapturedImage::from_dynamic(DynamicImage::ImageLuma8(luma));

        let result = ThresholdStep { cut_point: 150 }.apply(image);

        assert_eq!(luma_values(&result), vec![0, 0, 255, 255]);
    }

    #[test]
    fn test_threshold_is_idempotent_on_binarized_input() {
        let step = ThresholdStep { cut_point: 150 };
        let once = step.apply(GrayscaleStep.apply(gradient_image(32, 16)));

        let twice = step.apply(once.clone());

        assert_eq!(once.pixels().as_bytes(), twice.pixels().as_bytes());
    }

    #[test]
    fn test_upscale_multiplies_dimensions() {
        let step = UpscaleStep {
            factor: 3,
            filter: FilterType::Nearest,
        };

        let result = step.apply(gradient_image(10, 7));

        assert_eq!((result.width(), result.height()), (30, 21));
    }

    #[test]
    fn test_nearest_upscale_keeps_binary_values() {
        let binary = ThresholdStep { cut_point: 150 }.apply(gradient_image(16, 16));
        let step = UpscaleStep {
            factor: 2,
            filter: FilterType::Nearest,
        };

        let result = step.apply(binary);

        assert!(luma_values(&result).iter().all(|value| *value == 0 || *value == 255));
    }

    #[test]
    fn test_upscale_factor_one_is_noop() {
        let image = gradient_image(5, 5);
        let step = UpscaleStep {
            factor: 1,
            filter: FilterType::Lanczos3,
        };

        let result = step.apply(image.clone());

        assert_eq!(result.pixels().as_bytes(), image.pixels().as_bytes());
    }

    #[test]
    fn test_auto_contrast_stretches_narrow_range_to_full_range() {
        let luma = GrayImage::from_raw(4, 1, vec![100, 110, 120, 130]).unwrap();
        let step = AutoContrastStep {
            cutoff_percent: 0.0,
        };

        let result = step.apply(CapturedImage::from_dynamic(DynamicImage::ImageLuma8(luma)));

        let values = luma_values(&result);
        assert_eq!(values[0], 0);
        assert_eq!(values[3], 255);
    }

    #[test]
    fn test_auto_contrast_leaves_flat_image_unchanged() {
        let luma = GrayImage::from_pixel(3, 3, image::Luma([90]));
        let step = AutoContrastStep {
            cutoff_percent: 10.0,
        };

        let result = step.apply(CapturedImage::from_dynamic(DynamicImage::ImageLuma8(luma)));

        assert!(luma_values(&result).iter().all(|value| *value == 90));
    }

    #[test]
    fn test_from_settings_orders_default_steps() {
        let preprocessor = ImagePreprocessor::from_settings(&PreprocessSettings::default());

        assert_eq!(preprocessor.step_names(), vec!["grayscale", "threshold", "upscale"]);
    }

    #[test]
    fn test_from_settings_inserts_auto_contrast_before_threshold() {
        let settings = PreprocessSettings {
            auto_contrast: true,
            upscale_factor: 1,
            ..PreprocessSettings::default()
        };

        let preprocessor = ImagePreprocessor::from_settings(&settings);

        assert_eq!(
            preprocessor.step_names(),
            vec!["grayscale", "auto-contrast", "threshold"]
        );
    }

    #[test]
    fn test_from_settings_caps_oversized_upscale_factor() {
        let settings = PreprocessSettings {
            upscale_factor: 1000,
            ..PreprocessSettings::default()
        };
        let preprocessor = ImagePreprocessor::from_settings(&settings);

        let result = preprocessor.process(gradient_image(10, 5));

        assert_eq!(
            (result.width(), result.height()),
            (10 * MAX_UPSCALE_FACTOR, 5 * MAX_UPSCALE_FACTOR)
        );
    }

    #[test]
    fn test_from_settings_treats_zero_upscale_factor_as_one() {
        let settings = PreprocessSettings {
            upscale_factor: 0,
            ..PreprocessSettings::default()
        };

        let preprocessor = ImagePreprocessor::from_settings(&settings);

        assert_eq!(preprocessor.step_names(), vec!["grayscale", "threshold"]);
    }

    #[test]
    fn test_process_passes_empty_image_through() {
        let preprocessor = ImagePreprocessor::from_settings(&PreprocessSettings::default());
        let empty = CapturedImage::from_dynamic(DynamicImage::ImageRgba8(RgbaImage::new(0, 0)));

        let result = preprocessor.process(empty);

        assert!(result.is_empty());
        assert!(matches!(result.pixels(), DynamicImage::ImageRgba8(_)));
    }

    #[test]
    fn test_process_is_deterministic() {
        let settings = PreprocessSettings {
            auto_contrast: true,
            upscale_filter: UpscaleFilter::Lanczos3,
            ..PreprocessSettings::default()
        };
        let preprocessor = ImagePreprocessor::from_settings(&settings);

        let first = preprocessor.process(gradient_image(40, 20));
        let second = preprocessor.process(gradient_image(40, 20));

        assert_eq!(first.pixels().as_bytes(), second.pixels().as_bytes());
        assert_eq!((first.width(), first.height()), (80, 40));
    }
}
