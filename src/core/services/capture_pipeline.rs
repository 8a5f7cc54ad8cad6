use std::sync::Arc;

use crate::core::errors::PipelineError;
use crate::core::interfaces::adapters::OcrService;
use crate::core::interfaces::ports::ScreenCapturer;
use crate::core::models::{CaptureTarget, CapturedImage, ExtractionResult};
use crate::core::services::{EngineCache, ImagePreprocessor};

/// The capture, preprocess and recognize stages of one run, shared by the
/// shell's background tasks.
#[derive(Clone)]
pub struct CapturePipeline {
    screen_capturer: Arc<dyn ScreenCapturer>,
    preprocessor: Arc<ImagePreprocessor>,
    engine_cache: Arc<EngineCache>,
    ocr_service: Arc<dyn OcrService>,
}

impl CapturePipeline {
    pub fn build(
        screen_capturer: Arc<dyn ScreenCapturer>,
        preprocessor: Arc<ImagePreprocessor>,
        engine_cache: Arc<EngineCache>,
        ocr_service: Arc<dyn OcrService>,
    ) -> Self {
        Self {
            screen_capturer,
            preprocessor,
            engine_cache,
            ocr_service,
        }
    }

    pub fn screen_capturer(&self) -> &Arc<dyn ScreenCapturer> {
        &self.screen_capturer
    }

    pub fn engine_cache(&self) -> &Arc<EngineCache> {
        &self.engine_cache
    }

    pub fn capture(&self, target: &CaptureTarget) -> Result<CapturedImage, PipelineError> {
        Ok(self.screen_capturer.capture_region(target)?)
    }

    pub fn preprocess(&self, image: CapturedImage) -> CapturedImage {
        self.preprocessor.process(image)
    }

    /// Resolves the engine (cached after the first success) and runs OCR.
    pub async fn recognize(&self, image: &CapturedImage) -> Result<ExtractionResult, PipelineError> {
        let engine = self.engine_cache.get_or_resolve()?;

        match self.ocr_service.extract_text_from_image(&engine, image).await {
            Ok(result) => Ok(result),
            Err(error) => {
                if error.indicates_missing_engine() {
                    self.engine_cache.invalidate();
                }
                Err(error.into())
            }
        }
    }

    /// All stages back to back, without any UI in between.
    #[allow(dead_code)]
    pub async fn run(&self, target: &CaptureTarget) -> Result<ExtractionResult, PipelineError> {
        let captured = self.capture(target)?;
        let processed = self.preprocess(captured);
        self.recognize(&processed).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    use async_trait::async_trait;
    use image::{DynamicImage, Rgba, RgbaImage};

    use super::*;
    use crate::core::errors::{CaptureError, OcrExecutionError};
    use crate::core::interfaces::adapters::EngineResolver;
    use crate::core::models::{DisplayGeometry, OcrEngineHandle, PreprocessSettings};

    /// A single 800x600 white display at the desktop origin.
    pub struct WhiteScreenCapturer;

    impl WhiteScreenCapturer {
        pub fn display() -> DisplayGeometry {
            DisplayGeometry {
                x: 0,
                y: 0,
                logical_width: 800,
                logical_height: 600,
                scale_factor: 1.0,
            }
        }
    }

    impl ScreenCapturer for WhiteScreenCapturer {
        fn display_at_point(&self, x: i32, y: i32) -> Result<DisplayGeometry, CaptureError> {
            let display = Self::display();
            if x < 0 || y < 0 || x >= 800 || y >= 600 {
                return Err(CaptureError::NoDisplayAt { x, y });
            }
            Ok(display)
        }

        fn capture_region(&self, target: &CaptureTarget) -> Result<CapturedImage, CaptureError> {
            let region = &target.region;
            if !Self::display().is_same_display(&target.display) {
                return Err(CaptureError::NoDisplayAt {
                    x: target.display.x,
                    y: target.display.y,
                });
            }
            if !Self::display().contains_local_region(region) {
                return Err(CaptureError::OutsideDisplays {
                    left: region.left,
                    top: region.top,
                    right: region.right,
                    bottom: region.bottom,
                });
            }
            let buffer =
                RgbaImage::from_pixel(region.width(), region.height(), Rgba([255, 255, 255, 255]));
            Ok(CapturedImage::from_dynamic(DynamicImage::ImageRgba8(buffer)))
        }
    }

    pub struct FixedResolver(pub Option<PathBuf>);

    impl EngineResolver for FixedResolver {
        fn resolve(&self) -> Option<OcrEngineHandle> {
            self.0
                .clone()
                .map(|path| OcrEngineHandle::new(path, crate::core::models::EngineSource::Configured))
        }

        fn searched_locations(&self) -> Vec<PathBuf> {
            self.0.iter().cloned().collect()
        }
    }

    pub struct CannedOcrService(pub Result<String, OcrExecutionError>);

    #[async_trait]
    impl OcrService for CannedOcrService {
        async fn extract_text_from_image(
            &self,
            _engine: &OcrEngineHandle,
            _image: &CapturedImage,
        ) -> Result<ExtractionResult, OcrExecutionError> {
            self.0
                .clone()
                .map(|text| ExtractionResult::from_engine_output(&text))
        }
    }

    pub fn pipeline_with(
        engine_path: Option<PathBuf>,
        ocr_service: Arc<dyn OcrService>,
    ) -> CapturePipeline {
        CapturePipeline::build(
            Arc::new(WhiteScreenCapturer),
            Arc::new(ImagePreprocessor::from_settings(&PreprocessSettings::default())),
            Arc::new(EngineCache::new(Arc::new(FixedResolver(engine_path)))),
            ocr_service,
        )
    }
}
