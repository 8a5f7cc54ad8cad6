use async_trait::async_trait;

use crate::core::errors::OcrExecutionError;
use crate::core::models::{CapturedImage, ExtractionResult, OcrEngineHandle};

#[async_trait]
pub trait OcrService: Send + Sync {
    async fn extract_text_from_image(
        &self,
        engine: &OcrEngineHandle,
        image: &CapturedImage,
    ) -> Result<ExtractionResult, OcrExecutionError>;
}
