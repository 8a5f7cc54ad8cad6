use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::core::errors::OcrExecutionError;
use crate::core::interfaces::adapters::OcrService;
use crate::core::models::{CapturedImage, ExtractionResult, OcrEngineHandle, OcrSettings};
use crate::global_constants::LOG_TAG_TESSERACT;

#[cfg(target_os = "windows")]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Runs the Tesseract CLI as `<engine> stdin stdout <args>`, feeding PNG bytes
/// on stdin and reading the recognized text from stdout.
pub struct TesseractOcrService {
    engine_args: Vec<String>,
}

impl TesseractOcrService {
    pub fn build(settings: &OcrSettings) -> Self {
        let engine_args = settings.to_engine_args();
        log::info!(
            "{} Initializing Tesseract OCR service with args {:?}",
            LOG_TAG_TESSERACT,
            engine_args
        );
        Self { engine_args }
    }

    fn build_command(&self, engine: &OcrEngineHandle) -> Command {
        let mut command = Command::new(engine.executable());
        command
            .arg("stdin")
            .arg("stdout")
            .args(&self.engine_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(target_os = "windows")]
        command.creation_flags(CREATE_NO_WINDOW);

        command
    }
}

#[async_trait]
impl OcrService for TesseractOcrService {
    async fn extract_text_from_image(
        &self,
        engine: &OcrEngineHandle,
        image: &CapturedImage,
    ) -> Result<ExtractionResult, OcrExecutionError> {
        log::info!("{} Starting text extraction", LOG_TAG_TESSERACT);
        log::debug!(
            "{} Image dimensions: {}x{}",
            LOG_TAG_TESSERACT,
            image.width(),
            image.height()
        );

        let png_bytes = image
            .encode_png()
            .map_err(|e| OcrExecutionError::Encode(e.to_string()))?;

        let mut child = self.build_command(engine).spawn().map_err(|e| {
            log::error!(
                "{} Failed to start {:?}: {}",
                LOG_TAG_TESSERACT,
                engine.executable(),
                e
            );
            OcrExecutionError::Spawn {
                executable: engine.executable().to_path_buf(),
                reason: e.to_string(),
                engine_missing: e.kind() == std::io::ErrorKind::NotFound,
            }
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            // The engine may exit before reading everything; its exit status
            // is the authoritative failure signal.
            if let Err(e) = stdin.write_all(&png_bytes).await {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(OcrExecutionError::Io(e.to_string()));
                }
                log::warn!("{} Engine closed stdin early", LOG_TAG_TESSERACT);
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| OcrExecutionError::Io(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            log::error!(
                "{} Engine exited with {}: {}",
                LOG_TAG_TESSERACT,
                output.status,
                stderr
            );
            return Err(OcrExecutionError::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }

        let extracted_text = String::from_utf8_lossy(&output.stdout);
        let result = ExtractionResult::from_engine_output(&extracted_text);

        log::info!(
            "{} Text extraction complete. Extracted {} characters",
            LOG_TAG_TESSERACT,
            result.text.chars().count()
        );
        log::debug!("{} Extracted text: {}", LOG_TAG_TESSERACT, result.text);

        Ok(result)
    }
}
