use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CaptureError {
    #[error("region ({left}, {top}) -> ({right}, {bottom}) is not inside any display")]
    OutsideDisplays {
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    },
    #[error("no display found at ({x}, {y})")]
    NoDisplayAt { x: i32, y: i32 },
    #[error("screen capture failed: {0}")]
    Platform(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("OCR engine not found (searched {} locations)", searched.len())]
pub struct EngineNotFoundError {
    pub searched: Vec<PathBuf>,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OcrExecutionError {
    #[error("failed to start OCR engine {executable}: {reason}")]
    Spawn {
        executable: PathBuf,
        reason: String,
        engine_missing: bool,
    },
    #[error("failed to encode image for OCR: {0}")]
    Encode(String),
    #[error("OCR engine exited with status {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("OCR engine I/O failed: {0}")]
    Io(String),
}

impl OcrExecutionError {
    /// True when the engine binary could not be found at launch time, which
    /// means a cached engine handle has gone stale.
    pub fn indicates_missing_engine(&self) -> bool {
        matches!(
            self,
            OcrExecutionError::Spawn {
                engine_missing: true,
                ..
            }
        )
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("could not write to clipboard: {0}")]
pub struct ClipboardWriteError(pub String);

/// Failures that end a capture run.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PipelineError {
    #[error("selection cancelled")]
    SelectionCancelled,
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    EngineNotFound(#[from] EngineNotFoundError),
    #[error(transparent)]
    OcrExecution(#[from] OcrExecutionError),
}

/// What the shell shows for a failed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFacingMessage {
    pub title: String,
    pub body: String,
}

impl PipelineError {
    /// `None` for outcomes that return to idle silently.
    pub fn user_message(&self) -> Option<UserFacingMessage> {
        match self {
            PipelineError::SelectionCancelled => None,
            PipelineError::Capture(error) => Some(UserFacingMessage {
                title: "Capture Error".to_string(),
                body: format!("Failed to capture the screen region:\n{}", error),
            }),
            PipelineError::EngineNotFound(_) => Some(UserFacingMessage {
                title: "Tesseract Not Found".to_string(),
                body: "Tesseract OCR executable could not be located.\n\n\
                       Please install the Tesseract OCR engine, or place it in a \
                       'Tesseract-OCR' folder next to this application, \
                       or add it to your system PATH."
                    .to_string(),
            }),
            PipelineError::OcrExecution(error) => Some(UserFacingMessage {
                title: "OCR Error".to_string(),
                body: format!("An error occurred during text recognition:\n{}", error),
            }),
        }
    }

    pub fn status_text(&self) -> &'static str {
        match self {
            PipelineError::SelectionCancelled => crate::global_constants::STATUS_SELECTION_CANCELLED,
            PipelineError::Capture(_) => "Error during capture.",
            PipelineError::EngineNotFound(_) => "Error: Tesseract not found.",
            PipelineError::OcrExecution(_) => "Error during OCR.",
        }
    }
}
