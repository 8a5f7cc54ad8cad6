use std::fmt;
use std::path::{Path, PathBuf};

/// Where a resolved OCR engine binary was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineSource {
    Configured,
    Environment,
    Bundled,
    SearchPath,
    SystemDefault,
}

impl fmt::Display for EngineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineSource::Configured => write!(f, "configured path"),
            EngineSource::Environment => write!(f, "environment override"),
            EngineSource::Bundled => write!(f, "bundled"),
            EngineSource::SearchPath => write!(f, "system PATH"),
            EngineSource::SystemDefault => write!(f, "system install location"),
        }
    }
}

/// A validated path to an executable OCR engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrEngineHandle {
    executable: PathBuf,
    source: EngineSource,
}

impl OcrEngineHandle {
    pub fn new(executable: PathBuf, source: EngineSource) -> Self {
        Self { executable, source }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn source(&self) -> EngineSource {
        self.source
    }
}

/// Text recognized in one run. Empty text is a valid result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    pub text: String,
}

impl ExtractionResult {
    /// Strips the surrounding whitespace engines emit while keeping
    /// internal line breaks.
    pub fn from_engine_output(raw_output: &str) -> Self {
        Self {
            text: raw_output.trim().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
