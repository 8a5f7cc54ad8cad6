use std::path::PathBuf;

use crate::core::models::OcrEngineHandle;

/// A policy for finding the OCR engine binary.
pub trait EngineResolver: Send + Sync {
    /// Returns the first qualifying engine, or `None` when this policy has no
    /// usable candidate.
    fn resolve(&self) -> Option<OcrEngineHandle>;

    /// Locations this policy inspected, reported when nothing is found.
    fn searched_locations(&self) -> Vec<PathBuf>;
}
