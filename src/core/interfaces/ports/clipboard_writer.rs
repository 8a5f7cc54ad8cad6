use crate::core::errors::ClipboardWriteError;

/// Write-only access to the system clipboard.
pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardWriteError>;
}
