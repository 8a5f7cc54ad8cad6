use std::sync::Arc;

use crate::core::errors::ClipboardWriteError;
use crate::core::interfaces::ports::{ClipboardWriter, TextPanel};
use crate::core::models::ExtractionResult;
use crate::global_constants::{
    LOG_TAG_CLIPBOARD, STATUS_CLIPBOARD_FAILED, STATUS_NO_TEXT, STATUS_TEXT_COPIED,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryOutcome {
    Copied,
    CopiedEmpty,
    ClipboardFailed(ClipboardWriteError),
}

impl DeliveryOutcome {
    pub fn status_text(&self) -> &'static str {
        match self {
            DeliveryOutcome::Copied => STATUS_TEXT_COPIED,
            DeliveryOutcome::CopiedEmpty => STATUS_NO_TEXT,
            DeliveryOutcome::ClipboardFailed(_) => STATUS_CLIPBOARD_FAILED,
        }
    }
}

/// Puts a finished result in the panel and on the clipboard.
pub struct ResultSink {
    clipboard: Arc<dyn ClipboardWriter>,
}

impl ResultSink {
    pub fn new(clipboard: Arc<dyn ClipboardWriter>) -> Self {
        Self { clipboard }
    }

    /// The panel is always updated first; a clipboard failure is reported
    /// but never undoes it.
    pub fn deliver(&self, result: &ExtractionResult, panel: &mut dyn TextPanel) -> DeliveryOutcome {
        panel.replace_text(&result.text);

        match self.clipboard.write_text(&result.text) {
            Ok(()) if result.is_empty() => {
                log::info!("{} clipboard cleared, no text detected", LOG_TAG_CLIPBOARD);
                DeliveryOutcome::CopiedEmpty
            }
            Ok(()) => {
                log::info!(
                    "{} copied {} characters to clipboard",
                    LOG_TAG_CLIPBOARD,
                    result.text.chars().count()
                );
                DeliveryOutcome::Copied
            }
            Err(error) => {
                log::warn!("{} {}", LOG_TAG_CLIPBOARD, error);
                DeliveryOutcome::ClipboardFailed(error)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct RecordingClipboard {
        pub writes: Mutex<Vec<String>>,
        pub fail_with: Option<String>,
    }

    impl ClipboardWriter for RecordingClipboard {
        fn write_text(&self, text: &str) -> Result<(), ClipboardWriteError> {
            if let Some(reason) = &self.fail_with {
                return Err(ClipboardWriteError(reason.clone()));
            }
            self.writes.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct RecordingPanel {
        pub text: String,
        pub replacements: usize,
    }

    impl TextPanel for RecordingPanel {
        fn replace_text(&mut self, text: &str) {
            self.text = text.to_string();
            self.replacements += 1;
        }
    }
}
