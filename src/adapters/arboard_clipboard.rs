use std::sync::Mutex;

use arboard::Clipboard;

use crate::core::errors::ClipboardWriteError;
use crate::core::interfaces::ports::ClipboardWriter;
use crate::global_constants::LOG_TAG_CLIPBOARD;

/// System clipboard through `arboard`.
///
/// The `Clipboard` is kept alive for the whole session because on X11 and
/// Wayland the copied text disappears when its owner is dropped.
pub struct ArboardClipboard {
    clipboard: Mutex<Option<Clipboard>>,
}

impl ArboardClipboard {
    pub fn initialize() -> Self {
        let clipboard = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                log::warn!(
                    "{} Clipboard unavailable at startup, will retry on copy: {}",
                    LOG_TAG_CLIPBOARD,
                    e
                );
                None
            }
        };

        Self {
            clipboard: Mutex::new(clipboard),
        }
    }
}

impl ClipboardWriter for ArboardClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardWriteError> {
        let mut guard = self
            .clipboard
            .lock()
            .map_err(|_| ClipboardWriteError("clipboard state poisoned".to_string()))?;

        if guard.is_none() {
            *guard = Some(Clipboard::new().map_err(|e| ClipboardWriteError(e.to_string()))?);
        }

        match guard.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_owned())
                .map_err(|e| ClipboardWriteError(e.to_string())),
            None => Err(ClipboardWriteError("clipboard not available".to_string())),
        }
    }
}
