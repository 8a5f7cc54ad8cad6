pub const APPLICATION_TITLE: &str = "Screenshot Text Extractor";
pub const APPLICATION_DIR_NAME: &str = "screen-text-extractor";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub const LOG_TAG_APP: &str = "[APP]";
pub const LOG_TAG_CAPTURE: &str = "[CAPTURE]";
pub const LOG_TAG_PREPROCESS: &str = "[PREPROCESS]";
pub const LOG_TAG_ENGINE_LOCATOR: &str = "[ENGINE_LOCATOR]";
pub const LOG_TAG_TESSERACT: &str = "[TESSERACT_OCR]";
pub const LOG_TAG_CLIPBOARD: &str = "[CLIPBOARD]";
pub const LOG_TAG_SELECTION: &str = "[SELECTION]";

pub const ENGINE_PATH_ENV_VAR: &str = "SCREEN_TEXT_EXTRACTOR_TESSERACT";
pub const BUNDLED_ENGINE_DIR_NAME: &str = "Tesseract-OCR";

#[cfg(target_os = "windows")]
pub const ENGINE_EXECUTABLE_NAME: &str = "tesseract.exe";
#[cfg(not(target_os = "windows"))]
pub const ENGINE_EXECUTABLE_NAME: &str = "tesseract";

#[cfg(target_os = "windows")]
pub const SYSTEM_ENGINE_DIRS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR",
    r"C:\Program Files (x86)\Tesseract-OCR",
];
#[cfg(not(target_os = "windows"))]
pub const SYSTEM_ENGINE_DIRS: &[&str] = &[
    "/usr/bin",
    "/usr/local/bin",
    "/opt/homebrew/bin",
    "/opt/local/bin",
];

pub const DEFAULT_OCR_LANGUAGE: &str = "eng";
pub const DEFAULT_OCR_ENGINE_MODE: u8 = 3;
pub const DEFAULT_PAGE_SEGMENTATION_MODE: u8 = 6;

pub const DEFAULT_THRESHOLD: u8 = 150;
pub const DEFAULT_UPSCALE_FACTOR: u32 = 2;
pub const MAX_UPSCALE_FACTOR: u32 = 8;
pub const DEFAULT_AUTO_CONTRAST_CUTOFF_PERCENT: f32 = 10.0;
pub const DEFAULT_MIN_SELECTION_SIZE: u32 = 5;
pub const DEFAULT_CAPTURE_DELAY_MS: u64 = 200;

pub const STATUS_READY: &str = "Ready.";
pub const STATUS_SELECTING: &str = "Click and drag to select region. Press Esc to cancel.";
pub const STATUS_SELECTION_CANCELLED: &str = "Selection cancelled.";
pub const STATUS_SELECTION_TOO_SMALL: &str = "Selection too small, please try again.";
pub const STATUS_CAPTURING: &str = "Capturing region...";
pub const STATUS_PROCESSING: &str = "Processing image...";
pub const STATUS_RECOGNIZING: &str = "Performing OCR...";
pub const STATUS_TEXT_COPIED: &str = "Text extracted and copied to clipboard.";
pub const STATUS_NO_TEXT: &str = "OCR finished, but no text detected.";
pub const STATUS_CLIPBOARD_FAILED: &str = "Text extracted (clipboard error).";
pub const STATUS_ABORTED: &str = "OCR aborted.";

pub const OVERLAY_BACKGROUND_RGBA: (f32, f32, f32, f32) = (0.3, 0.3, 0.3, 0.35);
pub const SELECTION_OUTLINE_RGB: (f32, f32, f32) = (1.0, 0.0, 0.0);
