mod arboard_clipboard;
mod engine_locator;
pub mod screen_capture_permission;
mod tesseract_ocr_service;

pub use arboard_clipboard::ArboardClipboard;
pub use engine_locator::ChainedEngineResolver;
pub use tesseract_ocr_service::TesseractOcrService;
