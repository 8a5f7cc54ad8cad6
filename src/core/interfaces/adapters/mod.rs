mod engine_resolver;
mod ocr_service;

pub use engine_resolver::EngineResolver;
pub use ocr_service::OcrService;
