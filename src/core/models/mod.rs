mod capture_target;
mod captured_image;
mod display_geometry;
mod ocr;
mod pipeline_state;
mod screen_region;
mod user_settings;

pub use capture_target::CaptureTarget;
pub use captured_image::CapturedImage;
pub use display_geometry::DisplayGeometry;
pub use ocr::{EngineSource, ExtractionResult, OcrEngineHandle};
pub use pipeline_state::PipelineState;
pub use screen_region::ScreenRegion;
pub use user_settings::{AppSettings, OcrSettings, PreprocessSettings, ThemeMode, UpscaleFilter};
