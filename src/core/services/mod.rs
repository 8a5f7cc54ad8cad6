mod capture_pipeline;
mod engine_cache;
pub mod image_preprocessor;
mod result_sink;

pub use capture_pipeline::CapturePipeline;
pub use engine_cache::EngineCache;
pub use image_preprocessor::ImagePreprocessor;
pub use result_sink::{DeliveryOutcome, ResultSink};

#[cfg(test)]
pub(crate) use capture_pipeline::test_support as pipeline_test_support;
#[cfg(test)]
pub(crate) use result_sink::test_support as sink_test_support;
