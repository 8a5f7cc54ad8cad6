use std::sync::Arc;

use iced::window::Id;
use iced::{Element, Task};

use crate::adapters::{ArboardClipboard, ChainedEngineResolver, TesseractOcrService};
use crate::core::models::AppSettings;
use crate::core::orchestrators::app_orchestrator::{AppOrchestrator, OrchestratorMessage};
use crate::core::services::{CapturePipeline, EngineCache, ImagePreprocessor};
use crate::global_constants::LOG_TAG_APP;
use crate::ports::{SystemMousePositionProvider, XcapScreenCapturer};

pub struct TextExtractorApp {
    orchestrator: AppOrchestrator,
}

impl TextExtractorApp {
    pub fn build() -> (Self, Task<OrchestratorMessage>) {
        log::info!("{} Initializing application", LOG_TAG_APP);

        let settings = AppSettings::load().unwrap_or_else(|e| {
            log::warn!("{} Failed to load settings: {:#}, using defaults", LOG_TAG_APP, e);
            AppSettings::default()
        });

        let engine_cache = Arc::new(EngineCache::new(Arc::new(
            ChainedEngineResolver::from_environment(&settings),
        )));
        let preprocessor = Arc::new(ImagePreprocessor::from_settings(&settings.preprocessing));
        log::info!(
            "{} Preprocessing steps: {:?}",
            LOG_TAG_APP,
            preprocessor.step_names()
        );

        let pipeline = CapturePipeline::build(
            Arc::new(XcapScreenCapturer::initialize()),
            preprocessor,
            engine_cache,
            Arc::new(TesseractOcrService::build(&settings.ocr)),
        );

        let orchestrator = AppOrchestrator::build(
            pipeline,
            Arc::new(SystemMousePositionProvider::initialize()),
            Arc::new(ArboardClipboard::initialize()),
            settings,
        );

        let startup = Task::batch(vec![
            Task::done(OrchestratorMessage::OpenMainWindow),
            orchestrator.probe_engine(),
        ]);

        (Self { orchestrator }, startup)
    }

    pub fn window_title(&self, window_id: Id) -> String {
        self.orchestrator.get_window_title(window_id)
    }

    pub fn handle_update(&mut self, message: OrchestratorMessage) -> Task<OrchestratorMessage> {
        self.orchestrator.update(message)
    }

    pub fn render_view(&self, window_id: Id) -> Element<'_, OrchestratorMessage> {
        self.orchestrator.render_view(window_id)
    }

    pub fn handle_subscription(&self) -> iced::Subscription<OrchestratorMessage> {
        use iced::window;

        iced::event::listen_with(|event, _status, id| {
            if let iced::Event::Window(window::Event::Closed) = event {
                return Some(OrchestratorMessage::WindowClosed(id));
            }
            None
        })
    }
}
