use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use iced::widget::{button, column, container, row, text, text_editor, Space};
use iced::window::{self, Id};
use iced::{Alignment, Background, Color, Element, Length, Point, Size, Task};

use crate::core::errors::{CaptureError, EngineNotFoundError, PipelineError, UserFacingMessage};
use crate::core::interfaces::ports::{ClipboardWriter, MousePositionProvider};
use crate::core::models::{
    AppSettings, CaptureTarget, CapturedImage, DisplayGeometry, ExtractionResult, OcrEngineHandle,
    PipelineState,
};
use crate::core::services::{CapturePipeline, ResultSink};
use crate::global_constants::{
    APPLICATION_TITLE, STATUS_ABORTED, STATUS_CAPTURING, STATUS_PROCESSING, STATUS_READY,
    STATUS_RECOGNIZING, STATUS_SELECTING, STATUS_SELECTION_TOO_SMALL,
};
use crate::presentation::app_theme;
use crate::presentation::{
    CancelReason, ResultPanel, SelectionMessage, SelectionOutcome, SelectionOverlay,
};

const LOG_TAG: &str = "[ORCHESTRATOR]";

pub enum AppWindow {
    Main,
    SelectionOverlay(SelectionOverlay),
}

pub struct AppOrchestrator {
    pipeline: CapturePipeline,
    mouse_provider: Arc<dyn MousePositionProvider>,
    result_sink: ResultSink,
    settings: AppSettings,
    windows: HashMap<Id, AppWindow>,
    main_window_id: Option<Id>,
    overlay_window_id: Option<Id>,
    state: PipelineState,
    status: String,
    last_error: Option<UserFacingMessage>,
    result_panel: ResultPanel,
    recognition_handle: Option<iced::task::Handle>,
}

#[derive(Clone)]
pub enum OrchestratorMessage {
    OpenMainWindow,
    EngineProbeFinished(Result<OcrEngineHandle, EngineNotFoundError>),
    CaptureRequested,
    OpenSelectionOverlay(Result<DisplayGeometry, CaptureError>),
    SelectionOverlayMessage(Id, SelectionMessage),
    SelectionFinished(SelectionOutcome),
    PerformCapture(CaptureTarget),
    CaptureFinished(Result<CapturedImage, PipelineError>),
    PreprocessFinished(CapturedImage),
    RecognitionFinished(Result<ExtractionResult, PipelineError>),
    AbortRecognition,
    ResultPanelAction(text_editor::Action),
    DismissError,
    WindowClosed(Id),
}

impl std::fmt::Debug for OrchestratorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrchestratorMessage::OpenMainWindow => write!(f, "OpenMainWindow"),
            OrchestratorMessage::EngineProbeFinished(result) => {
                write!(f, "EngineProbeFinished({:?})", result.is_ok())
            }
            OrchestratorMessage::CaptureRequested => write!(f, "CaptureRequested"),
            OrchestratorMessage::OpenSelectionOverlay(result) => {
                write!(f, "OpenSelectionOverlay({:?})", result)
            }
            OrchestratorMessage::SelectionOverlayMessage(id, msg) => {
                write!(f, "SelectionOverlayMessage({:?}, {:?})", id, msg)
            }
            OrchestratorMessage::SelectionFinished(outcome) => {
                write!(f, "SelectionFinished({:?})", outcome)
            }
            OrchestratorMessage::PerformCapture(target) => write!(f, "PerformCapture({:?})", target),
            OrchestratorMessage::CaptureFinished(result) => {
                write!(f, "CaptureFinished({:?})", result.is_ok())
            }
            OrchestratorMessage::PreprocessFinished(image) => write!(
                f,
                "PreprocessFinished({}x{})",
                image.width(),
                image.height()
            ),
            OrchestratorMessage::RecognitionFinished(result) => {
                write!(f, "RecognitionFinished({:?})", result.is_ok())
            }
            OrchestratorMessage::AbortRecognition => write!(f, "AbortRecognition"),
            OrchestratorMessage::ResultPanelAction(_) => write!(f, "ResultPanelAction"),
            OrchestratorMessage::DismissError => write!(f, "DismissError"),
            OrchestratorMessage::WindowClosed(id) => write!(f, "WindowClosed({:?})", id),
        }
    }
}

impl AppOrchestrator {
    pub fn build(
        pipeline: CapturePipeline,
        mouse_provider: Arc<dyn MousePositionProvider>,
        clipboard: Arc<dyn ClipboardWriter>,
        settings: AppSettings,
    ) -> Self {
        Self {
            pipeline,
            mouse_provider,
            result_sink: ResultSink::new(clipboard),
            settings,
            windows: HashMap::new(),
            main_window_id: None,
            overlay_window_id: None,
            state: PipelineState::Idle,
            status: STATUS_READY.to_string(),
            last_error: None,
            result_panel: ResultPanel::build(),
            recognition_handle: None,
        }
    }

    pub fn get_window_title(&self, _window: Id) -> String {
        APPLICATION_TITLE.to_string()
    }

    /// Resolves the engine in the background so a missing install is reported
    /// before the first capture. Failure is not cached.
    pub fn probe_engine(&self) -> Task<OrchestratorMessage> {
        let engine_cache = Arc::clone(self.pipeline.engine_cache());
        Task::future(async move {
            OrchestratorMessage::EngineProbeFinished(engine_cache.get_or_resolve())
        })
    }

    pub fn update(&mut self, message: OrchestratorMessage) -> Task<OrchestratorMessage> {
        log::debug!("{} update: {:?}", LOG_TAG, message);

        match message {
            OrchestratorMessage::OpenMainWindow => self.handle_open_main_window(),
            OrchestratorMessage::EngineProbeFinished(result) => {
                self.handle_engine_probe_finished(result)
            }
            OrchestratorMessage::CaptureRequested => self.handle_capture_requested(),
            OrchestratorMessage::OpenSelectionOverlay(result) => {
                self.handle_open_selection_overlay(result)
            }
            OrchestratorMessage::SelectionOverlayMessage(id, msg) => {
                self.handle_selection_overlay_message(id, msg)
            }
            OrchestratorMessage::SelectionFinished(outcome) => {
                self.handle_selection_finished(outcome)
            }
            OrchestratorMessage::PerformCapture(target) => self.handle_perform_capture(target),
            OrchestratorMessage::CaptureFinished(result) => self.handle_capture_finished(result),
            OrchestratorMessage::PreprocessFinished(image) => {
                self.handle_preprocess_finished(image)
            }
            OrchestratorMessage::RecognitionFinished(result) => {
                self.handle_recognition_finished(result)
            }
            OrchestratorMessage::AbortRecognition => self.handle_abort_recognition(),
            OrchestratorMessage::ResultPanelAction(action) => {
                self.result_panel.perform(action);
                Task::none()
            }
            OrchestratorMessage::DismissError => {
                self.last_error = None;
                Task::none()
            }
            OrchestratorMessage::WindowClosed(id) => self.handle_window_closed(id),
        }
    }

    pub fn render_view(&self, window_id: Id) -> Element<'_, OrchestratorMessage> {
        match self.windows.get(&window_id) {
            Some(AppWindow::Main) => self.render_main_window(),
            Some(AppWindow::SelectionOverlay(overlay)) => overlay
                .render_ui()
                .map(move |msg| OrchestratorMessage::SelectionOverlayMessage(window_id, msg)),
            None => text("Loading...").into(),
        }
    }

    fn handle_open_main_window(&mut self) -> Task<OrchestratorMessage> {
        if let Some(id) = self.main_window_id {
            if self.windows.contains_key(&id) {
                log::warn!("{} Main window already open", LOG_TAG);
                return Task::none();
            }
        }

        let (id, task) = window::open(window::Settings {
            size: Size::new(520.0, 420.0),
            min_size: Some(Size::new(350.0, 250.0)),
            position: window::Position::Centered,
            ..Default::default()
        });

        self.main_window_id = Some(id);
        self.windows.insert(id, AppWindow::Main);
        log::info!("{} Main window created with ID: {:?}", LOG_TAG, id);
        task.discard()
    }

    fn handle_engine_probe_finished(
        &mut self,
        result: Result<OcrEngineHandle, EngineNotFoundError>,
    ) -> Task<OrchestratorMessage> {
        match result {
            Ok(engine) => {
                log::info!(
                    "{} OCR engine ready: {} ({})",
                    LOG_TAG,
                    engine.executable().display(),
                    engine.source()
                );
            }
            Err(error) => {
                log::error!("{} {}", LOG_TAG, error);
                self.last_error = PipelineError::EngineNotFound(error).user_message();
            }
        }
        Task::none()
    }

    fn handle_capture_requested(&mut self) -> Task<OrchestratorMessage> {
        if self.state.is_busy() {
            log::warn!(
                "{} Capture requested while {}, ignoring",
                LOG_TAG,
                self.state
            );
            return Task::none();
        }

        log::info!("{} Starting capture run", LOG_TAG);
        self.state = PipelineState::Selecting;
        self.status = STATUS_SELECTING.to_string();
        self.last_error = None;

        let (mouse_x, mouse_y) = self
            .mouse_provider
            .get_current_mouse_position()
            .unwrap_or_else(|e| {
                log::warn!("{} {}, using (0, 0)", LOG_TAG, e);
                (0, 0)
            });

        let screen_capturer = Arc::clone(self.pipeline.screen_capturer());
        let locate_display = Task::future(async move {
            OrchestratorMessage::OpenSelectionOverlay(
                screen_capturer.display_at_point(mouse_x, mouse_y),
            )
        });

        Task::batch(vec![self.minimize_main_window(true), locate_display])
    }

    fn handle_open_selection_overlay(
        &mut self,
        result: Result<DisplayGeometry, CaptureError>,
    ) -> Task<OrchestratorMessage> {
        let display = match result {
            Ok(display) => display,
            Err(error) => return self.fail_run(error.into()),
        };

        log::info!("{} Opening selection overlay on {:?}", LOG_TAG, display);
        let (id, task) = window::open(window::Settings {
            position: window::Position::Specific(Point::new(display.x as f32, display.y as f32)),
            size: Size::new(display.logical_width as f32, display.logical_height as f32),
            transparent: true,
            decorations: false,
            resizable: false,
            level: window::Level::AlwaysOnTop,
            ..Default::default()
        });

        let overlay = SelectionOverlay::build(display, self.settings.min_selection_size);
        self.windows.insert(id, AppWindow::SelectionOverlay(overlay));
        self.overlay_window_id = Some(id);

        task.discard().chain(window::gain_focus(id))
    }

    fn handle_selection_overlay_message(
        &mut self,
        window_id: Id,
        message: SelectionMessage,
    ) -> Task<OrchestratorMessage> {
        let Some(AppWindow::SelectionOverlay(overlay)) = self.windows.get_mut(&window_id) else {
            return Task::none();
        };

        match overlay.update(message) {
            Some(outcome) => {
                self.windows.remove(&window_id);
                self.overlay_window_id = None;
                Task::batch(vec![
                    window::close(window_id),
                    Task::done(OrchestratorMessage::SelectionFinished(outcome)),
                ])
            }
            None => Task::none(),
        }
    }

    fn handle_selection_finished(&mut self, outcome: SelectionOutcome) -> Task<OrchestratorMessage> {
        match outcome {
            SelectionOutcome::Selected(target) => {
                self.state = PipelineState::Capturing;
                self.status = STATUS_CAPTURING.to_string();

                let delay = Duration::from_millis(self.settings.capture_delay_ms);
                Task::future(async move {
                    tokio::time::sleep(delay).await;
                    OrchestratorMessage::PerformCapture(target)
                })
            }
            SelectionOutcome::Cancelled(reason) => {
                self.state = PipelineState::Idle;
                self.status = match reason {
                    CancelReason::UserCancelled => PipelineError::SelectionCancelled.status_text(),
                    CancelReason::TooSmall => STATUS_SELECTION_TOO_SMALL,
                }
                .to_string();
                log::info!("{} {}", LOG_TAG, self.status);
                self.minimize_main_window(false)
            }
        }
    }

    fn handle_perform_capture(&mut self, target: CaptureTarget) -> Task<OrchestratorMessage> {
        let pipeline = self.pipeline.clone();
        Task::future(async move { OrchestratorMessage::CaptureFinished(pipeline.capture(&target)) })
    }

    fn handle_capture_finished(
        &mut self,
        result: Result<CapturedImage, PipelineError>,
    ) -> Task<OrchestratorMessage> {
        let restore = self.minimize_main_window(false);

        match result {
            Ok(image) => {
                self.state = PipelineState::Processing;
                self.status = STATUS_PROCESSING.to_string();

                let pipeline = self.pipeline.clone();
                Task::batch(vec![
                    restore,
                    Task::future(async move {
                        OrchestratorMessage::PreprocessFinished(pipeline.preprocess(image))
                    }),
                ])
            }
            Err(error) => Task::batch(vec![restore, self.fail_run(error)]),
        }
    }

    fn handle_preprocess_finished(&mut self, image: CapturedImage) -> Task<OrchestratorMessage> {
        self.state = PipelineState::Recognizing;
        self.status = STATUS_RECOGNIZING.to_string();

        let pipeline = self.pipeline.clone();
        let (task, handle) = Task::future(async move {
            OrchestratorMessage::RecognitionFinished(pipeline.recognize(&image).await)
        })
        .abortable();

        self.recognition_handle = Some(handle);
        task
    }

    fn handle_recognition_finished(
        &mut self,
        result: Result<ExtractionResult, PipelineError>,
    ) -> Task<OrchestratorMessage> {
        self.recognition_handle = None;

        if self.state != PipelineState::Recognizing {
            log::debug!("{} Dropping recognition result for aborted run", LOG_TAG);
            return Task::none();
        }

        match result {
            Ok(result) => {
                self.state = PipelineState::Displaying;
                let outcome = self.result_sink.deliver(&result, &mut self.result_panel);
                self.status = outcome.status_text().to_string();
                self.state = PipelineState::Idle;
                Task::none()
            }
            Err(error) => self.fail_run(error),
        }
    }

    fn handle_abort_recognition(&mut self) -> Task<OrchestratorMessage> {
        if self.state != PipelineState::Recognizing {
            return Task::none();
        }

        if let Some(handle) = self.recognition_handle.take() {
            handle.abort();
        }
        log::info!("{} Recognition aborted by user", LOG_TAG);
        self.state = PipelineState::Idle;
        self.status = STATUS_ABORTED.to_string();
        Task::none()
    }

    fn handle_window_closed(&mut self, id: Id) -> Task<OrchestratorMessage> {
        log::info!("{} Window closed: {:?}", LOG_TAG, id);

        if Some(id) == self.main_window_id {
            log::info!("{} Main window closed, exiting", LOG_TAG);
            self.windows.remove(&id);
            self.main_window_id = None;
            return iced::exit();
        }

        if Some(id) == self.overlay_window_id {
            self.windows.remove(&id);
            self.overlay_window_id = None;
            if self.state == PipelineState::Selecting {
                return self.handle_selection_finished(SelectionOutcome::Cancelled(
                    CancelReason::UserCancelled,
                ));
            }
        }

        Task::none()
    }

    /// Error → Idle, skipping every later stage.
    fn fail_run(&mut self, error: PipelineError) -> Task<OrchestratorMessage> {
        self.state = PipelineState::Error;
        log::error!("{} Run failed: {}", LOG_TAG, error);

        self.status = error.status_text().to_string();
        self.last_error = error.user_message();
        self.state = PipelineState::Idle;

        match error {
            PipelineError::SelectionCancelled | PipelineError::Capture(_) => {
                self.minimize_main_window(false)
            }
            _ => Task::none(),
        }
    }

    fn minimize_main_window(&self, minimized: bool) -> Task<OrchestratorMessage> {
        match self.main_window_id {
            Some(id) => window::minimize(id, minimized),
            None => Task::none(),
        }
    }

    fn render_main_window(&self) -> Element<'_, OrchestratorMessage> {
        let theme = app_theme::get_theme(&self.settings.theme_mode);

        let capture_btn = button(
            container(text("Select Region to Capture Text").size(16)).center_x(Length::Fill),
        )
        .padding([12, 24])
        .width(Length::Fill)
        .style(app_theme::primary_button_style)
        .on_press_maybe((!self.state.is_busy()).then_some(OrchestratorMessage::CaptureRequested));

        let mut action_row = row![capture_btn].spacing(8).align_y(Alignment::Center);
        if self.state == PipelineState::Recognizing {
            action_row = action_row.push(
                button(text("Abort").size(16))
                    .padding([12, 20])
                    .style(app_theme::danger_button_style)
                    .on_press(OrchestratorMessage::AbortRecognition),
            );
        }

        let mut content = column![action_row].spacing(12);

        if let Some(error) = &self.last_error {
            content = content.push(self.render_error_banner(error));
        }

        content = content
            .push(
                self.result_panel
                    .render_ui(OrchestratorMessage::ResultPanelAction),
            )
            .push(self.render_status_indicator());

        container(content.padding(16))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| {
                let palette = theme.palette();
                iced::widget::container::Style {
                    background: Some(Background::Color(palette.background)),
                    text_color: Some(palette.text),
                    ..Default::default()
                }
            })
            .into()
    }

    fn render_error_banner<'a>(
        &'a self,
        error: &'a UserFacingMessage,
    ) -> Element<'a, OrchestratorMessage> {
        let dismiss_btn = button(text("Dismiss").size(13))
            .padding([6, 14])
            .style(app_theme::secondary_button_style)
            .on_press(OrchestratorMessage::DismissError);

        let body = column![
            text(&error.title).size(16),
            text(&error.body).size(13),
        ]
        .spacing(4)
        .width(Length::Fill);

        container(row![body, dismiss_btn].spacing(12).align_y(Alignment::Start))
            .padding(12)
            .width(Length::Fill)
            .style(app_theme::error_banner_style)
            .into()
    }

    fn render_status_indicator(&self) -> Element<'_, OrchestratorMessage> {
        let status_color = app_theme::status_color(self.state);

        let status_text = row![
            text("●")
                .size(12)
                .style(move |_theme: &iced::Theme| iced::widget::text::Style {
                    color: Some(status_color),
                }),
            text(&self.status)
                .size(13)
                .style(|_theme: &iced::Theme| iced::widget::text::Style {
                    color: Some(Color::from_rgba(0.6, 0.6, 0.6, 1.0)),
                }),
            Space::new().width(Length::Fill),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        container(status_text).width(Length::Fill).into()
    }
}
