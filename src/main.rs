#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod adapters;
mod app;
mod core;
mod global_constants;
mod ports;
mod presentation;

use iced::daemon;

fn main() -> iced::Result {
    env_logger::init();

    log::info!(
        "[MAIN] Starting {}",
        global_constants::APPLICATION_TITLE
    );

    if !adapters::screen_capture_permission::ensure_screen_capture_permission() {
        log::error!(
            "[MAIN] Screen recording permission not granted, captures may come back blank"
        );
    }

    daemon(
        app::TextExtractorApp::build,
        app::TextExtractorApp::handle_update,
        app::TextExtractorApp::render_view,
    )
    .title(app::TextExtractorApp::window_title)
    .subscription(app::TextExtractorApp::handle_subscription)
    .run()
}
