mod clipboard_writer;
mod mouse_position_provider;
mod screen_capturer;
mod text_panel;

pub use clipboard_writer::ClipboardWriter;
pub use mouse_position_provider::MousePositionProvider;
pub use screen_capturer::ScreenCapturer;
pub use text_panel::TextPanel;
