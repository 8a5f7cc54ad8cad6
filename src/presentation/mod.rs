pub mod app_theme;
mod result_panel;
mod selection_overlay;

pub use result_panel::ResultPanel;
pub use selection_overlay::{CancelReason, SelectionMessage, SelectionOutcome, SelectionOverlay};
