use crate::core::interfaces::ports::MousePositionProvider;
use mouse_position::mouse_position::Mouse;

const MOUSE_POSITION_FAILED: &str = "failed to get mouse position";

pub struct SystemMousePositionProvider;

impl SystemMousePositionProvider {
    pub fn initialize() -> Self {
        log::debug!("[MOUSE] initializing mouse position provider");
        Self
    }

    fn convert_mouse_result(&self, mouse_result: Mouse) -> Result<(i32, i32), String> {
        match mouse_result {
            Mouse::Position { x, y } => {
                log::debug!("[MOUSE] current position: ({}, {})", x, y);
                Ok((x, y))
            }
            Mouse::Error => {
                log::warn!("[MOUSE] {}", MOUSE_POSITION_FAILED);
                Err(MOUSE_POSITION_FAILED.to_string())
            }
        }
    }
}

impl MousePositionProvider for SystemMousePositionProvider {
    fn get_current_mouse_position(&self) -> Result<(i32, i32), String> {
        self.convert_mouse_result(Mouse::get_mouse_position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_mouse_result_with_valid_position_returns_ok() {
        let provider = SystemMousePositionProvider::initialize();

        let result = provider.convert_mouse_result(Mouse::Position { x: 100, y: 200 });

        assert_eq!(result, Ok((100, 200)));
    }

    #[test]
    fn test_convert_mouse_result_with_error_returns_err() {
        let provider = SystemMousePositionProvider::initialize();

        let result = provider.convert_mouse_result(Mouse::Error);

        assert!(result.unwrap_err().contains("mouse position"));
    }

    #[test]
    fn test_convert_mouse_result_keeps_negative_coordinates() {
        let provider = SystemMousePositionProvider::initialize();

        let result = provider.convert_mouse_result(Mouse::Position { x: -50, y: -100 });

        assert_eq!(result, Ok((-50, -100)));
    }
}
