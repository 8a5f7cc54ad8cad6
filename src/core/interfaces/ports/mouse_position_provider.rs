pub trait MousePositionProvider: Send + Sync {
    fn get_current_mouse_position(&self) -> Result<(i32, i32), String>;
}
