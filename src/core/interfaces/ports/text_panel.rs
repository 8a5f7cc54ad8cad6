/// The visible area that shows the latest recognized text.
pub trait TextPanel {
    fn replace_text(&mut self, text: &str);
}
