use iced::widget::{container, text_editor};
use iced::{Background, Border, Color, Element, Length};

use crate::core::interfaces::ports::TextPanel;

/// Read-only, selectable view of the most recent extraction.
pub struct ResultPanel {
    content: text_editor::Content,
    current_text: String,
}

impl ResultPanel {
    pub fn build() -> Self {
        Self {
            content: text_editor::Content::new(),
            current_text: String::new(),
        }
    }

    pub fn current_text(&self) -> &str {
        &self.current_text
    }

    /// Applies cursor movement and selection; edits are dropped.
    pub fn perform(&mut self, action: text_editor::Action) {
        if action.is_edit() {
            log::debug!("[RESULT_PANEL] ignoring edit on read-only panel");
            return;
        }
        self.content.perform(action);
    }

    pub fn render_ui<'a, Message: Clone + 'a>(
        &'a self,
        on_action: impl Fn(text_editor::Action) -> Message + 'a,
    ) -> Element<'a, Message> {
        let editor = text_editor(&self.content)
            .placeholder("Extracted text will appear here...")
            .on_action(on_action)
            .size(15)
            .padding(12)
            .height(Length::Fill);

        container(editor)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.15))),
                border: Border {
                    color: Color::from_rgba(0.5, 0.5, 0.5, 0.3),
                    width: 1.0,
                    radius: 8.0.into(),
                },
                ..Default::default()
            })
            .into()
    }
}

impl TextPanel for ResultPanel {
    fn replace_text(&mut self, text: &str) {
        self.content = text_editor::Content::with_text(text);
        self.current_text = text.to_string();
    }
}
