use iced::widget::{button, container};
use iced::{Background, Border, Color, Shadow, Theme};

use crate::core::models::{PipelineState, ThemeMode};

const CAPTURE_GREEN: Color = Color::from_rgb(0.098, 0.529, 0.329);
const ABORT_RED: Color = Color::from_rgb(0.8, 0.25, 0.25);
const NEUTRAL_GREY: Color = Color::from_rgb(0.25, 0.25, 0.25);
const DISABLED_GREY: Color = Color::from_rgb(0.3, 0.3, 0.3);

pub fn get_theme(mode: &ThemeMode) -> Theme {
    match mode {
        ThemeMode::Dark => Theme::custom(
            "Dark".to_string(),
            iced::theme::Palette {
                background: Color::from_rgb(0.07, 0.07, 0.08),
                text: Color::from_rgb(1.0, 1.0, 1.0),
                primary: Color::from_rgb(0.4, 0.6, 1.0),
                success: Color::from_rgb(0.2, 0.9, 0.4),
                danger: Color::from_rgb(1.0, 0.3, 0.3),
                warning: Color::from_rgb(1.0, 0.7, 0.0),
            },
        ),
        ThemeMode::Light => Theme::custom(
            "Light".to_string(),
            iced::theme::Palette {
                background: Color::from_rgb(0.95, 0.95, 0.97),
                text: Color::from_rgb(0.1, 0.1, 0.1),
                primary: Color::from_rgb(0.2, 0.4, 0.9),
                success: Color::from_rgb(0.1, 0.7, 0.3),
                danger: Color::from_rgb(0.9, 0.2, 0.2),
                warning: Color::from_rgb(0.9, 0.6, 0.0),
            },
        ),
    }
}

fn scale_color(color: Color, factor: f32) -> Color {
    Color::from_rgb(
        (color.r * factor).min(1.0),
        (color.g * factor).min(1.0),
        (color.b * factor).min(1.0),
    )
}

fn solid_button(base: Color, text_color: Color, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Active => base,
        button::Status::Hovered => scale_color(base, 1.25),
        button::Status::Pressed => scale_color(base, 0.8),
        button::Status::Disabled => DISABLED_GREY,
    };
    let text_color = match status {
        button::Status::Disabled => Color::from_rgb(0.5, 0.5, 0.5),
        _ => text_color,
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: background,
            width: 1.0,
            radius: 6.0.into(),
        },
        shadow: Shadow::default(),
        snap: matches!(status, button::Status::Pressed),
    }
}

pub fn primary_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    solid_button(CAPTURE_GREEN, Color::WHITE, status)
}

pub fn danger_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    solid_button(ABORT_RED, Color::WHITE, status)
}

pub fn secondary_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    solid_button(NEUTRAL_GREY, Color::from_rgb(0.8, 0.8, 0.8), status)
}

pub fn error_banner_style(theme: &Theme) -> container::Style {
    let danger = theme.palette().danger;

    container::Style {
        background: Some(Background::Color(Color { a: 0.15, ..danger })),
        text_color: None,
        border: Border {
            color: danger,
            width: 1.0,
            radius: 8.0.into(),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

/// Dot colour next to the status line.
pub fn status_color(state: PipelineState) -> Color {
    match state {
        PipelineState::Idle | PipelineState::Displaying => Color::from_rgb(0.2, 0.8, 0.4),
        PipelineState::Error => Color::from_rgb(1.0, 0.3, 0.3),
        PipelineState::Selecting
        | PipelineState::Capturing
        | PipelineState::Processing
        | PipelineState::Recognizing => Color::from_rgb(1.0, 0.8, 0.2),
    }
}
