use std::cell::Cell;

use iced::mouse;
use iced::widget::{canvas, container, stack, text};
use iced::{Alignment, Background, Border, Color, Element, Length, Point, Rectangle, Shadow, Size, Vector};

use crate::core::models::{CaptureTarget, DisplayGeometry, ScreenRegion};
use crate::global_constants::{
    LOG_TAG_SELECTION, OVERLAY_BACKGROUND_RGBA, SELECTION_OUTLINE_RGB, STATUS_SELECTING,
};

/// Full-display translucent surface the user drags a rectangle on.
pub struct SelectionOverlay {
    display: DisplayGeometry,
    min_selection_size: u32,
    drag_start: Option<Point>,
    drag_current: Option<Point>,
    is_dragging: bool,
    surface_size: Cell<Size>,
}

#[derive(Debug, Clone)]
pub enum SelectionMessage {
    MousePressed(Point),
    MouseMoved(Point),
    MouseReleased,
    CancelRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    UserCancelled,
    TooSmall,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionOutcome {
    Selected(CaptureTarget),
    Cancelled(CancelReason),
}

impl SelectionOverlay {
    pub fn build(display: DisplayGeometry, min_selection_size: u32) -> Self {
        log::debug!(
            "{} building overlay for display {:?}",
            LOG_TAG_SELECTION,
            display
        );
        Self {
            display,
            min_selection_size,
            drag_start: None,
            drag_current: None,
            is_dragging: false,
            surface_size: Cell::new(Size::new(
                display.logical_width as f32,
                display.logical_height as f32,
            )),
        }
    }

    /// Feeds one interaction into the drag state. Returns the outcome once the
    /// selection is finished, either by release or by cancellation.
    pub fn update(&mut self, message: SelectionMessage) -> Option<SelectionOutcome> {
        match message {
            SelectionMessage::MousePressed(point) => {
                self.drag_start = Some(point);
                self.drag_current = Some(point);
                self.is_dragging = true;
                None
            }
            SelectionMessage::MouseMoved(point) => {
                if self.is_dragging {
                    self.drag_current = Some(point);
                }
                None
            }
            SelectionMessage::MouseReleased => {
                if !self.is_dragging {
                    return None;
                }
                self.is_dragging = false;
                Some(self.finish())
            }
            SelectionMessage::CancelRequested => {
                log::info!("{} selection cancelled by user", LOG_TAG_SELECTION);
                self.drag_start = None;
                self.drag_current = None;
                self.is_dragging = false;
                Some(SelectionOutcome::Cancelled(CancelReason::UserCancelled))
            }
        }
    }

    fn finish(&self) -> SelectionOutcome {
        let (Some(start), Some(end)) = (self.drag_start, self.drag_current) else {
            return SelectionOutcome::Cancelled(CancelReason::UserCancelled);
        };

        let surface = self.surface_size.get();
        let first = self
            .display
            .surface_point_to_local_pixels(start.x, start.y, surface.width, surface.height);
        let second = self
            .display
            .surface_point_to_local_pixels(end.x, end.y, surface.width, surface.height);

        match ScreenRegion::from_corners(first, second) {
            Some(region) if region.is_at_least(self.min_selection_size) => {
                log::info!(
                    "{} selected region {:?} on display at ({}, {})",
                    LOG_TAG_SELECTION,
                    region,
                    self.display.x,
                    self.display.y
                );
                SelectionOutcome::Selected(CaptureTarget::new(self.display, region))
            }
            _ => {
                log::info!(
                    "{} selection {:?} -> {:?} below {} px",
                    LOG_TAG_SELECTION,
                    first,
                    second,
                    self.min_selection_size
                );
                SelectionOutcome::Cancelled(CancelReason::TooSmall)
            }
        }
    }

    fn selection_rectangle(&self) -> Option<(Point, Size)> {
        match (self.drag_start, self.drag_current) {
            (Some(start), Some(current)) => {
                let x = start.x.min(current.x);
                let y = start.y.min(current.y);
                let width = (start.x - current.x).abs();
                let height = (start.y - current.y).abs();
                Some((Point::new(x, y), Size::new(width, height)))
            }
            _ => None,
        }
    }

    pub fn render_ui(&self) -> Element<'_, SelectionMessage> {
        let overlay_canvas = canvas(self).width(Length::Fill).height(Length::Fill);

        let mut layers: Vec<Element<'_, SelectionMessage>> = vec![overlay_canvas.into()];

        if !self.is_dragging {
            let hint_banner = container(text(STATUS_SELECTING).size(16).style(|_theme| {
                text::Style {
                    color: Some(Color::WHITE),
                }
            }))
            .padding([12, 24])
            .style(|_theme| container::Style {
                background: Some(Background::Color(Color::from_rgba(0.1, 0.1, 0.1, 0.85))),
                border: Border {
                    color: Color::from_rgba(1.0, 0.3, 0.3, 0.8),
                    width: 1.0,
                    radius: 8.0.into(),
                },
                shadow: Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.6),
                    offset: Vector::new(0.0, 4.0),
                    blur_radius: 12.0,
                },
                text_color: None,
                snap: false,
            });

            let hint_positioned = container(hint_banner)
                .width(Length::Fill)
                .padding(iced::Padding {
                    top: 40.0,
                    right: 0.0,
                    bottom: 0.0,
                    left: 0.0,
                })
                .align_x(Alignment::Center);

            layers.push(hint_positioned.into());
        }

        container(stack(layers))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

impl canvas::Program<SelectionMessage> for SelectionOverlay {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<SelectionMessage>> {
        self.surface_size.set(bounds.size());

        match event {
            iced::Event::Mouse(mouse_event) => match mouse_event {
                mouse::Event::ButtonPressed(mouse::Button::Left) => cursor
                    .position_in(bounds)
                    .map(|position| canvas::Action::publish(SelectionMessage::MousePressed(position))),
                mouse::Event::CursorMoved { .. } if self.is_dragging => cursor
                    .position_in(bounds)
                    .map(|position| canvas::Action::publish(SelectionMessage::MouseMoved(position))),
                mouse::Event::ButtonReleased(mouse::Button::Left) => {
                    Some(canvas::Action::publish(SelectionMessage::MouseReleased))
                }
                mouse::Event::ButtonPressed(mouse::Button::Right) => {
                    Some(canvas::Action::publish(SelectionMessage::CancelRequested))
                }
                _ => None,
            },
            iced::Event::Keyboard(iced::keyboard::Event::KeyPressed {
                key: iced::keyboard::Key::Named(iced::keyboard::key::Named::Escape),
                ..
            }) => Some(canvas::Action::publish(SelectionMessage::CancelRequested)),
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry<iced::Renderer>> {
        self.surface_size.set(bounds.size());

        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let (r, g, b, a) = OVERLAY_BACKGROUND_RGBA;
        let overlay_color = Color::from_rgba(r, g, b, a);

        match self.selection_rectangle() {
            Some((top_left, size)) => {
                frame.fill_rectangle(
                    Point::ORIGIN,
                    Size::new(bounds.width, top_left.y),
                    overlay_color,
                );
                frame.fill_rectangle(
                    Point::new(0.0, top_left.y + size.height),
                    Size::new(bounds.width, bounds.height - (top_left.y + size.height)),
                    overlay_color,
                );
                frame.fill_rectangle(
                    Point::new(0.0, top_left.y),
                    Size::new(top_left.x, size.height),
                    overlay_color,
                );
                frame.fill_rectangle(
                    Point::new(top_left.x + size.width, top_left.y),
                    Size::new(bounds.width - (top_left.x + size.width), size.height),
                    overlay_color,
                );

                let (r, g, b) = SELECTION_OUTLINE_RGB;
                frame.stroke(
                    &canvas::Path::rectangle(top_left, size),
                    canvas::Stroke::default()
                        .with_color(Color::from_rgb(r, g, b))
                        .with_width(2.0),
                );
            }
            None => {
                frame.fill_rectangle(Point::ORIGIN, bounds.size(), overlay_color);
            }
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        _bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        mouse::Interaction::Crosshair
    }
}
