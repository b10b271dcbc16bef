pub mod instructions;
pub mod opening;
pub mod privacy;
pub mod processing;
pub mod result;
pub mod settings;
pub mod upload;

use iced::widget::{container, text};
use iced::{Element, Length};

use crate::app::{scaled, Message};

/// Center `content` in the available space.
pub(crate) fn centered(content: Element<'_, Message>) -> Element<'_, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

pub(crate) fn heading<'a>(label: impl ToString, size: f32, fs: f32) -> text::Text<'a> {
    text(label.to_string()).size(scaled(size, fs)).font(iced::Font {
        weight: iced::font::Weight::Bold,
        ..iced::Font::DEFAULT
    })
}

/// Content for a primary button label.
pub(crate) fn button_label<'a>(label: &'static str, fs: f32) -> Element<'a, Message> {
    text(label)
        .size(scaled(15.0, fs))
        .color(iced::Color::WHITE)
        .into()
}
