use iced::widget::{button, column, container, row, text, Space};
use iced::{Element, Length, Theme};

use facescreen_core::shared::constants::INSTRUCTION_SLIDE_COUNT;
use facescreen_core::workflow::navigation::INSTRUCTION_SLIDES;

use crate::app::{scaled, Message};
use crate::screens::{button_label, centered, heading};
use crate::theme::{surface_color, tertiary_color};
use crate::widgets::primary_button::primary_button;

const SLIDE_TITLES: [&str; INSTRUCTION_SLIDE_COUNT] =
    ["Distance and angle", "Framing", "Before you take it"];

pub fn view<'a>(fs: f32, slide: usize, hovered: bool, theme: &Theme) -> Element<'a, Message> {
    let tertiary = tertiary_color(theme);
    let surface = surface_color(theme);
    let last = slide + 1 == INSTRUCTION_SLIDE_COUNT;
    let body = INSTRUCTION_SLIDES.get(slide).copied().unwrap_or_default();
    let title = SLIDE_TITLES.get(slide).copied().unwrap_or_default();

    let card = container(
        column![
            text(format!("Step {} of {INSTRUCTION_SLIDE_COUNT}", slide + 1))
                .size(scaled(12.0, fs))
                .color(tertiary),
            Space::new().height(6),
            heading(title, 18.0, fs),
            Space::new().height(10),
            text(body).size(scaled(14.0, fs)),
        ]
        .width(Length::Fill),
    )
    .padding([20, 22])
    .width(Length::Fill)
    .style(move |_theme: &Theme| container::Style {
        background: Some(iced::Background::Color(surface)),
        border: iced::border::Border {
            radius: 14.0.into(),
            ..iced::border::Border::default()
        },
        ..container::Style::default()
    });

    let back = button(text("Back").size(scaled(14.0, fs)))
        .on_press_maybe((slide > 0).then_some(Message::PreviousSlide))
        .padding([12, 20])
        .style(button::secondary);

    let next_label = if last { "Continue" } else { "Next" };
    let next = primary_button(
        move || button_label(next_label, fs),
        Some(Message::NextSlide),
        hovered,
        Message::PrimaryHovered,
        [12, 32],
    );

    centered(
        column![
            card,
            Space::new().height(20),
            row![back, Space::new().width(Length::Fill), next].align_y(iced::Alignment::Center),
        ]
        .max_width(460)
        .into(),
    )
}
