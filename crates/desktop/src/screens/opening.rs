use iced::widget::{column, text, Space};
use iced::{Element, Theme};

use crate::app::{scaled, Message};
use crate::screens::{button_label, centered, heading};
use crate::theme::tertiary_color;
use crate::widgets::primary_button::primary_button;

pub fn view<'a>(fs: f32, hovered: bool, theme: &Theme) -> Element<'a, Message> {
    let tertiary = tertiary_color(theme);

    centered(
        column![
            heading("Face Screening", 24.0, fs),
            Space::new().height(8),
            text("Photo-based screening support")
                .size(scaled(15.0, fs))
                .color(tertiary),
            Space::new().height(24),
            text(
                "Upload a clear photo of a face. Its facial landmarks are sent to an \
                 analysis service, which estimates whether signs associated with autism \
                 are present. The result is a reference only, not a diagnosis."
            )
            .size(scaled(14.0, fs))
            .align_x(iced::Alignment::Center),
            Space::new().height(32),
            primary_button(
                move || button_label("Start", fs),
                Some(Message::Start),
                hovered,
                Message::PrimaryHovered,
                [12, 40],
            ),
        ]
        .align_x(iced::Alignment::Center)
        .max_width(420)
        .into(),
    )
}
