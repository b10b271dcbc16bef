use iced::widget::{column, container, image, text, Space};
use iced::{ContentFit, Element, Length, Theme};

use facescreen_core::workflow::upload_stage::UploadStage;

use crate::app::{scaled, Message};
use crate::screens::{button_label, heading};
use crate::theme::{danger_color, tertiary_color};
use crate::widgets::photo_card::photo_card;
use crate::widgets::primary_button::primary_button_fill;

const PREVIEW_HEIGHT: f32 = 240.0;

pub fn view<'a>(
    fs: f32,
    upload: &'a UploadStage,
    preview: Option<&'a image::Handle>,
    pick_error: Option<&'a str>,
    hovered: bool,
    theme: &Theme,
) -> Element<'a, Message> {
    let tertiary = tertiary_color(theme);
    let danger = danger_color(theme);
    let submitting = upload.is_submitting();

    let mut col = column![
        heading("Upload a photo", 20.0, fs),
        Space::new().height(6),
        text("Use a recent, well lit photo that shows the whole face.")
            .size(scaled(14.0, fs))
            .color(tertiary),
        Space::new().height(20),
        photo_card(
            fs,
            upload.selected(),
            (!submitting).then_some(Message::SelectPhoto),
            theme,
        ),
    ]
    .width(Length::Fill);

    if let (Some(handle), Some(_)) = (preview, upload.selected()) {
        col = col.push(Space::new().height(16)).push(
            container(
                image(handle.clone())
                    .height(PREVIEW_HEIGHT)
                    .content_fit(ContentFit::Contain),
            )
            .width(Length::Fill)
            .center_x(Length::Fill),
        );
    }

    let error = upload
        .error()
        .map(|e| e.user_message().to_string())
        .or_else(|| pick_error.map(str::to_string));
    if let Some(message) = error {
        col = col
            .push(Space::new().height(12))
            .push(text(message).size(scaled(14.0, fs)).color(danger));
    }

    if submitting {
        col = col.push(Space::new().height(12)).push(
            text("Reading facial landmarks\u{2026}")
                .size(scaled(13.0, fs))
                .color(tertiary),
        );
    }

    col.push(Space::new().height(24))
        .push(primary_button_fill(
            move || button_label("Continue", fs),
            upload.can_submit().then_some(Message::Submit),
            hovered,
            Message::PrimaryHovered,
            [14, 24],
        ))
        .into()
}
