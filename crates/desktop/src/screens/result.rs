use iced::widget::{column, text, Space};
use iced::{Element, Theme};

use facescreen_core::workflow::prediction_outcome::PredictionOutcome;
use facescreen_core::workflow::result_stage::{ResultView, RESULT_TITLE};

use crate::app::{scaled, Message};
use crate::screens::{button_label, centered, heading};
use crate::theme::{danger_color, tertiary_color};
use crate::widgets::primary_button::primary_button;

pub fn view<'a>(
    fs: f32,
    outcome: &PredictionOutcome,
    hovered: bool,
    theme: &Theme,
) -> Element<'a, Message> {
    let result = ResultView::render(outcome);
    let tertiary = tertiary_color(theme);

    let message = text(result.message()).size(scaled(17.0, fs));
    let message = if result.is_error() {
        message.color(danger_color(theme))
    } else {
        message
    };

    let mut col = column![
        heading(RESULT_TITLE, 22.0, fs),
        Space::new().height(16),
        message.align_x(iced::Alignment::Center),
    ]
    .align_x(iced::Alignment::Center)
    .max_width(440);

    if let Some(confidence) = result.confidence_text() {
        col = col
            .push(Space::new().height(6))
            .push(text(confidence).size(scaled(13.0, fs)).color(tertiary));
    }
    if let Some(advice) = result.advice() {
        col = col.push(Space::new().height(16)).push(
            text(advice)
                .size(scaled(14.0, fs))
                .color(tertiary)
                .align_x(iced::Alignment::Center),
        );
    }

    let again = if result.is_error() {
        "Try Another Photo"
    } else {
        "Analyse Another Photo"
    };
    centered(
        col.push(Space::new().height(28))
            .push(primary_button(
                move || button_label(again, fs),
                Some(Message::Restart),
                hovered,
                Message::PrimaryHovered,
                [12, 28],
            ))
            .into(),
    )
}
