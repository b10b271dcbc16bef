use iced::widget::{button, column, text, Space};
use iced::{Element, Theme};

use facescreen_core::workflow::processing_stage::ProcessingState;

use crate::app::{scaled, Message};
use crate::screens::{centered, heading};
use crate::theme::tertiary_color;

pub fn view<'a>(
    fs: f32,
    state: &ProcessingState,
    simulated: bool,
    theme: &Theme,
) -> Element<'a, Message> {
    let tertiary = tertiary_color(theme);

    let mut col = column![
        heading("Analysing photo", 20.0, fs),
        Space::new().height(10),
        text(status_text(state)).size(scaled(15.0, fs)).color(tertiary),
    ]
    .align_x(iced::Alignment::Center);

    if simulated {
        col = col.push(Space::new().height(6)).push(
            text("Simulation mode: no data leaves this computer.")
                .size(scaled(12.0, fs))
                .color(tertiary),
        );
    }

    centered(
        col.push(Space::new().height(24))
            .push(
                button(text("Cancel").size(scaled(13.0, fs)))
                    .on_press(Message::CancelProcessing)
                    .padding([8, 20])
                    .style(button::secondary),
            )
            .into(),
    )
}

fn status_text(state: &ProcessingState) -> &'static str {
    match state {
        ProcessingState::Idle => "Preparing\u{2026}",
        ProcessingState::AwaitingExtraction => "Detecting facial landmarks\u{2026}",
        ProcessingState::AwaitingPrediction => "Evaluating facial features\u{2026}",
        ProcessingState::SimulatedDelay => "Evaluating photo\u{2026}",
        ProcessingState::Terminal(_) => "Done",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_wait_state_has_distinct_status() {
        let texts = [
            status_text(&ProcessingState::Idle),
            status_text(&ProcessingState::AwaitingExtraction),
            status_text(&ProcessingState::AwaitingPrediction),
            status_text(&ProcessingState::SimulatedDelay),
        ];
        for (i, a) in texts.iter().enumerate() {
            for b in &texts[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
