use iced::widget::{column, text, Space};
use iced::Element;

use crate::app::{scaled, Message};

pub fn view<'a>(fs: f32, service_url: &str) -> Element<'a, Message> {
    column![
        text("Where your photo goes").size(scaled(16.0, fs)),
        Space::new().height(8),
        text(format!(
            "The photo you choose is sent to the analysis service at {service_url}. \
             The service extracts facial landmarks from it, and only those landmarks \
             are sent back for the prediction. Nothing is stored by this app: the \
             photo is dropped as soon as you start a new analysis or close the window."
        ))
        .size(scaled(13.0, fs)),
        Space::new().height(20),
        text("Simulation mode").size(scaled(16.0, fs)),
        Space::new().height(8),
        text(
            "With simulation mode on, no request is made and every analysis reports a \
             positive result after a short wait. Use it only to try out the app."
        )
        .size(scaled(13.0, fs)),
        Space::new().height(20),
        text("Not a diagnosis").size(scaled(16.0, fs)),
        Space::new().height(8),
        text(
            "The result is produced by a statistical model and can be wrong. Always \
             consult a qualified professional for an assessment."
        )
        .size(scaled(13.0, fs)),
    ]
    .into()
}
