use iced::widget::{button, checkbox, column, pick_list, row, slider, text, text_input, Space};
use iced::{Element, Length};

use facescreen_core::shared::constants::DEFAULT_SERVICE_URL;

use crate::app::{scaled, Message};
use crate::settings::{Appearance, Settings, UploadBehavior};

pub fn view<'a>(settings: &'a Settings) -> Element<'a, Message> {
    let fs = settings.font_scale;
    let url_problem = settings.service_config().err().map(|e| e.to_string());

    let mut service = column![
        text("Analysis service").size(scaled(16.0, fs)),
        Space::new().height(8),
        text("Address").size(scaled(13.0, fs)),
        text_input(DEFAULT_SERVICE_URL, &settings.service_url)
            .on_input(Message::ServiceUrlChanged)
            .size(scaled(13.0, fs))
            .padding(8),
    ]
    .spacing(4);
    if let Some(problem) = url_problem {
        service = service.push(text(problem).size(scaled(12.0, fs)).style(text::danger));
    }

    let timeout_label = if settings.timeout_secs == 0 {
        "No limit".to_string()
    } else {
        format!("{} s", settings.timeout_secs)
    };

    column![
        service,
        Space::new().height(12),
        row![
            text("Request timeout").size(scaled(13.0, fs)),
            slider(0..=120, settings.timeout_secs, Message::TimeoutChanged),
            text(timeout_label).size(scaled(13.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
        Space::new().height(12),
        row![
            text("Read landmarks").size(scaled(13.0, fs)),
            pick_list(UploadBehavior::ALL, Some(settings.upload_behavior), |b| {
                Message::UploadBehaviorChanged(b)
            })
            .text_size(scaled(13.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
        Space::new().height(12),
        checkbox(settings.simulate)
            .label("Simulation mode (no service calls, always reports a positive result)")
            .on_toggle(Message::SimulateChanged)
            .text_size(scaled(13.0, fs)),
        Space::new().height(12),
        button(text("Restore Defaults").size(scaled(13.0, fs)))
            .on_press(Message::RestoreDefaults)
            .padding([6, 14])
            .style(button::secondary),
        Space::new().height(28),
        text("Appearance").size(scaled(16.0, fs)),
        Space::new().height(8),
        row![
            text("Mode").size(scaled(13.0, fs)),
            pick_list(Appearance::ALL, Some(settings.appearance), |a| {
                Message::AppearanceChanged(a)
            })
            .text_size(scaled(13.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
        Space::new().height(12),
        checkbox(settings.high_contrast)
            .label("High contrast")
            .on_toggle(Message::HighContrastChanged)
            .text_size(scaled(13.0, fs)),
        Space::new().height(12),
        row![
            text("Font size").size(scaled(13.0, fs)),
            slider(0.8..=1.5, settings.font_scale, Message::FontScaleChanged).step(0.05),
            text(format!("{:.0}%", settings.font_scale * 100.0)).size(scaled(13.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
    ]
    .width(Length::Fill)
    .into()
}
