use iced::widget::{button, column, container, row, text, Space};
use iced::{Color, Element, Length, Theme};

use facescreen_core::shared::selected_image::SelectedImage;

use crate::app::{scaled, Message};
use crate::theme::{surface_color, tertiary_color};

const CORNER_RADIUS: f32 = 12.0;

/// The chosen photo's name and size, with a button to pick another.
/// `on_browse` is `None` while the photo is locked by a submission.
pub fn photo_card<'a>(
    fs: f32,
    selected: Option<&SelectedImage>,
    on_browse: Option<Message>,
    theme: &Theme,
) -> Element<'a, Message> {
    let tertiary = tertiary_color(theme);
    let surface = surface_color(theme);
    let border = Color {
        a: 0.12,
        ..theme.palette().text
    };

    let (name, detail): (Element<'a, Message>, Element<'a, Message>) = match selected {
        Some(image) => (
            text(image.file_name().to_string())
                .size(scaled(16.0, fs))
                .font(iced::Font {
                    weight: iced::font::Weight::Medium,
                    ..iced::Font::DEFAULT
                })
                .into(),
            text(format!("{} \u{00B7} {}", image.mime_type(), human_size(image.len())))
                .size(scaled(12.0, fs))
                .color(tertiary)
                .into(),
        ),
        None => (
            text("No photo selected")
                .size(scaled(16.0, fs))
                .color(tertiary)
                .into(),
            Space::new().height(0).into(),
        ),
    };

    let label = if selected.is_some() { "Change" } else { "Choose Photo" };
    let btn = button(text(label).size(scaled(14.0, fs)))
        .on_press_maybe(on_browse)
        .padding([6, 14])
        .style(button::secondary);

    let info = column![
        text("PHOTO").size(scaled(12.0, fs)).color(tertiary),
        Space::new().height(2),
        name,
        detail,
    ]
    .width(Length::Fill);

    container(row![info, btn].spacing(8).align_y(iced::Alignment::Center))
        .padding([14, 16])
        .width(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(surface)),
            border: iced::border::Border {
                color: border,
                width: 1.0,
                radius: CORNER_RADIUS.into(),
            },
            ..container::Style::default()
        })
        .into()
}

fn human_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b >= KB * KB {
        format!("{:.1} MB", b / (KB * KB))
    } else if b >= KB {
        format!("{:.0} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2 KB");
        assert_eq!(human_size(3 * 1024 * 1024 / 2), "1.5 MB");
    }
}
