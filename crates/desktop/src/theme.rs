use iced::color;
use iced::theme::Palette;
use iced::{Color, Theme};

use crate::settings::Appearance;

/// Resolve the iced Theme from appearance + high_contrast settings.
pub fn resolve_theme(appearance: Appearance, high_contrast: bool) -> Theme {
    let is_dark = match appearance {
        Appearance::Dark => true,
        Appearance::Light => false,
        Appearance::System => system_prefers_dark(),
    };

    let palette = match (is_dark, high_contrast) {
        (true, false) => dark_palette(),
        (false, false) => light_palette(),
        (true, true) => high_contrast_dark_palette(),
        (false, true) => high_contrast_light_palette(),
    };

    Theme::custom("Face Screening", palette)
}

/// Secondary text: captions, hints, step counters.
pub fn tertiary_color(theme: &Theme) -> Color {
    Color {
        a: 0.6,
        ..theme.extended_palette().background.base.text
    }
}

/// Card background, slightly off the window background.
pub fn surface_color(theme: &Theme) -> Color {
    theme.extended_palette().background.weak.color
}

pub fn danger_color(theme: &Theme) -> Color {
    theme.extended_palette().danger.base.color
}

fn dark_palette() -> Palette {
    Palette {
        background: color!(0x1b, 0x1d, 0x22),
        text: color!(0xd6, 0xd8, 0xdc),
        primary: color!(0x4f, 0xa3, 0xa5),
        success: color!(0x3d, 0xc4, 0x7e),
        warning: color!(0xf2, 0xc1, 0x4e),
        danger: color!(0xf0, 0x5d, 0x5e),
    }
}

fn light_palette() -> Palette {
    Palette {
        background: color!(0xf6, 0xf7, 0xf9),
        text: color!(0x1f, 0x23, 0x28),
        primary: color!(0x2a, 0x7f, 0x82),
        success: color!(0x2e, 0x9d, 0x5f),
        warning: color!(0xc7, 0x8a, 0x00),
        danger: color!(0xd6, 0x3b, 0x3c),
    }
}

fn high_contrast_dark_palette() -> Palette {
    Palette {
        background: color!(0x00, 0x00, 0x00),
        text: color!(0xff, 0xff, 0xff),
        primary: color!(0x5c, 0xe1, 0xe6),
        success: color!(0x3d, 0xe0, 0x8a),
        warning: color!(0xff, 0xd6, 0x0a),
        danger: color!(0xff, 0x6b, 0x6b),
    }
}

fn high_contrast_light_palette() -> Palette {
    Palette {
        background: color!(0xff, 0xff, 0xff),
        text: color!(0x00, 0x00, 0x00),
        primary: color!(0x00, 0x5a, 0x5e),
        success: color!(0x1b, 0x6e, 0x3c),
        warning: color!(0x8a, 0x5a, 0x00),
        danger: color!(0xb0, 0x00, 0x14),
    }
}

#[cfg(target_os = "macos")]
fn system_prefers_dark() -> bool {
    std::process::Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().eq_ignore_ascii_case("dark"))
        .unwrap_or(false)
}

#[cfg(target_os = "windows")]
fn system_prefers_dark() -> bool {
    // AppsUseLightTheme is 0x0 in dark mode.
    std::process::Command::new("reg")
        .args([
            "query",
            r"HKCU\Software\Microsoft\Windows\CurrentVersion\Themes\Personalize",
            "/v",
            "AppsUseLightTheme",
        ])
        .output()
        .map(|o| String::from_utf8_lossy(&o.stdout).contains("0x0"))
        .unwrap_or(false)
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn system_prefers_dark() -> bool {
    false
}
