use std::time::Duration;

use iced::border::Border;
use iced::widget::{button, container, mouse_area};
use iced::{Color, Element, Length, Padding, Shadow, Theme, Vector};
use iced_anim::transition::Easing;
use iced_anim::AnimationBuilder;

const HOVER_DARKEN: f32 = 0.06;
const FLOAT_HEIGHT: f32 = 1.0;
const CORNER_RADIUS: f32 = 10.0;
const SHADOW_BLUR: (f32, f32) = (8.0, 14.0);
const SHADOW_ALPHA: (f32, f32) = (0.22, 0.34);
const SHADOW_OFFSET_Y: f32 = 3.0;
const DISABLED_ALPHA: f32 = 0.4;
const ANIMATION_DURATION: Duration = Duration::from_millis(180);

/// Filled call-to-action button that lifts on hover.
///
/// With `on_press` set to `None` the button is drawn faded and ignores
/// clicks and hover.
pub fn primary_button<'a, Message: Clone + 'a>(
    content: impl Fn() -> Element<'a, Message> + 'a,
    on_press: Option<Message>,
    hovered: bool,
    on_hover: impl Fn(bool) -> Message + 'a,
    padding: [u16; 2],
) -> Element<'a, Message> {
    with_width(content, on_press, hovered, on_hover, padding, Length::Shrink)
}

pub fn primary_button_fill<'a, Message: Clone + 'a>(
    content: impl Fn() -> Element<'a, Message> + 'a,
    on_press: Option<Message>,
    hovered: bool,
    on_hover: impl Fn(bool) -> Message + 'a,
    padding: [u16; 2],
) -> Element<'a, Message> {
    with_width(content, on_press, hovered, on_hover, padding, Length::Fill)
}

fn with_width<'a, Message: Clone + 'a>(
    content: impl Fn() -> Element<'a, Message> + 'a,
    on_press: Option<Message>,
    hovered: bool,
    on_hover: impl Fn(bool) -> Message + 'a,
    padding: [u16; 2],
    width: Length,
) -> Element<'a, Message> {
    if on_press.is_none() {
        return build_button(&content, None, padding, width, 0.0);
    }

    let target = if hovered { 1.0_f32 } else { 0.0 };
    let animated: Element<'a, Message> = AnimationBuilder::new(target, move |t: f32| {
        build_button(&content, on_press.as_ref(), padding, width, t.clamp(0.0, 1.0))
    })
    .animates_layout(true)
    .animation(Easing::EASE_OUT.with_duration(ANIMATION_DURATION))
    .into();

    mouse_area(animated)
        .on_enter(on_hover(true))
        .on_exit(on_hover(false))
        .into()
}

fn build_button<'a, Message: Clone + 'a>(
    content: &dyn Fn() -> Element<'a, Message>,
    on_press: Option<&Message>,
    padding: [u16; 2],
    width: Length,
    hover_amount: f32,
) -> Element<'a, Message> {
    let btn = button(content())
        .on_press_maybe(on_press.cloned())
        .padding(padding)
        .width(width)
        .style(move |theme: &Theme, status: button::Status| {
            let base = theme.extended_palette().primary.base.color;
            match status {
                button::Status::Disabled => disabled(base),
                button::Status::Pressed => styled(base, 1.0),
                _ => styled(base, hover_amount),
            }
        });

    let rise = hover_amount * FLOAT_HEIGHT;
    container(btn)
        .padding(Padding {
            top: FLOAT_HEIGHT - rise,
            bottom: rise,
            ..Padding::ZERO
        })
        .into()
}

fn styled(base: Color, t: f32) -> button::Style {
    button::Style {
        background: Some(darken(base, t).into()),
        text_color: Color::WHITE,
        border: Border {
            radius: CORNER_RADIUS.into(),
            ..Border::default()
        },
        shadow: Shadow {
            color: Color {
                a: lerp(SHADOW_ALPHA.0, SHADOW_ALPHA.1, t),
                ..base
            },
            offset: Vector::new(0.0, SHADOW_OFFSET_Y),
            blur_radius: lerp(SHADOW_BLUR.0, SHADOW_BLUR.1, t),
        },
        ..button::Style::default()
    }
}

fn disabled(base: Color) -> button::Style {
    button::Style {
        background: Some(
            Color {
                a: DISABLED_ALPHA,
                ..base
            }
            .into(),
        ),
        text_color: Color {
            a: 0.8,
            ..Color::WHITE
        },
        border: Border {
            radius: CORNER_RADIUS.into(),
            ..Border::default()
        },
        ..button::Style::default()
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn darken(color: Color, amount: f32) -> Color {
    let shift = HOVER_DARKEN * amount;
    Color {
        r: (color.r - shift).max(0.0),
        g: (color.g - shift).max(0.0),
        b: (color.b - shift).max(0.0),
        a: 1.0,
    }
}
