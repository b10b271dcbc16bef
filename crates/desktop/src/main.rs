mod app;
mod screens;
mod settings;
mod theme;
mod widgets;

use app::App;

fn main() -> iced::Result {
    env_logger::init();

    iced::application(App::new, App::update, App::view)
        .title("Face Screening")
        .theme(App::theme)
        .subscription(App::subscription)
        .window(iced::window::Settings {
            size: iced::Size::new(560.0, 620.0),
            min_size: Some(iced::Size::new(420.0, 480.0)),
            ..Default::default()
        })
        .run()
}
