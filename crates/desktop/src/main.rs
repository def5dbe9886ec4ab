mod app;
mod settings;
mod tabs;
mod theme;
mod widgets;
mod workers;

use app::App;

fn main() -> iced::Result {
    env_logger::init();

    iced::application(App::new, App::update, App::view)
        .title("PixelScope")
        .theme(App::theme)
        .subscription(App::subscription)
        .window(iced::window::Settings {
            size: iced::Size::new(1000.0, 720.0),
            ..Default::default()
        })
        .run()
}
